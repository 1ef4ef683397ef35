use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};
use textplots::Plot;

use crate::import::ImportResult;
use leloto_db::models::Draw;
use leloto_stats::delay::DelaySequence;
use leloto_stats::frequency::{FrequencyTable, NumberStats};
use leloto_stats::suggest::Grid;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Histogramme ASCII : (abscisse, effectif).
fn bar_chart(points: &[(u32, u32)], step: u32) {
    if points.is_empty() {
        println!("(aucune donnée)");
        return;
    }
    let bars: Vec<(f32, f32)> = points.iter().map(|&(x, y)| (x as f32, y as f32)).collect();
    let x_min = bars.first().map(|b| b.0).unwrap_or(0.0);
    let x_max = bars.last().map(|b| b.0).unwrap_or(0.0) + step.max(1) as f32;
    let shape = textplots::Shape::Bars(&bars);
    textplots::Chart::new(120, 40, x_min, x_max)
        .lineplot(&shape)
        .nice();
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Date", "Boules", "Chance"]);
    for draw in draws {
        table.add_row(vec![
            draw.date.format("%d/%m/%Y").to_string(),
            format_numbers(&draw.balls),
            format!("{:2}", draw.bonus),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues    : {}", result.total_records);
    println!("  Insérés              : {}", result.inserted);
    println!("  Doublons ignorés     : {}", result.skipped);
    println!("  Sans numéro chance   : {}", result.dropped);
    if result.errors > 0 {
        println!("  Erreurs              : {}", result.errors);
    }
}

pub fn display_frequencies(principal: &FrequencyTable, bonus: &FrequencyTable, n_draws: usize) {
    println!("\n📊 Fréquences sur {} tirages\n", n_draws);

    for table in [principal, bonus] {
        println!("── {} ──", table.pool());
        let points: Vec<(u32, u32)> = table.iter().map(|(n, c)| (n as u32, c)).collect();
        bar_chart(&points, 1);

        let mut top = new_table(vec!["Rang", "Numéro", "Sorties"]);
        for (rank, (number, count)) in table.ranked().into_iter().take(5).enumerate() {
            top.add_row(vec![
                format!("{}", rank + 1),
                format!("{:2}", number),
                format!("{} fois", count),
            ]);
        }
        println!("{top}\n");
    }
}

pub fn display_stats(ball_stats: &[NumberStats], bonus_stats: &[NumberStats], n_draws: usize) {
    println!("\n📊 Statistiques sur les {} tirages\n", n_draws);

    for (title, stats) in [("Boules (1-49)", ball_stats), ("Numéros chance (1-10)", bonus_stats)] {
        println!("── {} ──", title);
        let mut table = new_table(vec!["Numéro", "Fréquence", "Retard"]);

        let mut sorted = stats.to_vec();
        sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));

        for stat in &sorted {
            table.add_row(vec![
                format!("{:2}", stat.number),
                stat.frequency.to_string(),
                stat.delay.to_string(),
            ]);
        }
        println!("{table}\n");
    }
}

pub fn display_combinations(tops: &[(usize, Vec<(Vec<u8>, u32)>)]) {
    println!("\n🔢 Combinaisons les plus fréquentes\n");

    let mut table = new_table(vec!["Taille", "Rang", "Combinaison", "Sorties"]);
    for (arity, top) in tops {
        for (rank, (combination, count)) in top.iter().enumerate() {
            table.add_row(vec![
                format!("{} numéros", arity),
                format!("{}", rank + 1),
                format_numbers(combination),
                format!("{} fois", count),
            ]);
        }
    }
    println!("{table}");
}

pub fn display_trend(days: u32, n_recent: usize, trend: &[u8]) {
    println!("\n🔮 Tendance sur les {} derniers jours ({} tirages)\n", days, n_recent);
    if trend.is_empty() {
        println!("Aucun tirage dans la fenêtre.");
        return;
    }
    println!("Numéros les plus sortis : {}", format_numbers(trend));
}

pub fn display_gaps(seq: &DelaySequence, histogram: &[(u32, u32)], bin_width: u32) {
    println!("\n⏳ Écarts du numéro {}\n", seq.number);

    let mut table = new_table(vec!["Apparitions", "Écart moyen", "Écart max", "Retard actuel"]);
    table.add_row(vec![
        seq.appearances.to_string(),
        seq.mean_gap().map(|m| format!("{:.1}", m)).unwrap_or_else(|| "—".to_string()),
        seq.max_gap().map(|m| m.to_string()).unwrap_or_else(|| "—".to_string()),
        seq.current_delay.to_string(),
    ]);
    println!("{table}");

    println!("\nDistribution des écarts (tranches de {}) :", bin_width);
    bar_chart(histogram, bin_width);
}

pub fn display_profile(parity: &[u32; 6], sums: &[(u32, u32)], sum_bin: u32, sequences: &[u32; 5]) {
    println!("\n🔄 Parité (nombre de numéros impairs par tirage)\n");
    let mut table = new_table(vec!["Impairs", "Pairs", "Tirages"]);
    for (odds, count) in parity.iter().enumerate() {
        table.add_row(vec![odds.to_string(), (5 - odds).to_string(), count.to_string()]);
    }
    println!("{table}");

    println!("\n➕ Somme des 5 numéros (tranches de {})\n", sum_bin);
    bar_chart(sums, sum_bin);

    println!("\n🔗 Paires de numéros consécutifs par tirage\n");
    let mut table = new_table(vec!["Paires", "Tirages"]);
    for (pairs, count) in sequences.iter().enumerate() {
        table.add_row(vec![pairs.to_string(), count.to_string()]);
    }
    println!("{table}");
}

pub fn display_delays(delays: &[(u8, u32)]) {
    println!("\n⏰ Retard actuel de chaque numéro\n");
    let points: Vec<(u32, u32)> = delays.iter().map(|&(n, d)| (n as u32, d)).collect();
    bar_chart(&points, 1);

    let mut sorted = delays.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut table = new_table(vec!["Numéro", "Retard"]);
    for (number, delay) in sorted.iter().take(10) {
        table.add_row(vec![format!("{:2}", number), delay.to_string()]);
    }
    println!("{table}");
}

pub fn display_grids(grids: &[Grid]) {
    println!("\n🎲 Suggestions de grilles\n");

    let mut table = new_table(vec!["Stratégie", "Principaux", "Chance"]);
    for grid in grids {
        table.add_row(vec![
            Cell::new(grid.strategy.to_string()),
            Cell::new(format_numbers(&grid.balls)).fg(Color::Green),
            Cell::new(format!("{:2}", grid.bonus)).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
    println!("Rappel : chaque tirage est indépendant, ces grilles n'augmentent pas les chances de gain.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_numbers(&[1, 12, 49]), " 1 - 12 - 49");
        assert_eq!(format_numbers(&[]), "");
    }
}
