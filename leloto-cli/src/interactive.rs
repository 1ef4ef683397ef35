use std::io::{self, Write};

use anyhow::{Context, Result};
use leloto_db::models::{Pool, validate_draw};
use leloto_db::rusqlite::Connection;
use leloto_stats::StatsError;
use leloto_stats::config::RecencyWindow;

use crate::config::DashboardConfig;
use crate::{
    cmd_add, cmd_advanced, cmd_combos, cmd_freq, cmd_gaps, cmd_list, cmd_stats, cmd_suggest,
    cmd_trend, load_store,
};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Frequencies,
    Stats,
    Combinations,
    Trend,
    Gaps,
    Advanced,
    Suggest,
    History,
    Add,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "frequences" | "fréquences" | "freq" => Some(InteractiveCommand::Frequencies),
        "2" | "stats" => Some(InteractiveCommand::Stats),
        "3" | "combinaisons" | "combos" => Some(InteractiveCommand::Combinations),
        "4" | "tendance" | "trend" => Some(InteractiveCommand::Trend),
        "5" | "ecarts" | "écarts" | "gaps" => Some(InteractiveCommand::Gaps),
        "6" | "avance" | "avancé" | "advanced" => Some(InteractiveCommand::Advanced),
        "7" | "grilles" | "suggest" => Some(InteractiveCommand::Suggest),
        "8" | "historique" | "history" | "hist" => Some(InteractiveCommand::History),
        "9" | "ajouter" | "add" => Some(InteractiveCommand::Add),
        "0" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Analyse du Loto ──");
    println!("  1. frequences   Fréquence des numéros");
    println!("  2. stats        Fréquences et retards");
    println!("  3. combinaisons Combinaisons fréquentes");
    println!("  4. tendance     Tendance récente");
    println!("  5. ecarts       Écarts d'un numéro");
    println!("  6. avance       Statistiques avancées");
    println!("  7. grilles      Générer des grilles");
    println!("  8. historique   Derniers tirages");
    println!("  9. ajouter      Ajouter un tirage");
    println!("  0. quitter      Quitter");
    println!();
}

pub(crate) fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn parse_balls(input: &str) -> Option<[u8; 5]> {
    let nums: Vec<u8> = input
        .split_whitespace()
        .map(|s| s.parse::<u8>())
        .collect::<Result<_, _>>()
        .ok()?;
    let arr: [u8; 5] = nums.try_into().ok()?;
    validate_draw(&arr, 1).ok()?;
    Some(arr)
}

pub(crate) fn prompt_balls() -> Result<[u8; 5]> {
    loop {
        let input = prompt("5 boules (séparées par des espaces, 1-49) : ")?;
        match parse_balls(&input) {
            Some(balls) => return Ok(balls),
            None => println!("Entrez exactement 5 numéros distincts entre 1 et 49. Réessayez."),
        }
    }
}

pub(crate) fn prompt_bonus() -> Result<u8> {
    loop {
        let input = prompt("Numéro chance (1-10) : ")?;
        match input.parse::<u8>() {
            Ok(n) if Pool::Bonus.contains(n) => return Ok(n),
            _ => println!("Numéro chance invalide (1-10). Réessayez."),
        }
    }
}

fn prompt_window(config: &DashboardConfig) -> Result<RecencyWindow> {
    let input = prompt_with_default(
        "Période d'analyse en jours (30-365)",
        &config.recency_days.to_string(),
    )?;
    let days: u32 = input.parse().context("Nombre de jours invalide")?;
    Ok(RecencyWindow::new(days)?)
}

fn prompt_number() -> Result<u8> {
    let input = prompt("Numéro à analyser (1-49) : ")?;
    let number: u8 = input.parse().context("Numéro invalide")?;
    if !Pool::Principal.contains(number) {
        anyhow::bail!("Numéro {} hors limites (1-49)", number);
    }
    Ok(number)
}

pub(crate) fn run_interactive(conn: &Connection, config: &DashboardConfig) -> Result<()> {
    let mut store = load_store(conn)?;

    loop {
        display_menu();
        let input = prompt("Choix : ")?;

        let Some(command) = parse_command(&input) else {
            println!("Commande inconnue : '{}'", input);
            continue;
        };

        let result = match command {
            InteractiveCommand::Frequencies => cmd_freq(&store),
            InteractiveCommand::Stats => cmd_stats(&store),
            InteractiveCommand::Combinations => cmd_combos(&store, config.top_combinations),
            InteractiveCommand::Trend => {
                prompt_window(config).and_then(|window| cmd_trend(&store, window))
            }
            InteractiveCommand::Gaps => prompt_number().and_then(|n| cmd_gaps(&store, n)),
            InteractiveCommand::Advanced => cmd_advanced(&store),
            InteractiveCommand::Suggest => cmd_suggest(&store, None, None),
            InteractiveCommand::History => cmd_list(&store, config.recent_results),
            InteractiveCommand::Add => cmd_add(conn).and_then(|_| {
                // L'historique a changé : on reconstruit la vue en mémoire.
                store = load_store(conn)?;
                Ok(())
            }),
            InteractiveCommand::Quit => {
                println!("Au revoir !");
                return Ok(());
            }
        };

        if let Err(e) = result {
            if e.downcast_ref::<StatsError>() == Some(&StatsError::EmptyDataset) {
                println!("Base vide. Ajoutez des tirages ou lancez : leloto import");
            } else {
                println!("Erreur : {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("1"), Some(InteractiveCommand::Frequencies));
        assert_eq!(parse_command(" Écarts "), Some(InteractiveCommand::Gaps));
        assert_eq!(parse_command("GRILLES"), Some(InteractiveCommand::Suggest));
        assert_eq!(parse_command("q"), Some(InteractiveCommand::Quit));
        assert_eq!(parse_command("inconnu"), None);
    }

    #[test]
    fn test_parse_balls() {
        assert_eq!(parse_balls("5 4 3 2 1"), Some([5, 4, 3, 2, 1]));
        assert_eq!(parse_balls("1 2 3 4"), None);
        assert_eq!(parse_balls("1 2 3 4 50"), None);
        assert_eq!(parse_balls("1 1 3 4 5"), None);
        assert_eq!(parse_balls("a b c d e"), None);
    }
}
