use leloto_db::models::{Draw, Pool};

use crate::config::RecencyWindow;
use crate::delay::current_delays;
use crate::store::DrawStore;

/// Nombre d'apparitions de chaque numéro du pool.
///
/// Le domaine est toujours complet : un numéro jamais sorti est présent
/// avec un compte de zéro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    pool: Pool,
    counts: Vec<u32>,
}

impl FrequencyTable {
    pub fn pool(&self) -> Pool {
        self.pool
    }

    pub fn count(&self, number: u8) -> u32 {
        if !self.pool.contains(number) {
            return 0;
        }
        self.counts[(number - 1) as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// (numéro, compte) par numéro croissant.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i + 1) as u8, c))
    }

    /// Numéros classés par compte décroissant, égalités par numéro croissant.
    pub fn ranked(&self) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    pub fn top_n(&self, n: usize) -> Vec<u8> {
        self.ranked().into_iter().take(n).map(|(num, _)| num).collect()
    }

    /// Les `n` numéros les moins sortis, zéros compris.
    pub fn bottom_n(&self, n: usize) -> Vec<u8> {
        let mut ranked: Vec<(u8, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().take(n).map(|(num, _)| num).collect()
    }
}

pub fn frequency_table(draws: &[Draw], pool: Pool) -> FrequencyTable {
    let mut counts = vec![0u32; pool.size()];

    for draw in draws {
        for &n in pool.numbers_from(draw) {
            if pool.contains(n) {
                counts[(n - 1) as usize] += 1;
            }
        }
    }

    FrequencyTable { pool, counts }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub delay: u32,
}

pub fn number_stats(draws: &[Draw], pool: Pool) -> Vec<NumberStats> {
    let table = frequency_table(draws, pool);
    current_delays(draws, pool)
        .into_iter()
        .map(|(number, delay)| NumberStats {
            number,
            frequency: table.count(number),
            delay,
        })
        .collect()
}

/// Les 5 numéros principaux les plus sortis sur la fenêtre récente, triés.
pub fn recent_trend(store: &DrawStore, window: RecencyWindow) -> Vec<u8> {
    let recent = store.recent(window);
    log::debug!("tendance sur {} jours : {} tirages", window.days(), recent.len());
    let mut trend = frequency_table(recent, Pool::Principal).top_n(Pool::Principal.pick_count());
    trend.sort();
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leloto_db::models::make_test_draws;

    fn draw(date: &str, balls: [u8; 5], bonus: u8) -> Draw {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Draw::new(date, balls, bonus).unwrap()
    }

    fn example_draws() -> Vec<Draw> {
        vec![
            draw("2024-01-01", [1, 2, 3, 4, 5], 1),
            draw("2024-01-08", [1, 2, 6, 7, 8], 2),
        ]
    }

    #[test]
    fn test_example_scenario_counts() {
        let table = frequency_table(&example_draws(), Pool::Principal);
        assert_eq!(table.count(1), 2);
        assert_eq!(table.count(2), 2);
        for n in 3..=8 {
            assert_eq!(table.count(n), 1);
        }
        for n in 9..=49 {
            assert_eq!(table.count(n), 0);
        }
    }

    #[test]
    fn test_totals_match_draw_count() {
        let draws = make_test_draws(57);
        assert_eq!(frequency_table(&draws, Pool::Principal).total(), 5 * 57);
        assert_eq!(frequency_table(&draws, Pool::Bonus).total(), 57);
    }

    #[test]
    fn test_empty_draws_zero_table() {
        let table = frequency_table(&[], Pool::Bonus);
        assert_eq!(table.iter().count(), 10);
        assert!(table.iter().all(|(_, c)| c == 0));
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_top_n_distinct_and_sorted() {
        let draws = make_test_draws(23);
        let table = frequency_table(&draws, Pool::Principal);
        for n in [1, 5, 15, 49] {
            let top = table.top_n(n);
            assert_eq!(top.len(), n);
            let mut dedup = top.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), n);
            for pair in top.windows(2) {
                assert!(table.count(pair[0]) >= table.count(pair[1]));
            }
        }
    }

    #[test]
    fn test_top_n_ties_ascending() {
        let table = frequency_table(&example_draws(), Pool::Principal);
        assert_eq!(table.top_n(4), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_top_n_larger_than_domain() {
        let table = frequency_table(&example_draws(), Pool::Bonus);
        assert_eq!(table.top_n(50).len(), 10);
    }

    #[test]
    fn test_bottom_n_includes_unseen() {
        let table = frequency_table(&example_draws(), Pool::Principal);
        assert_eq!(table.bottom_n(3), vec![9, 10, 11]);
        let bonus = frequency_table(&example_draws(), Pool::Bonus);
        assert_eq!(bonus.bottom_n(8), vec![3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_number_stats() {
        let stats = number_stats(&example_draws(), Pool::Principal);
        assert_eq!(stats.len(), 49);
        assert_eq!(stats[0], NumberStats { number: 1, frequency: 2, delay: 0 });
        assert_eq!(stats[2], NumberStats { number: 3, frequency: 1, delay: 1 });
        assert_eq!(stats[48], NumberStats { number: 49, frequency: 0, delay: 2 });
    }

    #[test]
    fn test_recent_trend_sorted() {
        let store = DrawStore::new(example_draws());
        let trend = recent_trend(&store, RecencyWindow::new(30).unwrap());
        assert_eq!(trend, vec![1, 2, 3, 4, 5]);
    }
}
