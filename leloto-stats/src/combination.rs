use std::collections::BTreeMap;

use leloto_db::models::Draw;

use crate::error::{Result, StatsError};

pub const MIN_ARITY: usize = 2;
pub const MAX_ARITY: usize = 5;

/// Co-occurrences des sous-ensembles de `k` boules, clé = tuple trié.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationTable {
    arity: usize,
    counts: BTreeMap<Vec<u8>, u32>,
}

impl CombinationTable {
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Compte d'une combinaison, quel que soit l'ordre des numéros donnés.
    pub fn count(&self, combination: &[u8]) -> u32 {
        let mut key = combination.to_vec();
        key.sort();
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn top_n(&self, n: usize) -> Vec<(Vec<u8>, u32)> {
        let mut ranked: Vec<(&Vec<u8>, u32)> = self.counts.iter().map(|(k, &c)| (k, c)).collect();
        // L'ordre de la BTreeMap sert de départage : tri stable sur le compte seul.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(k, c)| (k.clone(), c))
            .collect()
    }
}

/// Sous-ensembles de taille `k` des boules, dans l'ordre lexicographique.
fn subsets(balls: &[u8; 5], k: usize) -> Vec<Vec<u8>> {
    let mut sorted = *balls;
    sorted.sort();

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    let n = sorted.len();
    loop {
        out.push(idx.iter().map(|&i| sorted[i]).collect());

        // Avance l'indice le plus à droite qui peut encore bouger.
        let Some(pos) = (0..k).rev().find(|&p| idx[p] < n - k + p) else {
            break;
        };
        idx[pos] += 1;
        for p in (pos + 1)..k {
            idx[p] = idx[p - 1] + 1;
        }
    }
    out
}

pub fn combination_table(draws: &[Draw], arity: usize) -> Result<CombinationTable> {
    if !(MIN_ARITY..=MAX_ARITY).contains(&arity) {
        return Err(StatsError::InvalidArity(arity));
    }

    let mut counts: BTreeMap<Vec<u8>, u32> = BTreeMap::new();
    for draw in draws {
        for subset in subsets(&draw.balls, arity) {
            *counts.entry(subset).or_insert(0) += 1;
        }
    }

    log::debug!("{} combinaisons distinctes de {} numéros", counts.len(), arity);
    Ok(CombinationTable { arity, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leloto_db::models::make_test_draws;

    fn draw(date: &str, balls: [u8; 5]) -> Draw {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Draw::new(date, balls, 1).unwrap()
    }

    fn example_draws() -> Vec<Draw> {
        vec![
            draw("2024-01-01", [1, 2, 3, 4, 5]),
            draw("2024-01-08", [1, 2, 6, 7, 8]),
        ]
    }

    #[test]
    fn test_subset_counts() {
        let balls = [9, 3, 27, 1, 14];
        let expected = [(2, 10), (3, 10), (4, 5), (5, 1)];
        for (k, n) in expected {
            let subs = subsets(&balls, k);
            assert_eq!(subs.len(), n, "C(5,{k})");
            for s in &subs {
                assert!(s.windows(2).all(|w| w[0] < w[1]), "tuple non trié : {:?}", s);
            }
        }
    }

    #[test]
    fn test_invalid_arity() {
        assert_eq!(combination_table(&[], 1), Err(StatsError::InvalidArity(1)));
        assert_eq!(combination_table(&[], 6), Err(StatsError::InvalidArity(6)));
    }

    #[test]
    fn test_pair_totals() {
        let draws = make_test_draws(31);
        let table = combination_table(&draws, 2).unwrap();
        assert_eq!(table.total(), 10 * 31);
    }

    #[test]
    fn test_triple_and_quadruple_totals() {
        let draws = make_test_draws(31);
        assert_eq!(combination_table(&draws, 3).unwrap().total(), 10 * 31);
        assert_eq!(combination_table(&draws, 4).unwrap().total(), 5 * 31);
    }

    #[test]
    fn test_quintet_totals() {
        let draws = make_test_draws(31);
        let table = combination_table(&draws, 5).unwrap();
        assert_eq!(table.total(), 31);
    }

    #[test]
    fn test_example_scenario_pairs() {
        let table = combination_table(&example_draws(), 2).unwrap();
        for pair in [[1, 3], [1, 4], [1, 5], [2, 3], [2, 4], [2, 5], [3, 4], [3, 5], [4, 5]] {
            assert_eq!(table.count(&pair), 1);
        }
        assert_eq!(table.count(&[1, 2]), 2);
        assert_eq!(table.count(&[2, 1]), 2);

        let top = table.top_n(2);
        assert_eq!(top[0], (vec![1, 2], 2));
        assert_eq!(top[1].1, 1);
    }

    #[test]
    fn test_top_n_ties_lexicographic() {
        let table = combination_table(&example_draws(), 3).unwrap();
        let top = table.top_n(3);
        assert_eq!(top[0], (vec![1, 2, 3], 1));
        assert_eq!(top[1], (vec![1, 2, 4], 1));
        assert_eq!(top[2], (vec![1, 2, 5], 1));
    }

    #[test]
    fn test_empty_draws() {
        let table = combination_table(&[], 3).unwrap();
        assert!(table.is_empty());
        assert!(table.top_n(10).is_empty());
    }
}
