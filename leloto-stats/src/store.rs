use chrono::{Days, NaiveDate};

use leloto_db::models::Draw;

use crate::config::RecencyWindow;
use crate::error::{Result, StatsError};

/// Historique immuable des tirages, trié par date croissante.
///
/// Construit une seule fois au démarrage puis partagé en lecture seule ;
/// toutes les tables sont recalculées à partir de lui (ou de [`DrawStore::recent`]).
#[derive(Debug, Clone, Default)]
pub struct DrawStore {
    draws: Vec<Draw>,
}

impl DrawStore {
    pub fn new(mut draws: Vec<Draw>) -> Self {
        draws.sort_by_key(|d| d.date);
        log::info!("{} tirages chargés", draws.len());
        Self { draws }
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn require_draws(&self) -> Result<()> {
        if self.draws.is_empty() {
            return Err(StatsError::EmptyDataset);
        }
        Ok(())
    }

    pub fn last_date(&self) -> Result<NaiveDate> {
        self.draws
            .last()
            .map(|d| d.date)
            .ok_or(StatsError::EmptyDataset)
    }

    /// Les `n` derniers tirages, du plus récent au plus ancien.
    pub fn latest(&self, n: usize) -> Vec<Draw> {
        self.draws.iter().rev().take(n).cloned().collect()
    }

    /// Tirages strictement postérieurs à `dernière date - fenêtre`.
    pub fn recent(&self, window: RecencyWindow) -> &[Draw] {
        let Ok(last) = self.last_date() else {
            return &[];
        };
        let start = match last.checked_sub_days(Days::new(window.days() as u64)) {
            Some(limit) => self.draws.partition_point(|d| d.date <= limit),
            None => 0,
        };
        &self.draws[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leloto_db::models::make_test_draws;

    #[test]
    fn test_store_sorts_by_date() {
        let mut draws = make_test_draws(10);
        draws.reverse();
        let store = DrawStore::new(draws);
        for pair in store.draws().windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn test_empty_store() {
        let store = DrawStore::default();
        assert!(store.is_empty());
        assert_eq!(store.last_date(), Err(StatsError::EmptyDataset));
        assert_eq!(store.require_draws(), Err(StatsError::EmptyDataset));
        assert!(store.recent(RecencyWindow::default()).is_empty());
    }

    #[test]
    fn test_latest_newest_first() {
        let store = DrawStore::new(make_test_draws(20));
        let latest = store.latest(3);
        assert_eq!(latest.len(), 3);
        assert!(latest[0].date > latest[1].date);
        assert_eq!(latest[0].date, store.last_date().unwrap());
    }

    #[test]
    fn test_recent_window_excludes_boundary() {
        // Un tirage tous les 3 jours : 200 tirages couvrent ~600 jours.
        let store = DrawStore::new(make_test_draws(200));
        let last = store.last_date().unwrap();
        let recent = store.recent(RecencyWindow::new(30).unwrap());
        // 30 jours stricts : écarts de 0, 3, ..., 27 jours → 10 tirages
        assert_eq!(recent.len(), 10);
        assert!(recent.iter().all(|d| (last - d.date).num_days() < 30));
    }

    #[test]
    fn test_recent_window_larger_than_history() {
        let store = DrawStore::new(make_test_draws(5));
        assert_eq!(store.recent(RecencyWindow::new(365).unwrap()).len(), 5);
    }
}
