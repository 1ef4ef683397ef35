use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use leloto_db::db;
use leloto_stats::config::RecencyWindow;

pub const RECENT_RESULTS_RANGE: std::ops::RangeInclusive<usize> = 5..=50;

/// Réglages du tableau de bord, lus depuis un fichier JSON optionnel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub recency_days: u32,
    pub recent_results: usize,
    pub top_combinations: usize,
    pub db_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recency_days: RecencyWindow::DEFAULT_DAYS,
            recent_results: 10,
            top_combinations: 4,
            db_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        RecencyWindow::new(self.recency_days)?;
        if !RECENT_RESULTS_RANGE.contains(&self.recent_results) {
            bail!(
                "recent_results={} hors limites ({}-{})",
                self.recent_results,
                RECENT_RESULTS_RANGE.start(),
                RECENT_RESULTS_RANGE.end()
            );
        }
        if self.top_combinations == 0 {
            bail!("top_combinations doit être positif");
        }
        Ok(())
    }

    pub fn recency_window(&self) -> Result<RecencyWindow> {
        Ok(RecencyWindow::new(self.recency_days)?)
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(db::db_path)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    let config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Impossible de lire {:?}", path))?;
            let config: DashboardConfig = serde_json::from_str(&json)
                .with_context(|| format!("JSON invalide dans {:?}", path))?;
            log::info!("Configuration chargée depuis {:?}", path);
            config
        }
        None => DashboardConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recency_window().unwrap().days(), 90);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DashboardConfig = serde_json::from_str(r#"{"recency_days": 180}"#).unwrap();
        assert_eq!(config.recency_days, 180);
        assert_eq!(config.recent_results, 10);
        assert_eq!(config.top_combinations, 4);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_recency_out_of_range_rejected() {
        let config = DashboardConfig {
            recency_days: 400,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recent_results_out_of_range_rejected() {
        let config = DashboardConfig {
            recent_results: 100,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_db_path() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"db_path": "/tmp/loto.db"}"#).unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/loto.db"));
    }
}
