use crate::error::{Result, StatsError};

/// Fenêtre de récence en jours, utilisée pour la vue "tendances récentes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecencyWindow(u32);

impl RecencyWindow {
    pub const MIN_DAYS: u32 = 30;
    pub const MAX_DAYS: u32 = 365;
    pub const DEFAULT_DAYS: u32 = 90;

    pub fn new(days: u32) -> Result<Self> {
        if !(Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days) {
            return Err(StatsError::Configuration(format!(
                "fenêtre de {} jours hors limites ({}-{})",
                days,
                Self::MIN_DAYS,
                Self::MAX_DAYS
            )));
        }
        Ok(Self(days))
    }

    pub fn clamped(days: u32) -> Self {
        Self(days.clamp(Self::MIN_DAYS, Self::MAX_DAYS))
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}
