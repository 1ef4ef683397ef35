#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("pool de tirage insuffisant : {needed} numéros requis, {available} disponibles")]
    InsufficientDomain { needed: usize, available: usize },

    #[error("domaine épuisé : impossible de compléter une grille de {needed} numéros ({available} disponibles)")]
    DomainExhausted { needed: usize, available: usize },

    #[error("configuration invalide : {0}")]
    Configuration(String),

    #[error("aucun tirage disponible")]
    EmptyDataset,

    #[error("taille de combinaison {0} invalide (2 à 5)")]
    InvalidArity(usize),
}

pub type Result<T> = std::result::Result<T, StatsError>;
