//! Moteur de statistiques sur l'historique des tirages du Loto.
//!
//! Tout est calculé à la demande à partir d'un [`store::DrawStore`] immuable :
//! fréquences, combinaisons, écarts et retards, profil des tirages, puis
//! génération de grilles à partir de ces tables.

pub mod combination;
pub mod config;
pub mod delay;
pub mod error;
pub mod frequency;
pub mod profile;
pub mod store;
pub mod suggest;

pub use error::StatsError;
