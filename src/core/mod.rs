//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Configurazione
//! - Gestione errori
//! - Estrattori
//! - Stato applicazione

pub mod config;
pub mod error;
pub mod extract;
pub mod state;

// Re-exports per facilitare l'import
pub use config::{Config, PagingConfig};
pub use error::{AppError, DataError};
pub use extract::JsonBody;
pub use state::AppState;
