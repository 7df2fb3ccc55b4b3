//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica entità.

pub mod album;
pub mod singer;
pub mod song;

// Re-exports per facilitare l'import
pub use album::{
    create_album, delete_album, get_album, list_albums, partial_update_album, update_album,
};
pub use singer::{
    create_singer, delete_singer, get_singer, list_singers, partial_update_singer, update_singer,
};
pub use song::{create_song, delete_song, get_song, list_songs, partial_update_song, update_song};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
