//! Discography server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod updates;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, config};
pub use services::root;

use axum::{Router, routing::get};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", configure_api_routes())
        .with_state(state)
}

/// Configura le routes CRUD per singers, songs e albums
fn configure_api_routes() -> Router<Arc<AppState>> {
    use services::*;

    Router::new()
        .route("/singers", get(list_singers).post(create_singer))
        .route(
            "/singers/{id}",
            get(get_singer)
                .put(update_singer)
                .patch(partial_update_singer)
                .delete(delete_singer),
        )
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song)
                .put(update_song)
                .patch(partial_update_song)
                .delete(delete_song),
        )
        .route("/albums", get(list_albums).post(create_album))
        .route(
            "/albums/{id}",
            get(get_album)
                .put(update_album)
                .patch(partial_update_album)
                .delete(delete_album),
        )
}
