#![allow(dead_code)]

use axum_test::TestServer;
use discography::core::{AppState, PagingConfig};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool SQLite (database di test creato da `#[sqlx::test]`)
///
/// # Returns
/// Arc<AppState> con i limiti di paginazione di default
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, PagingConfig::default()))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = discography::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Shortcut: state + server sullo stesso pool
pub fn create_test_app(pool: SqlitePool) -> TestServer {
    create_test_server(create_test_state(pool))
}

/// Svuota le tabelle, album per primi per via delle foreign key.
///
/// Best effort: gli errori vengono ignorati.
pub async fn delete_all(pool: &SqlitePool) {
    for table in ["album", "song", "singer"] {
        let _ = sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await;
    }
}
