//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository e la configurazione condivisa tra tutte le route.

use crate::core::config::PagingConfig;
use crate::repositories::{AlbumRepository, SingerRepository, SongRepository};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route
pub struct AppState {
    /// Repository per la gestione dei cantanti
    pub singer: SingerRepository,

    /// Repository per la gestione delle canzoni
    pub song: SongRepository,

    /// Repository per la gestione degli album (join con singer e song)
    pub album: AlbumRepository,

    /// Limiti di paginazione per le liste
    pub paging: PagingConfig,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `paging` - Dimensioni di pagina di default e massima
    pub fn new(pool: SqlitePool, paging: PagingConfig) -> Self {
        Self {
            singer: SingerRepository::new(pool.clone()),
            song: SongRepository::new(pool.clone()),
            album: AlbumRepository::new(pool),
            paging,
        }
    }
}
