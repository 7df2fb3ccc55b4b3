//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API, JSON camelCase) dalla
//! rappresentazione interna (entities). Tutti i campi sono opzionali: lo stesso
//! DTO serve per POST/PUT (rappresentazione completa, controllata da `TryFrom`)
//! e per PATCH (solo i campi presenti, via `into_patch`).

pub mod album;
pub mod query;
pub mod singer;
pub mod song;

pub use album::AlbumDTO;
pub use query::{AlbumFilterQuery, PageQuery};
pub use singer::SingerDTO;
pub use song::SongDTO;
