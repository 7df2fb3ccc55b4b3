//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SULLE QUERY ************************* //

/*
   Qui non usiamo query! / query_as!: quelle macro vogliono un database raggiungibile
   (o i file .sqlx) in fase di compilazione, e le SELECT degli album cambiano forma
   a runtime (alias configurabili, filtri, ordinamento, paginazione).
   Quindi:
   - query fisse (INSERT, UPDATE, DELETE, COUNT) -> sqlx::query / sqlx::query_scalar con .bind(...)
   - SELECT -> QueryBuilder (vedi query.rs): i valori vanno sempre con push_bind,
     i nomi di colonna vengono controllati contro la descrizione della tabella
     prima di finire nella stringa SQL.
   Le righe vengono lette a mano con row.try_get("prefisso_colonna"): ogni tabella
   nella SELECT ha il suo prefisso, così la riga della join si spezza in tre entità.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod album;
pub mod query;
pub mod singer;
pub mod song;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, ReadMany, Save, Update};

pub use query::{Criteria, Direction, PageSpec, Sort};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use album::{AlbumAliases, AlbumRepository};
pub use singer::SingerRepository;
pub use song::SongRepository;
