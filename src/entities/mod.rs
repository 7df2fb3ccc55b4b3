//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella: `singer`, `song`, `album`.
//!
//! Entities are immutable once built: fields are private and every change goes
//! through a consuming `with_*` method that returns the new value.

pub mod album;
pub mod singer;
pub mod song;

// Re-exports per facilitare l'import
pub use album::{Album, AlbumPatch};
pub use singer::{Singer, SingerPatch};
pub use song::{Song, SongPatch};

/// A persisted record with an identity that is assigned on insert.
pub trait Entity {
    /// Lowercase name used in log lines and error messages (e.g. `"album"`).
    const NAME: &'static str;

    /// Identity of the entity, `None` until the row has been inserted.
    fn id(&self) -> Option<i64>;
}

/// Field-level partial merge.
///
/// Every field that is `Some` in the patch overwrites the stored value,
/// every `None` field leaves the stored value untouched.
pub trait Merge: Sized {
    type Patch;

    fn merge(self, patch: Self::Patch) -> Self;
}

/// Identity-based equality shared by all entities: two values are equal only if
/// both carry an id and the ids match.
pub(crate) fn same_identity(a: Option<i64>, b: Option<i64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Non-owning reference from one entity to another.
///
/// The foreign key is derived from the state, so the id and the resolved
/// object can never disagree.
#[derive(Debug, Clone, Default)]
pub enum Reference<T> {
    /// No related row (null foreign key).
    #[default]
    Absent,
    /// Foreign key known, related row not loaded (or dangling).
    Id(i64),
    /// Related row loaded by the join.
    Resolved(T),
}

impl<T: Entity> Reference<T> {
    /// Builds a reference from an optional foreign key.
    pub fn from_id(id: Option<i64>) -> Self {
        match id {
            Some(id) => Self::Id(id),
            None => Self::Absent,
        }
    }

    /// Builds a reference from an optional loaded object.
    pub fn from_entity(entity: Option<T>) -> Self {
        match entity {
            Some(entity) => Self::Resolved(entity),
            None => Self::Absent,
        }
    }

    /// Foreign key value as it is written to the database.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Absent => None,
            Self::Id(id) => Some(*id),
            Self::Resolved(entity) => entity.id(),
        }
    }

    /// Loaded object, if the join resolved one.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Resolved(entity) => Some(entity),
            _ => None,
        }
    }

    /// Points the reference at `id`, keeping the loaded object if it is already that row.
    pub fn retarget(self, id: Option<i64>) -> Self {
        match (self, id) {
            (Self::Resolved(entity), Some(id)) if entity.id() == Some(id) => Self::Resolved(entity),
            (_, id) => Self::from_id(id),
        }
    }
}
