//! Common repository traits
//!
//! This module defines generic interfaces for database operations. Every
//! entity repository implements the same shape; [`Save`] is derived from
//! [`Create`] and [`Update`] for all of them.

use super::query::{Criteria, PageSpec};
use crate::core::DataError;
use crate::entities::Entity;
use tracing::warn;

/// Trait for inserting new entities in the database
///
/// # Type Parameters
/// * `E` - Type of the entity (its id, if any, is ignored)
pub trait Create<E> {
    /// Inserts a new row and returns the entity with the id assigned by the database
    ///
    /// # Returns
    /// * `Ok(E)` - Persisted entity with a fresh id
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn insert(&self, entity: &E) -> Result<E, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `E` - Type of the entity to read
/// * `Id` - Type of the primary key
pub trait Read<E, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(E))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    async fn find_by_id(&self, id: &Id) -> Result<Option<E>, sqlx::Error>;

    /// Checks whether a row with that primary key exists
    async fn exists_by_id(&self, id: &Id) -> Result<bool, sqlx::Error>;
}

/// Trait for reading many entities, with optional paging and filtering
pub trait ReadMany<E> {
    /// Reads the rows matching `criteria` (all rows if `None`), bounded and
    /// ordered by `page` if given. Without an ordering the result is unordered.
    async fn find_all_by(
        &self,
        page: Option<&PageSpec>,
        criteria: Option<&Criteria>,
    ) -> Result<Vec<E>, sqlx::Error>;

    /// Total number of rows, independent of any page
    async fn count_all(&self) -> Result<i64, sqlx::Error>;

    async fn find_all(&self) -> Result<Vec<E>, sqlx::Error> {
        self.find_all_by(None, None).await
    }

    async fn find_all_paged(&self, page: &PageSpec) -> Result<Vec<E>, sqlx::Error> {
        self.find_all_by(Some(page), None).await
    }
}

/// Trait for overwriting existing entities
pub trait Update<E> {
    /// Overwrites every column of the row keyed by the entity id
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows affected, `0` if no row has that id
    /// * `Err(sqlx::Error)` - Error during update
    async fn update(&self, entity: &E) -> Result<u64, sqlx::Error>;
}

/// Trait for deleting entities
///
/// # Type Parameters
/// * `Id` - Type of the primary key
pub trait Delete<Id> {
    /// Deletes an entity from the database
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows deleted
    /// * `Err(sqlx::Error)` - Error during deletion (e.g. row still referenced)
    async fn delete(&self, id: &Id) -> Result<u64, sqlx::Error>;
}

/// Insert-or-update dispatch on the presence of the id.
pub trait Save<E: Entity>: Create<E> + Update<E> {
    /// Inserts when the entity has no id, otherwise overwrites the row.
    ///
    /// An update that affects no row means the row disappeared after the
    /// caller checked for it: that is reported as
    /// [`DataError::WriteInconsistency`], never as success.
    async fn save(&self, entity: E) -> Result<E, DataError> {
        match entity.id() {
            None => Ok(self.insert(&entity).await?),
            Some(id) => {
                let affected = self.update(&entity).await?;
                if affected == 0 {
                    warn!("Update of {} {} affected no rows", E::NAME, id);
                    return Err(DataError::WriteInconsistency {
                        entity: E::NAME,
                        id,
                    });
                }
                Ok(entity)
            }
        }
    }
}

impl<E: Entity, R: Create<E> + Update<E>> Save<E> for R {}
