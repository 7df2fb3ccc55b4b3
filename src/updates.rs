//! Update semantics - regole di identità ed esistenza prima di ogni scrittura
//!
//! Two write modes exist for an entity that is already stored:
//! - [`replace`]: the submitted entity overwrites every column of the row;
//! - [`partial_update`]: the stored entity is loaded, the fields present in the
//!   patch are merged in, and the result is written back with a full replace.
//!
//! Both check the identity rule and the row's existence before touching storage.

use crate::core::DataError;
use crate::entities::{Entity, Merge};
use crate::repositories::{Read, Save};
use tracing::{debug, instrument, warn};

/// A new entity must not carry an id.
pub fn check_new(body_id: Option<i64>) -> Result<(), DataError> {
    match body_id {
        Some(_) => Err(DataError::Validation("A new entity cannot already have an ID")),
        None => Ok(()),
    }
}

/// The id in the path and the id in the body must both be present and equal.
pub fn check_identity(path_id: i64, body_id: Option<i64>) -> Result<i64, DataError> {
    match body_id {
        None => Err(DataError::Validation("Invalid id")),
        Some(id) if id != path_id => Err(DataError::Validation("Invalid ID")),
        Some(id) => Ok(id),
    }
}

/// Inserts an entity that has no id yet.
#[instrument(skip(repo, entity), fields(kind = E::NAME))]
pub async fn create<R, E>(repo: &R, entity: E) -> Result<E, DataError>
where
    R: Save<E>,
    E: Entity,
{
    check_new(entity.id())?;
    debug!("Request to save new {}", E::NAME);
    repo.save(entity).await
}

/// Full replace of an existing row.
#[instrument(skip(repo, entity), fields(kind = E::NAME))]
pub async fn replace<R, E>(repo: &R, path_id: i64, entity: E) -> Result<E, DataError>
where
    R: Read<E, i64> + Save<E>,
    E: Entity,
{
    let id = check_identity(path_id, entity.id())?;

    if !repo.exists_by_id(&id).await? {
        warn!("{} {} not found", E::NAME, id);
        return Err(DataError::NotFound {
            entity: E::NAME,
            id,
        });
    }

    debug!("Request to update {} {}", E::NAME, id);
    repo.save(entity).await
}

/// Field-level merge into an existing row.
///
/// `body_id` is the id carried by the request body; the patch itself only holds
/// the optional fields.
#[instrument(skip(repo, patch), fields(kind = E::NAME))]
pub async fn partial_update<R, E>(
    repo: &R,
    path_id: i64,
    body_id: Option<i64>,
    patch: E::Patch,
) -> Result<E, DataError>
where
    R: Read<E, i64> + Save<E>,
    E: Entity + Merge,
{
    let id = check_identity(path_id, body_id)?;

    if !repo.exists_by_id(&id).await? {
        warn!("{} {} not found", E::NAME, id);
        return Err(DataError::NotFound {
            entity: E::NAME,
            id,
        });
    }

    debug!("Request to partially update {} {}", E::NAME, id);
    // la riga può sparire tra il controllo e la lettura
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or(DataError::NotFound {
            entity: E::NAME,
            id,
        })?;

    repo.save(existing.merge(patch)).await
}
