//! Album services - Gestione album
//!
//! Le risposte riportano singer e songs risolti: dopo ogni scrittura l'album
//! viene riletto con la join.

use crate::core::{AppError, AppState, DataError, JsonBody};
use crate::dtos::{AlbumDTO, AlbumFilterQuery, PageQuery};
use crate::entities::{Album, Entity};
use crate::repositories::{Delete, Read, ReadMany};
use crate::updates;
use axum::{
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use futures::future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Rilegge l'album appena scritto per avere i riferimenti risolti
async fn reload(state: &AppState, album: Album) -> Result<AlbumDTO, AppError> {
    let Some(id) = album.id() else {
        return Ok(AlbumDTO::from(album));
    };
    let album = state
        .album
        .find_by_id(&id)
        .await?
        .ok_or(DataError::NotFound { entity: "album", id })?;
    Ok(AlbumDTO::from(album))
}

#[instrument(skip(state, body))]
pub async fn create_album(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<AlbumDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("REST request to save Album");
    body.validate()?;

    let album = updates::create(&state.album, Album::try_from(body)?).await?;
    let id = album.id().unwrap_or_default();
    info!("Album created with id {}", id);

    let dto = reload(&state, album).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/albums/{id}"))],
        Json(dto),
    ))
}

#[instrument(skip(state, body), fields(album_id = %id))]
pub async fn update_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<AlbumDTO>,
) -> Result<Json<AlbumDTO>, AppError> {
    debug!("REST request to update Album");
    body.validate()?;

    let album = updates::replace(&state.album, id, Album::try_from(body)?).await?;
    Ok(Json(reload(&state, album).await?))
}

#[instrument(skip(state, body), fields(album_id = %id))]
pub async fn partial_update_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<AlbumDTO>,
) -> Result<Json<AlbumDTO>, AppError> {
    debug!("REST request to partially update Album");
    body.validate()?;

    let (body_id, patch) = body.into_patch();
    let album = updates::partial_update::<_, Album>(&state.album, id, body_id, patch).await?;
    Ok(Json(reload(&state, album).await?))
}

#[instrument(skip(state))]
pub async fn list_albums(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    Query(filter): Query<AlbumFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    debug!("REST request to get a page of Albums");
    let page = params.to_page_spec(state.paging)?;
    let criteria = filter.to_criteria();

    let (total, albums) = future::try_join(
        state.album.count_by(criteria.as_ref()),
        state.album.find_all_by(Some(&page), criteria.as_ref()),
    )
    .await?;
    info!("Returning {} of {} albums", albums.len(), total);

    let body = albums.into_iter().map(AlbumDTO::from).collect::<Vec<_>>();
    Ok(([("x-total-count", total.to_string())], Json(body)))
}

#[instrument(skip(state), fields(album_id = %id))]
pub async fn get_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<AlbumDTO>, AppError> {
    debug!("REST request to get Album");
    match state.album.find_by_id(&id).await? {
        Some(album) => Ok(Json(AlbumDTO::from(album))),
        None => {
            warn!("Album not found");
            Err(AppError::not_found("Album not found"))
        }
    }
}

#[instrument(skip(state), fields(album_id = %id))]
pub async fn delete_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("REST request to delete Album");
    if state.album.delete(&id).await? == 0 {
        warn!("No album deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
