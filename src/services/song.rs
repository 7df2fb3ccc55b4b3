//! Song services - Gestione canzoni

use crate::core::{AppError, AppState, JsonBody};
use crate::dtos::{PageQuery, SongDTO};
use crate::entities::{Entity, Song};
use crate::repositories::{Delete, Read, ReadMany};
use crate::updates;
use axum::{
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use futures::future;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

#[instrument(skip(state, body))]
pub async fn create_song(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SongDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("REST request to save Song");
    body.validate()?;

    let song = updates::create(&state.song, Song::try_from(body)?).await?;
    let id = song.id().unwrap_or_default();
    info!("Song created with id {}", id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/songs/{id}"))],
        Json(SongDTO::from(song)),
    ))
}

#[instrument(skip(state, body), fields(song_id = %id))]
pub async fn update_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<SongDTO>,
) -> Result<Json<SongDTO>, AppError> {
    debug!("REST request to update Song");
    body.validate()?;

    let song = updates::replace(&state.song, id, Song::try_from(body)?).await?;
    Ok(Json(SongDTO::from(song)))
}

#[instrument(skip(state, body), fields(song_id = %id))]
pub async fn partial_update_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<SongDTO>,
) -> Result<Json<SongDTO>, AppError> {
    debug!("REST request to partially update Song");
    body.validate()?;

    let (body_id, patch) = body.into_patch();
    let song = updates::partial_update::<_, Song>(&state.song, id, body_id, patch).await?;
    Ok(Json(SongDTO::from(song)))
}

#[instrument(skip(state))]
pub async fn list_songs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    debug!("REST request to get a page of Songs");
    let page = params.to_page_spec(state.paging)?;

    let (total, songs) = future::try_join(
        state.song.count_all(),
        state.song.find_all_paged(&page),
    )
    .await?;
    info!("Returning {} of {} songs", songs.len(), total);

    let body = songs.into_iter().map(SongDTO::from).collect::<Vec<_>>();
    Ok(([("x-total-count", total.to_string())], Json(body)))
}

#[instrument(skip(state), fields(song_id = %id))]
pub async fn get_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SongDTO>, AppError> {
    debug!("REST request to get Song");
    let song = state
        .song
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Song not found"))?;
    Ok(Json(SongDTO::from(song)))
}

#[instrument(skip(state), fields(song_id = %id))]
pub async fn delete_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("REST request to delete Song");
    let deleted = state.song.delete(&id).await?;
    info!("Deleted {} song rows", deleted);
    Ok(StatusCode::NO_CONTENT)
}
