//! Singer services - Gestione cantanti

use crate::core::{AppError, AppState, JsonBody};
use crate::dtos::{PageQuery, SingerDTO};
use crate::entities::{Entity, Singer};
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

#[instrument(skip(state, body))]
pub async fn create_singer(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SingerDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("REST request to save Singer");
    body.validate()?;

    let singer = updates::create(&state.singer, Singer::try_from(body)?).await?;
    let id = singer.id().unwrap_or_default();
    info!("Singer created with id {}", id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/singers/{id}"))],
        Json(SingerDTO::from(singer)),
    ))
}

#[instrument(skip(state, body), fields(singer_id = %id))]
pub async fn update_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<SingerDTO>,
) -> Result<Json<SingerDTO>, AppError> {
    debug!("REST request to update Singer");
    body.validate()?;

    let singer = updates::replace(&state.singer, id, Singer::try_from(body)?).await?;
    Ok(Json(SingerDTO::from(singer)))
}

#[instrument(skip(state, body), fields(singer_id = %id))]
pub async fn partial_update_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<SingerDTO>,
) -> Result<Json<SingerDTO>, AppError> {
    debug!("REST request to partially update Singer");
    body.validate()?;

    let (body_id, patch) = body.into_patch();
    let singer = updates::partial_update::<_, Singer>(&state.singer, id, body_id, patch).await?;
    Ok(Json(SingerDTO::from(singer)))
}

#[instrument(skip(state))]
pub async fn list_singers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    debug!("REST request to get a page of Singers");
    let page = params.to_page_spec(state.paging)?;

    let (total, singers) = future::try_join(
        state.singer.count_all(),
        state.singer.find_all_paged(&page),
    )
    .await?;
    info!("Returning {} of {} singers", singers.len(), total);

    let body = singers.into_iter().map(SingerDTO::from).collect::<Vec<_>>();
    Ok(([("x-total-count", total.to_string())], Json(body)))
}

#[instrument(skip(state), fields(singer_id = %id))]
pub async fn get_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SingerDTO>, AppError> {
    debug!("REST request to get Singer");
    match state.singer.find_by_id(&id).await? {
        Some(singer) => Ok(Json(SingerDTO::from(singer))),
        None => {
            warn!("Singer not found");
            Err(AppError::not_found("Singer not found"))
        }
    }
}

#[instrument(skip(state), fields(singer_id = %id))]
pub async fn delete_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("REST request to delete Singer");
    if state.singer.delete(&id).await? == 0 {
        warn!("No singer deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
