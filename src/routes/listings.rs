//! Venue, artist and show endpoints. Thin wrappers over `logic`; the
//! wall clock is read here and nowhere deeper.

use std::sync::Arc;

use axum::{
  extract::{rejection::{JsonRejection, PathRejection}, Path, State},
  http::StatusCode,
  Json,
};
use chrono::Utc;
use tracing::instrument;

use crate::domain::{Artist, Id, Show, ShowRecord, Venue};
use crate::error::ApiResult;
use crate::logic;
use crate::protocol::*;
use crate::state::{AppState, ShowFilter};

#[instrument(level = "info", skip(state))]
pub async fn http_get_venues(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Area>>> {
  Ok(Json(logic::venue_areas(&state, Utc::now()).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_search_venues(
  State(state): State<Arc<AppState>>,
  body: Result<Json<SearchIn>, JsonRejection>,
) -> ApiResult<Json<SearchOut>> {
  let Json(body) = body?;
  Ok(Json(logic::search_venues(&state, &body.search_term, Utc::now()).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_venue(State(state): State<Arc<AppState>>, id: Result<Path<Id>, PathRejection>) -> ApiResult<Json<VenueDetail>> {
  let Path(id) = id?;
  Ok(Json(logic::venue_detail(&state, id, Utc::now()).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_venue(
  State(state): State<Arc<AppState>>,
  body: Result<Json<VenueForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Venue>)> {
  let Json(form) = body?;
  Ok((StatusCode::CREATED, Json(logic::create_venue(&state, form).await?)))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_put_venue(
  State(state): State<Arc<AppState>>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<VenueForm>, JsonRejection>,
) -> ApiResult<Json<Venue>> {
  let Path(id) = id?;
  let Json(form) = body?;
  Ok(Json(logic::update_venue(&state, id, form).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_venue(State(state): State<Arc<AppState>>, id: Result<Path<Id>, PathRejection>) -> ApiResult<Json<DeletedOut>> {
  let Path(id) = id?;
  Ok(Json(logic::delete_venue(&state, id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_artists(State(state): State<Arc<AppState>>) -> Json<Vec<ArtistRef>> {
  Json(logic::list_artists(&state).await)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_search_artists(
  State(state): State<Arc<AppState>>,
  body: Result<Json<SearchIn>, JsonRejection>,
) -> ApiResult<Json<SearchOut>> {
  let Json(body) = body?;
  Ok(Json(logic::search_artists(&state, &body.search_term, Utc::now()).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_artist(State(state): State<Arc<AppState>>, id: Result<Path<Id>, PathRejection>) -> ApiResult<Json<ArtistDetail>> {
  let Path(id) = id?;
  Ok(Json(logic::artist_detail(&state, id, Utc::now()).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_artist(
  State(state): State<Arc<AppState>>,
  body: Result<Json<ArtistForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Artist>)> {
  let Json(form) = body?;
  Ok((StatusCode::CREATED, Json(logic::create_artist(&state, form).await?)))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_put_artist(
  State(state): State<Arc<AppState>>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<ArtistForm>, JsonRejection>,
) -> ApiResult<Json<Artist>> {
  let Path(id) = id?;
  let Json(form) = body?;
  Ok(Json(logic::update_artist(&state, id, form).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_artist(State(state): State<Arc<AppState>>, id: Result<Path<Id>, PathRejection>) -> ApiResult<Json<DeletedOut>> {
  let Path(id) = id?;
  Ok(Json(logic::delete_artist(&state, id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_shows(State(state): State<Arc<AppState>>) -> Json<Vec<ShowRecord>> {
  Json(state.show_records(ShowFilter::All).await)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_show(
  State(state): State<Arc<AppState>>,
  body: Result<Json<ShowForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Show>)> {
  let Json(form) = body?;
  Ok((StatusCode::CREATED, Json(logic::create_show(&state, form).await?)))
}
