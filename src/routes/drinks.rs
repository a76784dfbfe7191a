//! Coffee-shop drink endpoints.

use std::sync::Arc;

use axum::{
  extract::{rejection::{JsonRejection, PathRejection}, Path, State},
  Json,
};
use tracing::instrument;

use crate::domain::{Drink, Id};
use crate::error::ApiResult;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_get_drinks(State(state): State<Arc<AppState>>) -> Json<DrinksOut<DrinkShort>> {
  Json(logic::drinks_short(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_drinks_detail(State(state): State<Arc<AppState>>) -> Json<DrinksOut<Drink>> {
  Json(logic::drinks_long(&state).await)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_drink(
  State(state): State<Arc<AppState>>,
  body: Result<Json<DrinkIn>, JsonRejection>,
) -> ApiResult<Json<DrinksOut<Drink>>> {
  let Json(body) = body?;
  Ok(Json(logic::create_drink(&state, body).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_patch_drink(
  State(state): State<Arc<AppState>>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<DrinkPatch>, JsonRejection>,
) -> ApiResult<Json<DrinksOut<Drink>>> {
  let Path(id) = id?;
  let Json(body) = body?;
  Ok(Json(logic::patch_drink(&state, id, body).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_drink(State(state): State<Arc<AppState>>, id: Result<Path<Id>, PathRejection>) -> ApiResult<Json<DrinkDeletedOut>> {
  let Path(id) = id?;
  Ok(Json(logic::delete_drink(&state, id).await?))
}
