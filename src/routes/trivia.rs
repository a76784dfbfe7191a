//! Trivia endpoints: categories, paginated questions, search and quiz play.

use std::sync::Arc;

use axum::{
  extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
  http::StatusCode,
  Json,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, instrument};

use crate::domain::Id;
use crate::error::ApiResult;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_get_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesOut> {
  Json(CategoriesOut { success: true, categories: state.list_categories().await })
}

#[instrument(level = "info", skip(state, query))]
pub async fn http_get_questions(
  State(state): State<Arc<AppState>>,
  query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<QuestionsPageOut>> {
  let Query(q) = query?;
  Ok(Json(logic::questions_page(&state, q.page.unwrap_or(1)).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_category_questions(
  State(state): State<Arc<AppState>>,
  id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<QuestionsOut>> {
  let Path(id) = id?;
  Ok(Json(logic::questions_in_category(&state, id).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_question(
  State(state): State<Arc<AppState>>,
  body: Result<Json<QuestionIn>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedOut>)> {
  let Json(body) = body?;
  Ok((StatusCode::CREATED, Json(logic::create_question(&state, body).await?)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_question(State(state): State<Arc<AppState>>, id: Result<Path<Id>, PathRejection>) -> ApiResult<Json<DeletedOut>> {
  let Path(id) = id?;
  Ok(Json(logic::delete_question(&state, id).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_search_questions(
  State(state): State<Arc<AppState>>,
  body: Result<Json<QuestionSearchIn>, JsonRejection>,
) -> ApiResult<Json<QuestionsOut>> {
  let Json(body) = body?;
  Ok(Json(logic::search_questions(&state, &body.search_term).await))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  body: Result<Json<QuizIn>, JsonRejection>,
) -> ApiResult<Json<QuizOut>> {
  let Json(body) = body?;
  let mut rng = StdRng::from_entropy();
  let out = logic::play_quiz(&state, body, &mut rng).await?;
  info!(target: "trivia", exhausted = out.exhausted, id = ?out.question.as_ref().map(|q| q.id), "HTTP quiz turn served");
  Ok(Json(out))
}
