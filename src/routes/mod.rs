//! Router assembly: JSON API for the three apps, static frontend, CORS and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::protocol::HealthOut;
use crate::state::AppState;

pub mod drinks;
pub mod listings;
pub mod trivia;

async fn http_health() -> Json<HealthOut> {
    Json(HealthOut { ok: true })
}

/// Build the application router with:
/// - listings, trivia and drinks APIs under `/api/v1/...`
/// - static frontend from `static_dir` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    let api = Router::new()
        .route("/health", get(http_health))
        // Listings
        .route("/venues", get(listings::http_get_venues).post(listings::http_post_venue))
        .route("/venues/search", post(listings::http_search_venues))
        .route(
            "/venues/:id",
            get(listings::http_get_venue)
                .put(listings::http_put_venue)
                .delete(listings::http_delete_venue),
        )
        .route("/artists", get(listings::http_get_artists).post(listings::http_post_artist))
        .route("/artists/search", post(listings::http_search_artists))
        .route(
            "/artists/:id",
            get(listings::http_get_artist)
                .put(listings::http_put_artist)
                .delete(listings::http_delete_artist),
        )
        .route("/shows", get(listings::http_get_shows).post(listings::http_post_show))
        // Trivia
        .route("/categories", get(trivia::http_get_categories))
        .route("/categories/:id/questions", get(trivia::http_get_category_questions))
        .route("/questions", get(trivia::http_get_questions).post(trivia::http_post_question))
        .route("/questions/search", post(trivia::http_search_questions))
        .route("/questions/:id", delete(trivia::http_delete_question))
        .route("/quizzes", post(trivia::http_post_quiz))
        // Drinks
        .route("/drinks", get(drinks::http_get_drinks).post(drinks::http_post_drink))
        .route("/drinks-detail", get(drinks::http_get_drinks_detail))
        .route("/drinks/:id", patch(drinks::http_patch_drink).delete(drinks::http_delete_drink));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
