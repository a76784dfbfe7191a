//! Stagehand · starter backends in one service
//!
//! - Listings API: venues grouped by area, artist/venue pages with past and
//!   upcoming shows, show creation
//! - Trivia API: categories, paginated questions, search, quiz play
//! - Coffee-shop API: drinks in short and detailed form
//! - Static SPA fallback (STATIC_DIR/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   STATIC_DIR    : frontend bundle directory (default "./static")
//!   CATALOG_PATH  : path to TOML catalog preloading the tables
//!   LOG_LEVEL     : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT    : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod seeds;
mod shows;
mod quiz;
mod listings;
mod state;
mod protocol;
mod logic;
mod routes;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = ServerConfig::from_env();

  // Shared tables, filled from CATALOG_PATH and/or the built-in seeds.
  let state = Arc::new(AppState::new());

  let app = build_router(state, &cfg.static_dir);

  let listener = TcpListener::bind(cfg.addr).await?;
  info!(target: "stagehand_backend", addr = %cfg.addr, static_dir = %cfg.static_dir, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "stagehand_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "stagehand_backend", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "stagehand_backend", "Shutdown signal received");
}
