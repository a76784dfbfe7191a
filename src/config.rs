//! Service configuration: environment settings and the optional TOML catalog.
//!
//! The catalog preloads the in-memory tables. Expected schema:
//!
//! ```toml
//! include_seeds = false
//!
//! [[venues]]
//! id = 10
//! name = "The Blue Room"
//! city = "Austin"
//! state = "TX"
//! address = "1 Main St"
//!
//! [[shows]]
//! artist_id = 4
//! venue_id = 10
//! start_time = "2031-02-01 20:00:00"
//!
//! [[questions]]
//! question = "Who discovered penicillin?"
//! answer = "Alexander Fleming"
//! category = 1
//! difficulty = 3
//! ```

use std::net::SocketAddr;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Artist, Category, Drink, Id, Venue};

/// Settings read from the environment at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
  pub addr: SocketAddr,
  pub static_dir: String,
}

impl ServerConfig {
  pub fn from_env() -> Self {
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(3000);
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".into());
    Self { addr: SocketAddr::from(([0, 0, 0, 0], port)), static_dir }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogConfig {
  #[serde(default = "default_true")]
  pub include_seeds: bool,
  #[serde(default)] pub venues: Vec<Venue>,
  #[serde(default)] pub artists: Vec<Artist>,
  #[serde(default)] pub shows: Vec<ShowCfg>,
  #[serde(default)] pub categories: Vec<Category>,
  #[serde(default)] pub questions: Vec<QuestionCfg>,
  #[serde(default)] pub drinks: Vec<Drink>,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      include_seeds: true,
      venues: Vec::new(),
      artists: Vec::new(),
      shows: Vec::new(),
      categories: Vec::new(),
      questions: Vec::new(),
      drinks: Vec::new(),
    }
  }
}

fn default_true() -> bool { true }

/// Show entry; `id` is assigned on load when omitted.
#[derive(Clone, Debug, Deserialize)]
pub struct ShowCfg {
  #[serde(default)] pub id: Option<Id>,
  pub artist_id: Id,
  pub venue_id: Id,
  pub start_time: String,
}

/// Question entry; `id` is assigned on load when omitted.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  #[serde(default)] pub id: Option<Id>,
  pub question: String,
  pub answer: String,
  pub category: Id,
  pub difficulty: i32,
}

pub fn parse_catalog(s: &str) -> Result<CatalogConfig, toml::de::Error> {
  toml::from_str::<CatalogConfig>(s)
}

/// Attempt to load the catalog from CATALOG_PATH. On any parsing/IO error, returns None.
pub fn load_catalog_from_env() -> Option<CatalogConfig> {
  let path = std::env::var("CATALOG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_catalog(&s) {
      Ok(cfg) => {
        info!(target: "stagehand_backend", %path, include_seeds = cfg.include_seeds, "Loaded catalog (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "stagehand_backend", %path, error = %e, "Failed to parse TOML catalog");
        None
      }
    },
    Err(e) => {
      error!(target: "stagehand_backend", %path, error = %e, "Failed to read TOML catalog file");
      None
    }
  }
}
