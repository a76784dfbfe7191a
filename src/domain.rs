//! Domain models for the three hosted apps: listings (venues, artists, shows),
//! trivia (categories, questions) and the coffee shop (drinks).

use serde::{Deserialize, Serialize};

/// Row identifier shared by every table.
pub type Id = i64;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Venue {
  pub id: Id,
  pub name: String,
  pub city: String,
  pub state: String,
  pub address: String,
  #[serde(default)] pub phone: Option<String>,
  #[serde(default)] pub genres: Vec<String>,
  #[serde(default)] pub image_link: Option<String>,
  #[serde(default)] pub facebook_link: Option<String>,
  #[serde(default)] pub website: Option<String>,
  #[serde(default)] pub seeking_talent: bool,
  #[serde(default)] pub seeking_description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Artist {
  pub id: Id,
  pub name: String,
  pub city: String,
  pub state: String,
  #[serde(default)] pub phone: Option<String>,
  #[serde(default)] pub genres: Vec<String>,
  #[serde(default)] pub image_link: Option<String>,
  #[serde(default)] pub facebook_link: Option<String>,
  #[serde(default)] pub website: Option<String>,
  #[serde(default)] pub seeking_venue: bool,
  #[serde(default)] pub seeking_description: Option<String>,
}

/// Stored show row. `start_time` keeps the text as it was accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Show {
  pub id: Id,
  pub artist_id: Id,
  pub venue_id: Id,
  pub start_time: String,
}

/// A show joined with its artist and venue, as listed on detail pages.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShowRecord {
  pub start_time: String,
  pub artist_id: Id,
  pub artist_name: String,
  #[serde(default)] pub artist_image_link: Option<String>,
  pub venue_id: Id,
  pub venue_name: String,
  #[serde(default)] pub venue_image_link: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
  pub id: Id,
  #[serde(rename = "type")]
  pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
  pub id: Id,
  #[serde(rename = "question")]
  pub text: String,
  pub answer: String,
  pub category: Id,
  pub difficulty: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
  pub name: String,
  pub color: String,
  pub parts: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Drink {
  pub id: Id,
  pub title: String,
  pub recipe: Vec<Ingredient>,
}
