//! Public request/response structs for the HTTP endpoints (serde ready).
//! Field names follow what the existing frontends already send and expect.

use serde::{Deserialize, Serialize};

use crate::domain::{Artist, Category, Drink, Id, Ingredient, QuizQuestion, ShowRecord, Venue};
use crate::shows::ShowPartition;

//
// Listings
//

/// Venue or artist line in listings and search results.
#[derive(Debug, Serialize, PartialEq)]
pub struct ListingSummary {
    pub id: Id,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city and state.
#[derive(Debug, Serialize, PartialEq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArtistRef {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchIn {
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchOut {
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowPartition<ShowRecord>,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowPartition<ShowRecord>,
}

#[derive(Debug, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShowForm {
    pub artist_id: Id,
    pub venue_id: Id,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedOut {
    pub success: bool,
    pub deleted: Id,
}

//
// Trivia
//

#[derive(Debug, Serialize)]
pub struct CategoriesOut {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsPageOut {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
    pub current_category: Option<Id>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsOut {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
    pub total_questions: usize,
    pub current_category: Option<Id>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionIn {
    pub question: String,
    pub answer: String,
    pub category: Id,
    pub difficulty: i32,
}

#[derive(Debug, Serialize)]
pub struct CreatedOut {
    pub success: bool,
    pub created: Id,
}

#[derive(Debug, Deserialize)]
pub struct QuestionSearchIn {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategoryIn {
    pub id: Id,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    #[serde(default)]
    pub previous_questions: Vec<Id>,
    pub quiz_category: QuizCategoryIn,
}

/// One quiz turn. `question` is absent once the pool is exhausted.
#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuizQuestion>,
    pub exhausted: bool,
}

//
// Drinks
//

/// Recipes arrive either as a single ingredient or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeIn {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeIn {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeIn::Many(v) => v,
            RecipeIn::One(i) => vec![i],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DrinkIn {
    pub title: String,
    pub recipe: RecipeIn,
}

#[derive(Debug, Deserialize)]
pub struct DrinkPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeIn>,
}

/// Public ingredient view: colour and proportion only.
#[derive(Debug, Serialize, PartialEq)]
pub struct IngredientShort {
    pub color: String,
    pub parts: u32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DrinkShort {
    pub id: Id,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

impl From<&Drink> for DrinkShort {
    fn from(d: &Drink) -> Self {
        DrinkShort {
            id: d.id,
            title: d.title.clone(),
            recipe: d
                .recipe
                .iter()
                .map(|i| IngredientShort { color: i.color.clone(), parts: i.parts })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksOut<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DrinkDeletedOut {
    pub success: bool,
    pub delete: Id,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
