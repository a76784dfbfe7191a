//! Request behaviors behind the HTTP handlers.
//!
//! Handlers extract and serialize; everything else happens here. The current
//! time and the random source are parameters so tests can pin them.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::domain::{Artist, Drink, Id, Ingredient, QuizQuestion, Venue};
use crate::error::{ApiError, ApiResult};
use crate::listings;
use crate::protocol::*;
use crate::quiz::{self, CategoryFilter, Pick};
use crate::shows::{parse_start_time, partition};
use crate::state::{AppState, ShowFilter};
use crate::util::{non_blank, trunc_for_log};

pub const QUESTIONS_PER_PAGE: usize = 10;

fn required(field: &str, value: &str) -> ApiResult<String> {
  non_blank(value).ok_or_else(|| ApiError::Unprocessable(format!("{field} must not be blank")))
}

fn clean_genres(genres: Vec<String>) -> Vec<String> {
  genres.iter().filter_map(|g| non_blank(g)).collect()
}

// -------- Listings --------

fn venue_from_form(form: VenueForm) -> ApiResult<Venue> {
  Ok(Venue {
    id: 0,
    name: required("name", &form.name)?,
    city: required("city", &form.city)?,
    state: required("state", &form.state)?,
    address: required("address", &form.address)?,
    phone: form.phone,
    genres: clean_genres(form.genres),
    image_link: form.image_link,
    facebook_link: form.facebook_link,
    website: form.website,
    seeking_talent: form.seeking_talent,
    seeking_description: form.seeking_description.filter(|_| form.seeking_talent),
  })
}

fn artist_from_form(form: ArtistForm) -> ApiResult<Artist> {
  Ok(Artist {
    id: 0,
    name: required("name", &form.name)?,
    city: required("city", &form.city)?,
    state: required("state", &form.state)?,
    phone: form.phone,
    genres: clean_genres(form.genres),
    image_link: form.image_link,
    facebook_link: form.facebook_link,
    website: form.website,
    seeking_venue: form.seeking_venue,
    seeking_description: form.seeking_description.filter(|_| form.seeking_venue),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn venue_areas(state: &AppState, now: DateTime<Utc>) -> ApiResult<Vec<Area>> {
  let venues = state.list_venues().await;
  let shows = state.list_shows().await;
  let areas = listings::group_by_area(&venues, &shows, now)?;
  debug!(target: "listings", areas = areas.len(), venues = venues.len(), "Venues grouped by area");
  Ok(areas)
}

#[instrument(level = "info", skip(state, term), fields(term = %trunc_for_log(term, 64)))]
pub async fn search_venues(state: &AppState, term: &str, now: DateTime<Utc>) -> ApiResult<SearchOut> {
  let venues = state.list_venues().await;
  let shows = state.list_shows().await;
  Ok(listings::search_venues(&venues, &shows, term.trim(), now)?)
}

#[instrument(level = "info", skip(state))]
pub async fn venue_detail(state: &AppState, id: Id, now: DateTime<Utc>) -> ApiResult<VenueDetail> {
  let venue = state
    .get_venue(id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("venue {id}")))?;
  let records = state.show_records(ShowFilter::Venue(id)).await;
  let shows = partition(records, now)?;
  Ok(VenueDetail { venue, shows })
}

#[instrument(level = "info", skip(state, form))]
pub async fn create_venue(state: &AppState, form: VenueForm) -> ApiResult<Venue> {
  let venue = state.insert_venue(venue_from_form(form)?).await;
  info!(target: "listings", id = venue.id, name = %venue.name, "Venue listed");
  Ok(venue)
}

#[instrument(level = "info", skip(state, form))]
pub async fn update_venue(state: &AppState, id: Id, form: VenueForm) -> ApiResult<Venue> {
  let venue = venue_from_form(form)?;
  state
    .replace_venue(id, venue)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("venue {id}")))
}

#[instrument(level = "info", skip(state))]
pub async fn delete_venue(state: &AppState, id: Id) -> ApiResult<DeletedOut> {
  if !state.delete_venue(id).await {
    return Err(ApiError::NotFound(format!("venue {id}")));
  }
  info!(target: "listings", id, "Venue deleted");
  Ok(DeletedOut { success: true, deleted: id })
}

pub async fn list_artists(state: &AppState) -> Vec<ArtistRef> {
  state
    .list_artists()
    .await
    .into_iter()
    .map(|a| ArtistRef { id: a.id, name: a.name })
    .collect()
}

#[instrument(level = "info", skip(state, term), fields(term = %trunc_for_log(term, 64)))]
pub async fn search_artists(state: &AppState, term: &str, now: DateTime<Utc>) -> ApiResult<SearchOut> {
  let artists = state.list_artists().await;
  let shows = state.list_shows().await;
  Ok(listings::search_artists(&artists, &shows, term.trim(), now)?)
}

#[instrument(level = "info", skip(state))]
pub async fn artist_detail(state: &AppState, id: Id, now: DateTime<Utc>) -> ApiResult<ArtistDetail> {
  let artist = state
    .get_artist(id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("artist {id}")))?;
  let records = state.show_records(ShowFilter::Artist(id)).await;
  let shows = partition(records, now)?;
  Ok(ArtistDetail { artist, shows })
}

#[instrument(level = "info", skip(state, form))]
pub async fn create_artist(state: &AppState, form: ArtistForm) -> ApiResult<Artist> {
  let artist = state.insert_artist(artist_from_form(form)?).await;
  info!(target: "listings", id = artist.id, name = %artist.name, "Artist listed");
  Ok(artist)
}

#[instrument(level = "info", skip(state, form))]
pub async fn update_artist(state: &AppState, id: Id, form: ArtistForm) -> ApiResult<Artist> {
  let artist = artist_from_form(form)?;
  state
    .replace_artist(id, artist)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("artist {id}")))
}

#[instrument(level = "info", skip(state))]
pub async fn delete_artist(state: &AppState, id: Id) -> ApiResult<DeletedOut> {
  if !state.delete_artist(id).await {
    return Err(ApiError::NotFound(format!("artist {id}")));
  }
  info!(target: "listings", id, "Artist deleted");
  Ok(DeletedOut { success: true, deleted: id })
}

#[instrument(level = "info", skip(state, form), fields(artist_id = form.artist_id, venue_id = form.venue_id))]
pub async fn create_show(state: &AppState, form: ShowForm) -> ApiResult<crate::domain::Show> {
  let start_time = required("start_time", &form.start_time)?;
  if parse_start_time(&start_time).is_none() {
    warn!(target: "listings", %start_time, "Rejected show with unparseable start_time");
    return Err(ApiError::Unprocessable(format!("unparseable start_time {start_time:?}")));
  }
  let show = state.insert_show(form.artist_id, form.venue_id, start_time).await?;
  info!(target: "listings", id = show.id, start_time = %show.start_time, "Show listed");
  Ok(show)
}

// -------- Trivia --------

#[instrument(level = "info", skip(state))]
pub async fn questions_page(state: &AppState, page: usize) -> ApiResult<QuestionsPageOut> {
  let page = page.max(1);
  let all = state.questions_matching(CategoryFilter::Any).await;
  let total = all.len();
  // Page 1 is always served, even when empty; any later page must start inside the table.
  let offset = match (page - 1).checked_mul(QUESTIONS_PER_PAGE) {
    Some(0) => 0,
    Some(offset) if offset < total => offset,
    _ => return Err(ApiError::NotFound(format!("questions page {page}"))),
  };
  let questions: Vec<QuizQuestion> = all.into_iter().skip(offset).take(QUESTIONS_PER_PAGE).collect();
  Ok(QuestionsPageOut {
    success: true,
    questions,
    total_questions: total,
    categories: state.list_categories().await,
    current_category: None,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn questions_in_category(state: &AppState, category_id: Id) -> ApiResult<QuestionsOut> {
  if state.get_category(category_id).await.is_none() {
    return Err(ApiError::NotFound(format!("category {category_id}")));
  }
  let questions = state.questions_matching(CategoryFilter::Only(category_id)).await;
  Ok(QuestionsOut {
    success: true,
    total_questions: questions.len(),
    questions,
    current_category: Some(category_id),
  })
}

#[instrument(level = "info", skip(state, term), fields(term = %trunc_for_log(term, 64)))]
pub async fn search_questions(state: &AppState, term: &str) -> QuestionsOut {
  let questions = state.search_questions(term.trim()).await;
  QuestionsOut {
    success: true,
    total_questions: questions.len(),
    questions,
    current_category: None,
  }
}

#[instrument(level = "info", skip(state, body), fields(category = body.category, difficulty = body.difficulty))]
pub async fn create_question(state: &AppState, body: QuestionIn) -> ApiResult<CreatedOut> {
  let text = required("question", &body.question)?;
  let answer = required("answer", &body.answer)?;
  if !(1..=5).contains(&body.difficulty) {
    return Err(ApiError::Unprocessable(format!("difficulty {} outside 1..=5", body.difficulty)));
  }
  let q = state.insert_question(text, answer, body.category, body.difficulty).await?;
  info!(target: "trivia", id = q.id, category = q.category, "Question added");
  Ok(CreatedOut { success: true, created: q.id })
}

#[instrument(level = "info", skip(state))]
pub async fn delete_question(state: &AppState, id: Id) -> ApiResult<DeletedOut> {
  if !state.delete_question(id).await {
    return Err(ApiError::NotFound(format!("question {id}")));
  }
  info!(target: "trivia", id, "Question deleted");
  Ok(DeletedOut { success: true, deleted: id })
}

/// One quiz turn: draw an unasked question from the requested category.
#[instrument(level = "info", skip(state, body, rng), fields(category = body.quiz_category.id, category_type = %body.quiz_category.kind, asked = body.previous_questions.len()))]
pub async fn play_quiz<R: Rng + ?Sized>(state: &AppState, body: QuizIn, rng: &mut R) -> ApiResult<QuizOut> {
  let filter = CategoryFilter::from_wire(body.quiz_category.id);
  let candidates = state.questions_matching(filter).await;
  let asked: HashSet<Id> = body.previous_questions.into_iter().collect();

  match quiz::pick(&candidates, &asked, rng)? {
    Pick::Question(q) => {
      debug!(target: "trivia", id = q.id, pool = candidates.len(), "Quiz question served");
      Ok(QuizOut { success: true, question: Some(q.clone()), exhausted: false })
    }
    Pick::Exhausted => {
      info!(target: "trivia", pool = candidates.len(), "Quiz exhausted");
      Ok(QuizOut { success: true, question: None, exhausted: true })
    }
  }
}

// -------- Drinks --------

fn checked_recipe(recipe: Vec<Ingredient>) -> ApiResult<Vec<Ingredient>> {
  if recipe.is_empty() {
    return Err(ApiError::Unprocessable("recipe must list at least one ingredient".into()));
  }
  recipe
    .into_iter()
    .map(|i| {
      if i.parts == 0 {
        return Err(ApiError::Unprocessable(format!("ingredient {:?} needs at least one part", i.name)));
      }
      Ok(Ingredient { name: required("ingredient name", &i.name)?, color: required("ingredient color", &i.color)?, parts: i.parts })
    })
    .collect()
}

pub async fn drinks_short(state: &AppState) -> DrinksOut<DrinkShort> {
  let drinks = state.list_drinks().await;
  DrinksOut { success: true, drinks: drinks.iter().map(DrinkShort::from).collect() }
}

pub async fn drinks_long(state: &AppState) -> DrinksOut<Drink> {
  DrinksOut { success: true, drinks: state.list_drinks().await }
}

#[instrument(level = "info", skip(state, body))]
pub async fn create_drink(state: &AppState, body: DrinkIn) -> ApiResult<DrinksOut<Drink>> {
  let title = required("title", &body.title)?;
  let recipe = checked_recipe(body.recipe.into_vec())?;
  let drink = state.insert_drink(title, recipe).await?;
  info!(target: "drinks", id = drink.id, title = %drink.title, "Drink created");
  Ok(DrinksOut { success: true, drinks: vec![drink] })
}

#[instrument(level = "info", skip(state, body))]
pub async fn patch_drink(state: &AppState, id: Id, body: DrinkPatch) -> ApiResult<DrinksOut<Drink>> {
  let title = body.title.map(|t| required("title", &t)).transpose()?;
  let recipe = body.recipe.map(|r| checked_recipe(r.into_vec())).transpose()?;
  let drink = state.update_drink(id, title, recipe).await?;
  info!(target: "drinks", id, "Drink updated");
  Ok(DrinksOut { success: true, drinks: vec![drink] })
}

#[instrument(level = "info", skip(state))]
pub async fn delete_drink(state: &AppState, id: Id) -> ApiResult<DrinkDeletedOut> {
  if !state.delete_drink(id).await {
    return Err(ApiError::NotFound(format!("drink {id}")));
  }
  info!(target: "drinks", id, "Drink deleted");
  Ok(DrinkDeletedOut { success: true, delete: id })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
  }

  fn quiz_body(category: Id, previous: &[Id]) -> QuizIn {
    QuizIn {
      previous_questions: previous.to_vec(),
      quiz_category: QuizCategoryIn { id: category, kind: String::new() },
    }
  }

  #[tokio::test]
  async fn venue_detail_partitions_its_shows() {
    let state = AppState::seeded();
    let d = venue_detail(&state, 3, now()).await.unwrap();
    assert_eq!(d.venue.name, "Park Square Live Music & Coffee");
    assert_eq!((d.shows.past_count, d.shows.upcoming_count), (1, 3));
    assert_eq!(d.shows.past[0].artist_name, "Matt Quevedo");
    let upcoming: Vec<_> = d.shows.upcoming.iter().map(|s| s.start_time.as_str()).collect();
    assert_eq!(
      upcoming,
      vec!["2035-04-01T20:00:00.000Z", "2035-04-08T20:00:00.000Z", "2035-04-15T20:00:00.000Z"]
    );
  }

  #[tokio::test]
  async fn artist_detail_for_unknown_id_is_not_found() {
    let state = AppState::seeded();
    assert!(matches!(artist_detail(&state, 42, now()).await, Err(ApiError::NotFound(_))));
  }

  #[tokio::test]
  async fn show_creation_rejects_bad_start_time() {
    let state = AppState::seeded();
    let form = ShowForm { artist_id: 4, venue_id: 1, start_time: "tomorrow-ish".into() };
    assert!(matches!(create_show(&state, form).await, Err(ApiError::Unprocessable(_))));
    let form = ShowForm { artist_id: 4, venue_id: 1, start_time: "2030-07-04 19:00".into() };
    let show = create_show(&state, form).await.unwrap();
    let d = artist_detail(&state, 4, now()).await.unwrap();
    assert_eq!(d.shows.upcoming_count, 1);
    assert_eq!(d.shows.upcoming[0].start_time, show.start_time);
  }

  #[tokio::test]
  async fn venue_form_requires_name_and_drops_unused_description() {
    let state = AppState::seeded();
    let form = |name: &str| VenueForm {
      name: name.into(),
      city: "Austin".into(),
      state: "TX".into(),
      address: "1 Main St".into(),
      phone: None,
      genres: vec!["Blues".into(), " ".into()],
      image_link: None,
      facebook_link: None,
      website: None,
      seeking_talent: false,
      seeking_description: Some("ignored".into()),
    };
    assert!(create_venue(&state, form("  ")).await.is_err());
    let v = create_venue(&state, form("The Blue Room")).await.unwrap();
    assert_eq!(v.id, 4);
    assert_eq!(v.genres, vec!["Blues".to_string()]);
    assert_eq!(v.seeking_description, None);
    let areas = venue_areas(&state, now()).await.unwrap();
    assert_eq!(areas.last().unwrap().city, "Austin");
  }

  #[tokio::test]
  async fn question_pages_hold_ten_and_overflow_is_not_found() {
    let state = AppState::seeded();
    let first = questions_page(&state, 1).await.unwrap();
    assert_eq!(first.questions.len(), QUESTIONS_PER_PAGE);
    assert_eq!(first.total_questions, 13);
    let second = questions_page(&state, 2).await.unwrap();
    assert_eq!(second.questions.len(), 3);
    assert!(matches!(questions_page(&state, 3).await, Err(ApiError::NotFound(_))));
  }

  #[tokio::test]
  async fn huge_page_numbers_are_not_found() {
    let state = AppState::seeded();
    assert!(matches!(questions_page(&state, usize::MAX).await, Err(ApiError::NotFound(_))));
    assert!(matches!(questions_page(&state, usize::MAX / 2).await, Err(ApiError::NotFound(_))));
  }

  #[tokio::test]
  async fn question_creation_validates_fields() {
    let state = AppState::seeded();
    let body = |difficulty, category| QuestionIn {
      question: "What is H2O?".into(),
      answer: "Water".into(),
      category,
      difficulty,
    };
    assert!(matches!(create_question(&state, body(9, 1)).await, Err(ApiError::Unprocessable(_))));
    assert!(matches!(create_question(&state, body(2, 77)).await, Err(ApiError::Unprocessable(_))));
    let created = create_question(&state, body(2, 1)).await.unwrap();
    let science = questions_in_category(&state, 1).await.unwrap();
    assert!(science.questions.iter().any(|q| q.id == created.created));
  }

  #[tokio::test]
  async fn quiz_walks_a_category_to_exhaustion() {
    let state = AppState::seeded();
    let mut rng = StdRng::seed_from_u64(11);
    let pool: HashSet<Id> = state
      .questions_matching(CategoryFilter::Only(6))
      .await
      .into_iter()
      .map(|q| q.id)
      .collect();

    let mut previous = Vec::new();
    loop {
      let out = play_quiz(&state, quiz_body(6, &previous), &mut rng).await.unwrap();
      match out.question {
        Some(q) => {
          assert_eq!(q.category, 6);
          assert!(!previous.contains(&q.id));
          previous.push(q.id);
        }
        None => {
          assert!(out.exhausted);
          break;
        }
      }
    }
    assert_eq!(previous.iter().copied().collect::<HashSet<_>>(), pool);
  }

  #[tokio::test]
  async fn quiz_on_empty_category_is_not_found() {
    let state = AppState::seeded();
    let mut rng = StdRng::seed_from_u64(3);
    assert!(matches!(
      play_quiz(&state, quiz_body(404, &[]), &mut rng).await,
      Err(ApiError::NotFound(_))
    ));
  }

  #[tokio::test]
  async fn drinks_hide_ingredient_names_in_short_form() {
    let state = AppState::seeded();
    let body = DrinkIn {
      title: "matcha".into(),
      recipe: RecipeIn::One(Ingredient { name: "matcha".into(), color: "green".into(), parts: 1 }),
    };
    create_drink(&state, body).await.unwrap();
    let short = drinks_short(&state).await;
    assert_eq!(short.drinks.len(), 2);
    assert_eq!(short.drinks[1].recipe, vec![IngredientShort { color: "green".into(), parts: 1 }]);

    let empty = DrinkIn { title: "air".into(), recipe: RecipeIn::Many(vec![]) };
    assert!(matches!(create_drink(&state, empty).await, Err(ApiError::Unprocessable(_))));
  }
}
