//! Application state: the in-memory tables shared by every handler.
//!
//! One `Arc<RwLock<BTreeMap<Id, _>>>` per table, iterated in id order. New
//! rows get `max(id) + 1`. When more than one listings table is locked, locks
//! are taken in the order venues → artists → shows.
//!
//! Tables are filled from the TOML catalog (if any) and the built-in seeds.
//! Seeds never overwrite catalog ids.

use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::config::{load_catalog_from_env, CatalogConfig};
use crate::domain::{Artist, Category, Drink, Id, Ingredient, QuizQuestion, Show, ShowRecord, Venue};
use crate::error::{ApiError, ApiResult};
use crate::quiz::CategoryFilter;
use crate::seeds::{seed_artists, seed_categories, seed_drinks, seed_questions, seed_shows, seed_venues};
use crate::shows::parse_start_time;
use crate::util::{contains_ci, eq_ci};

type Table<T> = Arc<RwLock<BTreeMap<Id, T>>>;

/// Which shows to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFilter {
    All,
    Venue(Id),
    Artist(Id),
}

#[derive(Clone, Default)]
pub struct AppState {
    pub venues: Table<Venue>,
    pub artists: Table<Artist>,
    pub shows: Table<Show>,
    pub categories: Table<Category>,
    pub questions: Table<QuizQuestion>,
    pub drinks: Table<Drink>,
}

fn next_id<T>(map: &BTreeMap<Id, T>) -> Id {
    map.keys().next_back().map_or(1, |k| k + 1)
}

fn table<T>(map: BTreeMap<Id, T>) -> Table<T> {
    Arc::new(RwLock::new(map))
}

impl AppState {
    /// Build state from env: load the catalog (if configured) plus seeds.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_catalog(load_catalog_from_env().unwrap_or_default())
    }

    /// Built-in seeds only.
    pub fn seeded() -> Self {
        Self::from_catalog(CatalogConfig::default())
    }

    pub fn from_catalog(cfg: CatalogConfig) -> Self {
        let seeds = cfg.include_seeds;

        let mut venues: BTreeMap<Id, Venue> = cfg.venues.into_iter().map(|v| (v.id, v)).collect();
        let mut artists: BTreeMap<Id, Artist> = cfg.artists.into_iter().map(|a| (a.id, a)).collect();
        let mut categories: BTreeMap<Id, Category> =
            cfg.categories.into_iter().map(|c| (c.id, c)).collect();
        let mut drinks: BTreeMap<Id, Drink> = cfg.drinks.into_iter().map(|d| (d.id, d)).collect();
        if seeds {
            for v in seed_venues() {
                venues.entry(v.id).or_insert(v);
            }
            for a in seed_artists() {
                artists.entry(a.id).or_insert(a);
            }
            for c in seed_categories() {
                categories.entry(c.id).or_insert(c);
            }
            for d in seed_drinks() {
                drinks.entry(d.id).or_insert(d);
            }
        }

        // Explicit ids first, then seeds, then id-less entries take fresh ids.
        let mut shows = BTreeMap::<Id, Show>::new();
        let (fixed, floating): (Vec<_>, Vec<_>) = cfg.shows.into_iter().partition(|s| s.id.is_some());
        let load_show = |shows: &mut BTreeMap<Id, Show>, id: Option<Id>, artist_id: Id, venue_id: Id, start_time: String| {
            if parse_start_time(&start_time).is_none() {
                error!(target: "listings", ?id, %start_time, "Skipping catalog show: unparseable start_time");
                return;
            }
            if !artists.contains_key(&artist_id) || !venues.contains_key(&venue_id) {
                error!(target: "listings", ?id, artist_id, venue_id, "Skipping catalog show: unknown artist or venue");
                return;
            }
            let id = id.unwrap_or_else(|| next_id(shows));
            shows.insert(id, Show { id, artist_id, venue_id, start_time });
        };
        for s in fixed {
            load_show(&mut shows, s.id, s.artist_id, s.venue_id, s.start_time);
        }
        if seeds {
            for s in seed_shows() {
                if !shows.contains_key(&s.id) {
                    load_show(&mut shows, Some(s.id), s.artist_id, s.venue_id, s.start_time);
                }
            }
        }
        for s in floating {
            load_show(&mut shows, None, s.artist_id, s.venue_id, s.start_time);
        }

        let mut questions = BTreeMap::<Id, QuizQuestion>::new();
        let (fixed, floating): (Vec<_>, Vec<_>) = cfg.questions.into_iter().partition(|q| q.id.is_some());
        let load_question = |questions: &mut BTreeMap<Id, QuizQuestion>, id: Option<Id>, text: String, answer: String, category: Id, difficulty: i32| {
            if !categories.contains_key(&category) {
                error!(target: "trivia", ?id, category, "Skipping catalog question: unknown category");
                return;
            }
            let id = id.unwrap_or_else(|| next_id(questions));
            questions.insert(id, QuizQuestion { id, text, answer, category, difficulty });
        };
        for q in fixed {
            load_question(&mut questions, q.id, q.question, q.answer, q.category, q.difficulty);
        }
        if seeds {
            for q in seed_questions() {
                if !questions.contains_key(&q.id) {
                    load_question(&mut questions, Some(q.id), q.text, q.answer, q.category, q.difficulty);
                }
            }
        }
        for q in floating {
            load_question(&mut questions, None, q.question, q.answer, q.category, q.difficulty);
        }

        info!(
            target: "stagehand_backend",
            venues = venues.len(),
            artists = artists.len(),
            shows = shows.len(),
            categories = categories.len(),
            questions = questions.len(),
            drinks = drinks.len(),
            include_seeds = seeds,
            "Startup inventory"
        );

        Self {
            venues: table(venues),
            artists: table(artists),
            shows: table(shows),
            categories: table(categories),
            questions: table(questions),
            drinks: table(drinks),
        }
    }

    // ---- venues ----

    pub async fn list_venues(&self) -> Vec<Venue> {
        self.venues.read().await.values().cloned().collect()
    }

    pub async fn get_venue(&self, id: Id) -> Option<Venue> {
        self.venues.read().await.get(&id).cloned()
    }

    /// Insert with a fresh id (the incoming id is ignored).
    #[instrument(level = "debug", skip(self, v), fields(name = %v.name))]
    pub async fn insert_venue(&self, mut v: Venue) -> Venue {
        let mut venues = self.venues.write().await;
        v.id = next_id(&venues);
        venues.insert(v.id, v.clone());
        v
    }

    pub async fn replace_venue(&self, id: Id, mut v: Venue) -> Option<Venue> {
        let mut venues = self.venues.write().await;
        let slot = venues.get_mut(&id)?;
        v.id = id;
        *slot = v.clone();
        Some(v)
    }

    /// Remove a venue together with its shows.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_venue(&self, id: Id) -> bool {
        let mut venues = self.venues.write().await;
        let mut shows = self.shows.write().await;
        if venues.remove(&id).is_none() {
            return false;
        }
        shows.retain(|_, s| s.venue_id != id);
        true
    }

    // ---- artists ----

    pub async fn list_artists(&self) -> Vec<Artist> {
        self.artists.read().await.values().cloned().collect()
    }

    pub async fn get_artist(&self, id: Id) -> Option<Artist> {
        self.artists.read().await.get(&id).cloned()
    }

    #[instrument(level = "debug", skip(self, a), fields(name = %a.name))]
    pub async fn insert_artist(&self, mut a: Artist) -> Artist {
        let mut artists = self.artists.write().await;
        a.id = next_id(&artists);
        artists.insert(a.id, a.clone());
        a
    }

    pub async fn replace_artist(&self, id: Id, mut a: Artist) -> Option<Artist> {
        let mut artists = self.artists.write().await;
        let slot = artists.get_mut(&id)?;
        a.id = id;
        *slot = a.clone();
        Some(a)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete_artist(&self, id: Id) -> bool {
        let mut artists = self.artists.write().await;
        let mut shows = self.shows.write().await;
        if artists.remove(&id).is_none() {
            return false;
        }
        shows.retain(|_, s| s.artist_id != id);
        true
    }

    // ---- shows ----

    pub async fn list_shows(&self) -> Vec<Show> {
        self.shows.read().await.values().cloned().collect()
    }

    /// Insert a show whose start time has already been validated. Fails when
    /// the artist or venue does not exist.
    #[instrument(level = "debug", skip(self, start_time))]
    pub async fn insert_show(&self, artist_id: Id, venue_id: Id, start_time: String) -> ApiResult<Show> {
        let venues = self.venues.read().await;
        let artists = self.artists.read().await;
        let mut shows = self.shows.write().await;
        if !venues.contains_key(&venue_id) {
            return Err(ApiError::Unprocessable(format!("unknown venue {venue_id}")));
        }
        if !artists.contains_key(&artist_id) {
            return Err(ApiError::Unprocessable(format!("unknown artist {artist_id}")));
        }
        let id = next_id(&shows);
        let show = Show { id, artist_id, venue_id, start_time };
        shows.insert(id, show.clone());
        Ok(show)
    }

    /// Shows joined with artist and venue, in show id order.
    pub async fn show_records(&self, filter: ShowFilter) -> Vec<ShowRecord> {
        let venues = self.venues.read().await;
        let artists = self.artists.read().await;
        let shows = self.shows.read().await;
        shows
            .values()
            .filter(|s| match filter {
                ShowFilter::All => true,
                ShowFilter::Venue(id) => s.venue_id == id,
                ShowFilter::Artist(id) => s.artist_id == id,
            })
            .filter_map(|s| {
                let artist = artists.get(&s.artist_id)?;
                let venue = venues.get(&s.venue_id)?;
                Some(ShowRecord {
                    start_time: s.start_time.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    venue_image_link: venue.image_link.clone(),
                })
            })
            .collect()
    }

    // ---- trivia ----

    pub async fn list_categories(&self) -> Vec<Category> {
        self.categories.read().await.values().cloned().collect()
    }

    pub async fn get_category(&self, id: Id) -> Option<Category> {
        self.categories.read().await.get(&id).cloned()
    }

    pub async fn questions_matching(&self, filter: CategoryFilter) -> Vec<QuizQuestion> {
        self.questions
            .read()
            .await
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect()
    }

    pub async fn search_questions(&self, term: &str) -> Vec<QuizQuestion> {
        self.questions
            .read()
            .await
            .values()
            .filter(|q| contains_ci(&q.text, term))
            .cloned()
            .collect()
    }

    #[instrument(level = "debug", skip(self, text, answer))]
    pub async fn insert_question(&self, text: String, answer: String, category: Id, difficulty: i32) -> ApiResult<QuizQuestion> {
        let categories = self.categories.read().await;
        if !categories.contains_key(&category) {
            return Err(ApiError::Unprocessable(format!("unknown category {category}")));
        }
        let mut questions = self.questions.write().await;
        let id = next_id(&questions);
        let q = QuizQuestion { id, text, answer, category, difficulty };
        questions.insert(id, q.clone());
        Ok(q)
    }

    pub async fn delete_question(&self, id: Id) -> bool {
        self.questions.write().await.remove(&id).is_some()
    }

    // ---- drinks ----

    pub async fn list_drinks(&self) -> Vec<Drink> {
        self.drinks.read().await.values().cloned().collect()
    }

    /// Titles are unique, compared case-insensitively.
    #[instrument(level = "debug", skip(self, recipe))]
    pub async fn insert_drink(&self, title: String, recipe: Vec<Ingredient>) -> ApiResult<Drink> {
        let mut drinks = self.drinks.write().await;
        if drinks.values().any(|d| eq_ci(&d.title, &title)) {
            return Err(ApiError::Unprocessable(format!("drink {title:?} already exists")));
        }
        let id = next_id(&drinks);
        let drink = Drink { id, title, recipe };
        drinks.insert(id, drink.clone());
        Ok(drink)
    }

    #[instrument(level = "debug", skip(self, recipe))]
    pub async fn update_drink(&self, id: Id, title: Option<String>, recipe: Option<Vec<Ingredient>>) -> ApiResult<Drink> {
        let mut drinks = self.drinks.write().await;
        if let Some(t) = &title {
            if drinks.values().any(|d| d.id != id && eq_ci(&d.title, t)) {
                return Err(ApiError::Unprocessable(format!("drink {t:?} already exists")));
            }
        }
        let drink = drinks
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("drink {id}")))?;
        if let Some(t) = title {
            drink.title = t;
        }
        if let Some(r) = recipe {
            drink.recipe = r;
        }
        Ok(drink.clone())
    }

    pub async fn delete_drink(&self, id: Id) -> bool {
        self.drinks.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_catalog;

    #[tokio::test]
    async fn seeded_state_has_every_table() {
        let state = AppState::seeded();
        assert_eq!(state.list_venues().await.len(), 3);
        assert_eq!(state.list_artists().await.len(), 3);
        assert_eq!(state.list_shows().await.len(), 5);
        assert_eq!(state.list_categories().await.len(), 6);
        assert!(!state.questions_matching(CategoryFilter::Any).await.is_empty());
        assert_eq!(state.list_drinks().await.len(), 1);
    }

    #[tokio::test]
    async fn catalog_wins_over_seeds_and_bad_rows_are_skipped() {
        let cfg = parse_catalog(
            r#"
            [[venues]]
            id = 1
            name = "Catalog Hall"
            city = "Austin"
            state = "TX"
            address = "1 Main St"

            [[shows]]
            artist_id = 4
            venue_id = 1
            start_time = "2031-02-01 20:00:00"

            [[shows]]
            artist_id = 4
            venue_id = 1
            start_time = "sometime"

            [[shows]]
            artist_id = 404
            venue_id = 1
            start_time = "2031-02-01 20:00:00"

            [[questions]]
            question = "Orphan?"
            answer = "yes"
            category = 99
            difficulty = 1
            "#,
        )
        .unwrap();
        let state = AppState::from_catalog(cfg);

        assert_eq!(state.get_venue(1).await.unwrap().name, "Catalog Hall");
        let shows = state.list_shows().await;
        // Five seeds plus the one valid catalog show, appended after them.
        assert_eq!(shows.len(), 6);
        assert_eq!(shows.last().unwrap().id, 6);
        assert!(state.search_questions("orphan").await.is_empty());
    }

    #[tokio::test]
    async fn catalog_without_seeds_is_used_alone() {
        let cfg = parse_catalog(
            r#"
            include_seeds = false
            [[categories]]
            id = 7
            type = "Music"
            [[questions]]
            question = "How many strings on a violin?"
            answer = "4"
            category = 7
            difficulty = 1
            "#,
        )
        .unwrap();
        let state = AppState::from_catalog(cfg);
        assert!(state.list_venues().await.is_empty());
        let qs = state.questions_matching(CategoryFilter::Any).await;
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].id, 1);
    }

    #[tokio::test]
    async fn deleting_a_venue_cascades_to_its_shows() {
        let state = AppState::seeded();
        assert!(state.delete_venue(3).await);
        assert!(!state.delete_venue(3).await);
        let shows = state.list_shows().await;
        assert_eq!(shows.len(), 1);
        assert!(shows.iter().all(|s| s.venue_id != 3));
    }

    #[tokio::test]
    async fn deleting_an_artist_cascades_to_its_shows() {
        let state = AppState::seeded();
        assert!(state.delete_artist(6).await);
        assert_eq!(state.show_records(ShowFilter::All).await.len(), 2);
    }

    #[tokio::test]
    async fn new_rows_take_max_id_plus_one() {
        let state = AppState::seeded();
        let a = state.get_artist(4).await.unwrap();
        let copy = state.insert_artist(a).await;
        assert_eq!(copy.id, 7);
        let q = state.insert_question("Q".into(), "A".into(), 1, 1).await.unwrap();
        assert_eq!(q.id, 23);
    }

    #[tokio::test]
    async fn show_insert_checks_references() {
        let state = AppState::seeded();
        let err = state.insert_show(4, 99, "2030-01-01 00:00:00".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unprocessable(_)));
        let show = state.insert_show(4, 2, "2030-01-01 00:00:00".into()).await.unwrap();
        let recs = state.show_records(ShowFilter::Venue(2)).await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].artist_name, "Guns N Petals");
        assert_eq!(show.id, 6);
    }

    #[tokio::test]
    async fn drink_titles_stay_unique() {
        let state = AppState::seeded();
        let recipe = vec![Ingredient { name: "milk".into(), color: "white".into(), parts: 1 }];
        assert!(state.insert_drink("Water".into(), recipe.clone()).await.is_err());
        let latte = state.insert_drink("latte".into(), recipe).await.unwrap();
        assert!(state.update_drink(latte.id, Some("water".into()), None).await.is_err());
        let renamed = state.update_drink(latte.id, Some("flat white".into()), None).await.unwrap();
        assert_eq!(renamed.title, "flat white");
        assert!(matches!(
            state.update_drink(99, None, None).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn drink_titles_fold_accented_letters() {
        let state = AppState::seeded();
        let recipe = vec![Ingredient { name: "espresso".into(), color: "brown".into(), parts: 1 }];
        let cafe = state.insert_drink("Café".into(), recipe.clone()).await.unwrap();
        assert!(matches!(
            state.insert_drink("CAFÉ".into(), recipe.clone()).await,
            Err(ApiError::Unprocessable(_))
        ));
        let other = state.insert_drink("ristretto".into(), recipe).await.unwrap();
        assert!(matches!(
            state.update_drink(other.id, Some("café".into()), None).await,
            Err(ApiError::Unprocessable(_))
        ));
        // Renaming a drink to a case variant of its own title is allowed.
        assert!(state.update_drink(cafe.id, Some("CAFÉ".into()), None).await.is_ok());
    }
}
