//! Venue/artist listing helpers: area grouping, upcoming-show counts, search.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Artist, Id, Show, Venue};
use crate::protocol::{Area, ListingSummary, SearchOut};
use crate::shows::{partition, ShowError};
use crate::util::contains_ci;

/// Upcoming shows per key (venue or artist id).
pub fn upcoming_counts<F>(shows: &[Show], key: F, now: DateTime<Utc>) -> Result<HashMap<Id, usize>, ShowError>
where
  F: Fn(&Show) -> Id,
{
  let split = partition(shows, now)?;
  let mut counts = HashMap::new();
  for show in split.upcoming {
    *counts.entry(key(show)).or_insert(0) += 1;
  }
  Ok(counts)
}

/// Group venues by (city, state). Areas appear in the order their first venue
/// appears; venues keep input order within an area.
pub fn group_by_area(venues: &[Venue], shows: &[Show], now: DateTime<Utc>) -> Result<Vec<Area>, ShowError> {
  let counts = upcoming_counts(shows, |s| s.venue_id, now)?;
  let mut areas: Vec<Area> = Vec::new();
  let mut index: HashMap<(&str, &str), usize> = HashMap::new();

  for venue in venues {
    let summary = ListingSummary {
      id: venue.id,
      name: venue.name.clone(),
      num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
    };
    let key = (venue.city.as_str(), venue.state.as_str());
    match index.get(&key) {
      Some(&i) => areas[i].venues.push(summary),
      None => {
        index.insert(key, areas.len());
        areas.push(Area {
          city: venue.city.clone(),
          state: venue.state.clone(),
          venues: vec![summary],
        });
      }
    }
  }
  Ok(areas)
}

pub fn search_venues(venues: &[Venue], shows: &[Show], term: &str, now: DateTime<Utc>) -> Result<SearchOut, ShowError> {
  let counts = upcoming_counts(shows, |s| s.venue_id, now)?;
  let data: Vec<ListingSummary> = venues
    .iter()
    .filter(|v| contains_ci(&v.name, term))
    .map(|v| ListingSummary {
      id: v.id,
      name: v.name.clone(),
      num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
    })
    .collect();
  Ok(SearchOut { count: data.len(), data })
}

pub fn search_artists(artists: &[Artist], shows: &[Show], term: &str, now: DateTime<Utc>) -> Result<SearchOut, ShowError> {
  let counts = upcoming_counts(shows, |s| s.artist_id, now)?;
  let data: Vec<ListingSummary> = artists
    .iter()
    .filter(|a| contains_ci(&a.name, term))
    .map(|a| ListingSummary {
      id: a.id,
      name: a.name.clone(),
      num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
    })
    .collect();
  Ok(SearchOut { count: data.len(), data })
}
