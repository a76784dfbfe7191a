//! Past/upcoming split of show listings.
//!
//! A show is past when its start time is strictly before `now`; a show
//! starting exactly at `now` is upcoming. Both halves keep input order.
//! The caller supplies `now`, so nothing here reads a clock.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Show, ShowRecord};

/// Zone-less layouts accepted for stored start times (read as UTC).
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowError {
  #[error("malformed start_time {value:?} on show #{index}")]
  MalformedTimestamp { index: usize, value: String },
}

/// Anything carrying a raw start time.
pub trait Scheduled {
  fn start_time(&self) -> &str;
}

impl Scheduled for ShowRecord {
  fn start_time(&self) -> &str { &self.start_time }
}

impl Scheduled for Show {
  fn start_time(&self) -> &str { &self.start_time }
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
  fn start_time(&self) -> &str { (**self).start_time() }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowPartition<T> {
  #[serde(rename = "past_shows")]
  pub past: Vec<T>,
  #[serde(rename = "upcoming_shows")]
  pub upcoming: Vec<T>,
  #[serde(rename = "past_shows_count")]
  pub past_count: usize,
  #[serde(rename = "upcoming_shows_count")]
  pub upcoming_count: usize,
}

/// Parse a stored start time. RFC 3339 first, then the zone-less layouts.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
  let s = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  NAIVE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .map(|naive| naive.and_utc())
}

/// Stable partition of `shows` around `now`.
///
/// Stops at the first unparseable start time and reports its position.
pub fn partition<T, I>(shows: I, now: DateTime<Utc>) -> Result<ShowPartition<T>, ShowError>
where
  T: Scheduled,
  I: IntoIterator<Item = T>,
{
  let mut past = Vec::new();
  let mut upcoming = Vec::new();

  for (index, show) in shows.into_iter().enumerate() {
    let start = parse_start_time(show.start_time()).ok_or_else(|| ShowError::MalformedTimestamp {
      index,
      value: show.start_time().to_string(),
    })?;
    if start < now {
      past.push(show);
    } else {
      upcoming.push(show);
    }
  }

  Ok(ShowPartition {
    past_count: past.len(),
    upcoming_count: upcoming.len(),
    past,
    upcoming,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
  }

  fn record(start_time: &str, artist_id: i64) -> ShowRecord {
    ShowRecord {
      start_time: start_time.into(),
      artist_id,
      artist_name: format!("artist {artist_id}"),
      artist_image_link: None,
      venue_id: 1,
      venue_name: "The Musical Hop".into(),
      venue_image_link: None,
    }
  }

  #[test]
  fn splits_around_now_and_counts_add_up() {
    let shows = vec![
      record("2019-05-21T21:30:00.000Z", 1),
      record("2035-04-01 20:00:00", 2),
      record("2024-05-31 23:59:59", 3),
      record("2024-06-01T12:00:01Z", 4),
    ];
    let p = partition(shows.clone(), now()).expect("parseable");
    assert_eq!(p.past_count + p.upcoming_count, shows.len());
    let past_ids: Vec<_> = p.past.iter().map(|s| s.artist_id).collect();
    let upcoming_ids: Vec<_> = p.upcoming.iter().map(|s| s.artist_id).collect();
    assert_eq!(past_ids, vec![1, 3]);
    assert_eq!(upcoming_ids, vec![2, 4]);
  }

  #[test]
  fn start_exactly_at_now_is_upcoming() {
    let p = partition(vec![record("2024-06-01 12:00:00", 1)], now()).unwrap();
    assert_eq!(p.past_count, 0);
    assert_eq!(p.upcoming_count, 1);
  }

  #[test]
  fn past_half_matches_plain_filter() {
    let shows: Vec<ShowRecord> = (0..20)
      .map(|i| {
        let year = if i % 3 == 0 { 2030 } else { 2010 + i };
        record(&format!("{year}-01-01 00:00:00"), i)
      })
      .collect();
    let expected: Vec<ShowRecord> = shows
      .iter()
      .filter(|s| parse_start_time(&s.start_time).unwrap() < now())
      .cloned()
      .collect();
    let p = partition(shows, now()).unwrap();
    assert_eq!(p.past, expected);
  }

  #[test]
  fn offsets_are_normalised_to_utc() {
    // 13:30 at +02:00 is 11:30 UTC, half an hour before now.
    let p = partition(vec![record("2024-06-01T13:30:00+02:00", 1)], now()).unwrap();
    assert_eq!(p.past_count, 1);
  }

  #[test]
  fn malformed_start_time_reports_its_position() {
    let shows = vec![record("2019-05-21 21:30:00", 1), record("next friday", 2)];
    let err = partition(shows, now()).unwrap_err();
    assert_eq!(
      err,
      ShowError::MalformedTimestamp { index: 1, value: "next friday".into() }
    );
  }

  #[test]
  fn empty_input_is_an_empty_partition() {
    let p = partition(Vec::<ShowRecord>::new(), now()).unwrap();
    assert!(p.past.is_empty() && p.upcoming.is_empty());
    assert_eq!((p.past_count, p.upcoming_count), (0, 0));
  }

  #[test]
  fn partitions_borrowed_rows() {
    let rows = vec![
      Show { id: 1, artist_id: 1, venue_id: 1, start_time: "2019-05-21 21:30:00".into() },
      Show { id: 2, artist_id: 1, venue_id: 1, start_time: "2035-04-01 20:00:00".into() },
    ];
    let p = partition(&rows, now()).unwrap();
    assert_eq!(p.upcoming_count, 1);
    assert_eq!(p.upcoming[0].id, 2);
  }
}
