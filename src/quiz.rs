//! Quiz turn selection.
//!
//! Each turn the client sends the ids it has already been served; we pick one
//! of the remaining questions uniformly at random. The random source is passed
//! in so a seeded rng reproduces the same sequence.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::domain::{Id, QuizQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuizError {
  #[error("no questions available for this quiz category")]
  EmptyCandidatePool,
}

/// Outcome of a quiz turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick<'a> {
  Question(&'a QuizQuestion),
  /// Every candidate has been asked; the quiz is over.
  Exhausted,
}

/// Which questions a quiz draws from. Category id 0 on the wire means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
  Any,
  Only(Id),
}

impl CategoryFilter {
  pub fn from_wire(category_id: Id) -> Self {
    if category_id == 0 { CategoryFilter::Any } else { CategoryFilter::Only(category_id) }
  }

  pub fn matches(&self, q: &QuizQuestion) -> bool {
    match self {
      CategoryFilter::Any => true,
      CategoryFilter::Only(id) => q.category == *id,
    }
  }
}

/// Pick one not-yet-asked question uniformly among the unasked remainder.
pub fn pick<'a, R>(
  candidates: &'a [QuizQuestion],
  previously_asked: &HashSet<Id>,
  rng: &mut R,
) -> Result<Pick<'a>, QuizError>
where
  R: Rng + ?Sized,
{
  if candidates.is_empty() {
    return Err(QuizError::EmptyCandidatePool);
  }

  let unasked: Vec<&QuizQuestion> = candidates
    .iter()
    .filter(|q| !previously_asked.contains(&q.id))
    .collect();

  Ok(match unasked.choose(rng) {
    Some(q) => Pick::Question(*q),
    None => Pick::Exhausted,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashMap;

  fn question(id: Id) -> QuizQuestion {
    QuizQuestion {
      id,
      text: format!("question {id}"),
      answer: format!("answer {id}"),
      category: 1 + id % 3,
      difficulty: 1 + (id % 5) as i32,
    }
  }

  fn pool(ids: &[Id]) -> Vec<QuizQuestion> {
    ids.iter().copied().map(question).collect()
  }

  fn picked_id(p: Pick<'_>) -> Option<Id> {
    match p {
      Pick::Question(q) => Some(q.id),
      Pick::Exhausted => None,
    }
  }

  #[test]
  fn only_unasked_candidate_is_always_chosen() {
    let candidates = pool(&[1, 2, 3]);
    let asked: HashSet<Id> = [1, 2].into_iter().collect();
    for seed in 0..64 {
      let mut rng = StdRng::seed_from_u64(seed);
      let p = pick(&candidates, &asked, &mut rng).unwrap();
      assert_eq!(picked_id(p), Some(3), "seed {seed}");
    }
  }

  #[test]
  fn fully_asked_pool_is_exhausted() {
    let candidates = pool(&[1]);
    let asked: HashSet<Id> = [1].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(pick(&candidates, &asked, &mut rng), Ok(Pick::Exhausted));
  }

  #[test]
  fn empty_pool_is_an_error_not_exhaustion() {
    let mut rng = StdRng::seed_from_u64(7);
    let asked: HashSet<Id> = [1, 2].into_iter().collect();
    assert_eq!(pick(&[], &asked, &mut rng), Err(QuizError::EmptyCandidatePool));
  }

  #[test]
  fn unknown_previous_ids_are_ignored() {
    let candidates = pool(&[5]);
    let asked: HashSet<Id> = [99, 100].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(picked_id(pick(&candidates, &asked, &mut rng).unwrap()), Some(5));
  }

  #[test]
  fn seed_42_picks_question_3() {
    // Pinned against rand 0.8's StdRng stream; a change here means the
    // selection order changed.
    let candidates = pool(&[1, 2, 3, 4]);
    let mut rng = StdRng::seed_from_u64(42);
    let p = pick(&candidates, &HashSet::new(), &mut rng).unwrap();
    assert_eq!(picked_id(p), Some(3));
  }

  #[test]
  fn feeding_picks_back_visits_every_question_once() {
    let mut meta = StdRng::seed_from_u64(0xC0FFEE);
    for seed in 0..200u64 {
      let size = meta.gen_range(1..=30usize);
      let ids: Vec<Id> = (0..size as Id).map(|i| 10 + i * 7).collect();
      let candidates = pool(&ids);
      let mut rng = StdRng::seed_from_u64(seed);
      let mut asked = HashSet::new();
      let mut calls = 0;

      loop {
        match pick(&candidates, &asked, &mut rng).unwrap() {
          Pick::Question(q) => {
            assert!(asked.insert(q.id), "seed {seed}: {} served twice", q.id);
            calls += 1;
          }
          Pick::Exhausted => break,
        }
        assert!(calls <= size, "seed {seed}: more turns than questions");
      }

      assert_eq!(calls, size);
      assert_eq!(asked, ids.iter().copied().collect::<HashSet<_>>());
    }
  }

  #[test]
  fn draws_are_spread_over_the_unasked_remainder() {
    let candidates = pool(&[1, 2, 3, 4, 5]);
    let asked: HashSet<Id> = [2, 4].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut seen: HashMap<Id, usize> = HashMap::new();
    for _ in 0..3000 {
      let id = picked_id(pick(&candidates, &asked, &mut rng).unwrap()).unwrap();
      *seen.entry(id).or_default() += 1;
    }
    assert_eq!(seen.len(), 3);
    for id in [1, 3, 5] {
      let n = seen[&id];
      assert!((800..=1200).contains(&n), "id {id} drawn {n} times");
    }
  }

  #[test]
  fn category_zero_means_every_category() {
    let q = question(4);
    assert!(CategoryFilter::from_wire(0).matches(&q));
    assert!(CategoryFilter::from_wire(q.category).matches(&q));
    assert!(!CategoryFilter::from_wire(q.category + 1).matches(&q));
  }
}
