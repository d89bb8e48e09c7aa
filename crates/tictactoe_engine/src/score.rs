//! Score tally kept across rounds of a session.

use crate::{Mark, Outcome};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Wins per mark and tied rounds.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Default, Hash, Getters, Serialize, Deserialize,
)]
#[display("X {x} | O {o} | Tie {tie}")]
pub struct ScoreTally {
    /// Rounds won by X.
    x: u32,
    /// Rounds won by O.
    o: u32,
    /// Rounds that ended in a tie.
    tie: u32,
}

impl ScoreTally {
    /// Creates an all-zero tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Counts one finished round in exactly one bucket.
    #[instrument]
    pub fn record(&mut self, outcome: Outcome) {
        let bucket = match outcome {
            Outcome::PlayerWon(Mark::X) => &mut self.x,
            Outcome::PlayerWon(Mark::O) => &mut self.o,
            Outcome::Tied => &mut self.tie,
        };
        *bucket = bucket.saturating_add(1);
    }

    /// Total rounds counted since the last reset.
    pub fn rounds(&self) -> u32 {
        self.x + self.o + self.tie
    }

    /// Zeroes all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_touches_one_bucket() {
        let mut score = ScoreTally::new();
        score.record(Outcome::PlayerWon(Mark::O));
        assert_eq!(*score.o(), 1);
        assert_eq!(*score.x(), 0);
        assert_eq!(*score.tie(), 0);

        score.record(Outcome::Tied);
        score.record(Outcome::PlayerWon(Mark::X));
        assert_eq!(score.wins(Mark::X), 1);
        assert_eq!(score.rounds(), 3);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut score = ScoreTally::new();
        score.record(Outcome::Tied);
        score.record(Outcome::PlayerWon(Mark::X));
        score.reset();
        assert_eq!(score, ScoreTally::new());
    }

    #[test]
    fn test_display() {
        let mut score = ScoreTally::new();
        score.record(Outcome::PlayerWon(Mark::X));
        assert_eq!(score.to_string(), "X 1 | O 0 | Tie 0");
    }

    #[test]
    fn test_serializes_as_named_counters() {
        let mut score = ScoreTally::new();
        score.record(Outcome::Tied);
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, r#"{"x":0,"o":0,"tie":1}"#);
    }
}
