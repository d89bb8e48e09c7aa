//! Computer opponent: a one-ply, fixed-priority move heuristic.
//!
//! Rules are tried in order and the first that applies wins:
//!
//! 1. [`Rule::WinNow`]: complete a pattern holding two of our marks.
//! 2. [`Rule::Block`]: fill the gap in a pattern holding two opponent marks.
//! 3. [`Rule::Center`]: take the center.
//! 4. [`Rule::Random`]: any empty square, uniformly.
//!
//! Forks are not detected, so a human can still beat it with a double
//! threat.

use crate::rules::WIN_PATTERNS;
use crate::{Board, Mark, Position};
use derive_more::Display;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Which heuristic rule produced a move.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Completes one of our own patterns.
    #[display("win")]
    WinNow,
    /// Stops the opponent completing a pattern.
    #[display("block")]
    Block,
    /// Takes the free center square.
    #[display("center")]
    Center,
    /// Uniform pick among empty squares.
    #[display("random")]
    Random,
}

/// A proposed move and the rule behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    /// Square to play.
    pub position: Position,
    /// Rule that chose it.
    pub rule: Rule,
}

/// Returns the empty square of the first pattern holding exactly two `mark`s
/// and one empty square, scanning patterns in declaration order.
#[instrument(skip(board))]
pub fn find_completion(board: &Board, mark: Mark) -> Option<Position> {
    WIN_PATTERNS.iter().find_map(|pattern| {
        let owned = pattern.iter().filter(|p| board.get(**p).holds(mark)).count();
        let mut empty = pattern.iter().copied().filter(|p| board.is_empty(*p));
        match (owned, empty.next(), empty.next()) {
            (2, Some(gap), None) => Some(gap),
            _ => None,
        }
    })
}

/// Runs the rule ladder and reports which rule fired.
///
/// Returns `None` only on a full board.
#[instrument(skip(board, rng))]
pub fn suggest<R: Rng + ?Sized>(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<Suggestion> {
    let pick = |position, rule| Some(Suggestion { position, rule });

    if let Some(position) = find_completion(board, computer) {
        return pick(position, Rule::WinNow);
    }
    if let Some(position) = find_completion(board, opponent) {
        return pick(position, Rule::Block);
    }
    if board.is_empty(Position::Center) {
        return pick(Position::Center, Rule::Center);
    }
    let empty = board.empty_positions();
    let position = *empty.choose(rng)?;
    pick(position, Rule::Random)
}

/// Picks the computer's next square.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<Position> {
    suggest(board, computer, opponent, rng).map(|s| s.position)
}

/// Source of computer moves.
pub trait Advisor: Send {
    /// Picks a square for `computer` to play, or `None` when the board is full.
    fn choose_move(&mut self, board: &Board, computer: Mark, opponent: Mark) -> Option<Position>;
}

/// The fixed-priority heuristic, owning the RNG used for its random fallback.
#[derive(Debug, Clone)]
pub struct HeuristicAdvisor<R = StdRng> {
    rng: R,
}

impl<R: Rng> HeuristicAdvisor<R> {
    /// Wraps the given RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl HeuristicAdvisor<StdRng> {
    /// Deterministic advisor for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Advisor seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Default for HeuristicAdvisor<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng + Send> Advisor for HeuristicAdvisor<R> {
    fn choose_move(&mut self, board: &Board, computer: Mark, opponent: Mark) -> Option<Position> {
        let suggestion = suggest(board, computer, opponent, &mut self.rng)?;
        debug!(
            position = suggestion.position.to_index(),
            rule = %suggestion.rule,
            "Advisor chose move"
        );
        Some(suggestion.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_win_now() {
        let b = board("OO- X-- ---");
        let s = suggest(&b, Mark::O, Mark::X, &mut rng()).unwrap();
        assert_eq!(s.position, Position::TopRight);
        assert_eq!(s.rule, Rule::WinNow);
    }

    #[test]
    fn test_block() {
        let b = board("XX- -O- ---");
        let s = suggest(&b, Mark::O, Mark::X, &mut rng()).unwrap();
        assert_eq!(s.position, Position::TopRight);
        assert_eq!(s.rule, Rule::Block);
    }

    #[test]
    fn test_win_beats_block() {
        // X O O / X O - / - - -: X threatens 6, O can finish column 1 at 7.
        let b = board("XOO XO- ---");
        let s = suggest(&b, Mark::O, Mark::X, &mut rng()).unwrap();
        assert_eq!(s.rule, Rule::WinNow);
        assert_eq!(s.position, Position::BottomCenter);
    }

    #[test]
    fn test_gap_in_middle_of_pattern() {
        let b = board("O-O -X- X--");
        assert_eq!(find_completion(&b, Mark::O), Some(Position::TopCenter));
    }

    #[test]
    fn test_first_pattern_in_declaration_order_wins() {
        // O can finish row 1 (index 5) or the main diagonal (index 8).
        let b = board("O-- OO- XX-");
        assert_eq!(find_completion(&b, Mark::O), Some(Position::MiddleRight));
    }

    #[test]
    fn test_blocked_pattern_is_not_a_threat() {
        let b = board("XXO --- ---");
        assert_eq!(find_completion(&b, Mark::X), None);
    }

    #[test]
    fn test_center_on_empty_board() {
        let s = suggest(&Board::new(), Mark::O, Mark::X, &mut rng()).unwrap();
        assert_eq!(s, Suggestion { position: Position::Center, rule: Rule::Center });
    }

    #[test]
    fn test_full_board_has_no_move() {
        let b = board("XOX OXX OXO");
        assert_eq!(choose_move(&b, Mark::O, Mark::X, &mut rng()), None);
    }

    #[test]
    fn test_random_fallback_stays_on_empty_squares_and_spreads() {
        // X . . / . O . / . . X : no two-in-a-row for either side, center taken.
        let b = board("X-- -O- --X");
        let empty = b.empty_positions();
        assert_eq!(empty.len(), 6);

        let mut rng = rng();
        let mut counts: HashMap<Position, u32> = HashMap::new();
        let trials = 6_000;
        for _ in 0..trials {
            let s = suggest(&b, Mark::O, Mark::X, &mut rng).unwrap();
            assert_eq!(s.rule, Rule::Random);
            assert!(empty.contains(&s.position));
            *counts.entry(s.position).or_default() += 1;
        }

        assert_eq!(counts.len(), empty.len());
        let expected = trials / empty.len() as u32;
        for (pos, count) in counts {
            assert!(
                count.abs_diff(expected) < expected / 5,
                "{pos} picked {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_seeded_advisor_is_reproducible() {
        let b = board("X-- -O- --X");
        let mut a = HeuristicAdvisor::seeded(42);
        let mut c = HeuristicAdvisor::seeded(42);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&b, Mark::O, Mark::X),
                c.choose_move(&b, Mark::O, Mark::X)
            );
        }
    }
}
