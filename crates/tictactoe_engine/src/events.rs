//! Events exchanged with the presentation layer.

use crate::{Mark, Mode, Outcome, Position, ScoreTally};
use serde::{Deserialize, Serialize};

/// Input sent from the presentation layer to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A human picked a cell (0-8).
    CellSelected(usize),
    /// Clear the board, keep the score.
    NewRoundRequested,
    /// Zero the score and clear the board.
    ResetScoreRequested,
    /// Begin a session in the given mode.
    SessionStarted(Mode),
}

/// Notification sent from the core to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mark was placed.
    CellUpdated {
        /// Cell that changed.
        index: usize,
        /// Mark now on the cell.
        mark: Mark,
    },
    /// It is now `mark`'s turn.
    TurnChanged(Mark),
    /// The computer has been scheduled to move.
    ComputerThinking,
    /// The round is over.
    RoundEnded {
        /// Win or tie.
        outcome: Outcome,
        /// First completed pattern, for highlighting. `None` on a tie.
        pattern: Option<[Position; 3]>,
    },
    /// The score tally changed.
    ScoreChanged(ScoreTally),
    /// All cells were cleared.
    BoardCleared,
}
