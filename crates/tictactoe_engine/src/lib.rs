//! Tic-tac-toe core: turn engine, score tally and computer opponent.
//!
//! # Architecture
//!
//! - **Engine**: [`GameEngine`] owns board, turn, status, mode and score.
//!   Each operation returns the [`GameEvent`]s it produced.
//! - **Rules**: the eight [`WIN_PATTERNS`] plus win and tie detection.
//! - **Advisor**: a one-ply heuristic (win, block, center, random) that
//!   picks the computer's move.
//! - **Session**: an async loop that feeds [`InputEvent`]s to the engine,
//!   publishes notifications and schedules the computer's delayed move.
//!
//! Rendering is left to the caller, which only talks to the core through
//! the two event enums.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameStatus, Mark, Mode};
//!
//! let mut engine = GameEngine::new();
//! engine.start_session(Mode::HumanVsHuman);
//! for cell in [0, 3, 1, 4, 2] {
//!     engine.apply_move(cell);
//! }
//! assert_eq!(engine.status(), GameStatus::Won(Mark::X));
//! assert_eq!(*engine.score().x(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod events;
mod position;
mod score;
mod session;
mod types;

pub mod advisor;
pub mod rules;

pub use advisor::{Advisor, HeuristicAdvisor, Rule, Suggestion, choose_move};
pub use config::{ConfigError, SessionConfig};
pub use engine::{GameEngine, IgnoredInput};
pub use events::{GameEvent, InputEvent};
pub use position::Position;
pub use rules::WIN_PATTERNS;
pub use score::ScoreTally;
pub use session::GameSession;
pub use types::{Board, BoardParseError, GameStatus, Mark, Mode, Outcome, Square};
