//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! the engine so the move advisor can evaluate boards with the same pattern
//! set.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{WIN_PATTERNS, check_winner, winning_pattern};
