//! Turns session notifications into terminal output.

use tictactoe_engine::{Board, GameEvent, Mark, Position, Square};

/// Mirror of the board built only from notifications.
#[derive(Debug, Default)]
pub struct View {
    board: Board,
    highlight: Vec<Position>,
}

impl View {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one notification and returns the text to print, if any.
    pub fn apply(&mut self, event: &GameEvent) -> Option<String> {
        match event {
            GameEvent::CellUpdated { index, mark } => {
                let pos = Position::from_index(*index)?;
                self.board.set(pos, Square::Occupied(*mark));
                Some(self.grid())
            }
            GameEvent::TurnChanged(mark) => Some(format!("Player {mark}'s turn")),
            GameEvent::ComputerThinking => Some("Computer is thinking...".to_string()),
            GameEvent::RoundEnded { outcome, pattern } => {
                self.highlight = pattern.map(Vec::from).unwrap_or_default();
                let mut text = format!("Game over: {outcome}!");
                if !self.highlight.is_empty() {
                    text.push('\n');
                    text.push_str(&self.grid());
                }
                Some(text)
            }
            GameEvent::ScoreChanged(score) => Some(format!("Score: {score}")),
            GameEvent::BoardCleared => {
                self.board = Board::new();
                self.highlight.clear();
                Some(format!("\n{}", self.grid()))
            }
        }
    }

    /// Board grid, with the winning line shown in brackets.
    fn grid(&self) -> String {
        if self.highlight.is_empty() {
            return self.board.display();
        }
        let mut out = String::new();
        for (i, pos) in Position::ALL.iter().enumerate() {
            let cell = match self.board.get(*pos) {
                Square::Occupied(Mark::X) => "X",
                Square::Occupied(Mark::O) => "O",
                Square::Empty => " ",
            };
            if self.highlight.contains(pos) {
                out.push_str(&format!("[{cell}]"));
            } else {
                out.push_str(&format!(" {cell} "));
            }
            match i % 3 {
                2 if i < 8 => out.push_str("\n---+---+---\n"),
                2 => {}
                _ => out.push('|'),
            }
        }
        out
    }
}
