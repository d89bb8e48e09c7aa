//! Parsing of typed commands.

use tictactoe_engine::{InputEvent, Mode, Position};

/// A line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the session.
    Game(InputEvent),
    /// Print the help text.
    Help,
    /// Leave the program.
    Quit,
}

/// Help shown on `?` and at startup.
pub const HELP: &str = "\
Commands:
  0-8 or a label (e.g. center)  play a cell
  n, new                        start a new round
  r, reset                      reset the score and the board
  pvp, pvc                      switch mode (score is kept)
  ?, help                       show this help
  q, quit                       exit";

/// Parses one input line. Returns `None` for unrecognised text.
pub fn parse(line: &str) -> Option<Command> {
    let word = line.trim().to_lowercase();
    let command = match word.as_str() {
        "n" | "new" => Command::Game(InputEvent::NewRoundRequested),
        "r" | "reset" => Command::Game(InputEvent::ResetScoreRequested),
        "pvp" => Command::Game(InputEvent::SessionStarted(Mode::HumanVsHuman)),
        "pvc" => Command::Game(InputEvent::SessionStarted(Mode::HumanVsComputer)),
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => {
            let pos = Position::from_label_or_number(other)?;
            Command::Game(InputEvent::CellSelected(pos.to_index()))
        }
    };
    Some(command)
}
