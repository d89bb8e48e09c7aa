//! Command-line arguments for the console front end.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tictactoe_engine::Mode;

/// Play tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with a score board and a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Who plays O
    #[arg(short, long, value_enum, default_value = "pvc")]
    pub mode: ModeArg,

    /// Path to a TOML session config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the computer's thinking delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed the computer's random moves
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Session mode as typed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Two humans share the keyboard
    Pvp,
    /// Play against the computer
    Pvc,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => Mode::HumanVsHuman,
            ModeArg::Pvc => Mode::HumanVsComputer,
        }
    }
}
