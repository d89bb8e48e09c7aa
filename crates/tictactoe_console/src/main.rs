//! Terminal front end for tictactoe_engine.
//!
//! Reads commands from stdin and prints the notifications the session
//! publishes. Logs go to stderr, filtered by `RUST_LOG`.

#![warn(missing_docs)]

mod cli;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use input::{Command, HELP};
use render::View;
use std::time::Duration;
use tictactoe_engine::{GameEvent, GameSession, InputEvent, SessionConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    run(cli, config).await
}

/// Builds the session config from the optional file and flag overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(ms) = cli.delay_ms {
        config = config.with_computer_delay(Duration::from_millis(ms));
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    debug!(?config, "Effective config");
    Ok(config)
}

/// Runs the session until the user quits or stdin closes.
async fn run(cli: Cli, config: SessionConfig) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (input_tx, session) = GameSession::new(&config, event_tx).spawn();
    let printer = tokio::spawn(print_events(event_rx));

    println!("{HELP}");
    input_tx
        .send(InputEvent::SessionStarted(cli.mode.into()))
        .context("Session ended unexpectedly")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match input::parse(&line) {
            Some(Command::Game(event)) => {
                if input_tx.send(event).is_err() {
                    warn!("Session is gone");
                    break;
                }
            }
            Some(Command::Help) => println!("{HELP}"),
            Some(Command::Quit) => break,
            None if line.trim().is_empty() => {}
            None => println!("Unknown command {:?}, type ? for help", line.trim()),
        }
    }

    info!("Shutting down");
    drop(input_tx);
    session.await??;
    printer.await?;
    Ok(())
}

async fn print_events(mut rx: mpsc::UnboundedReceiver<GameEvent>) {
    let mut view = View::new();
    while let Some(event) = rx.recv().await {
        if let Some(text) = view.apply(&event) {
            println!("{text}");
        }
    }
}
