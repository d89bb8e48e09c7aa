//! Event loop that connects a presentation layer to the engine.
//!
//! The session owns the [`GameEngine`] and the computer's [`Advisor`]. Input
//! arrives on one channel, notifications leave on another. When a move
//! leaves the computer to play, a timer task is spawned that sends a ticket
//! back into the loop after the configured delay. The ticket carries the
//! round number it was issued for, and the loop drops it unless that round
//! is still running with the computer to move.

use crate::advisor::{Advisor, HeuristicAdvisor};
use crate::{GameEngine, GameEvent, InputEvent, SessionConfig};
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Request to play the computer's move for `round`.
#[derive(Debug, Clone, Copy)]
struct ComputerMoveDue {
    round: u64,
}

enum Next {
    Input(Option<InputEvent>),
    Computer(ComputerMoveDue),
}

/// Drives one play session.
pub struct GameSession {
    engine: GameEngine,
    advisor: Box<dyn Advisor>,
    delay: Duration,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    ticket_tx: mpsc::UnboundedSender<ComputerMoveDue>,
    ticket_rx: mpsc::UnboundedReceiver<ComputerMoveDue>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("engine", &self.engine)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session using the heuristic advisor.
    #[instrument(skip(event_tx))]
    pub fn new(config: &SessionConfig, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        let advisor = match config.seed() {
            Some(seed) => HeuristicAdvisor::seeded(*seed),
            None => HeuristicAdvisor::from_entropy(),
        };
        Self::with_advisor(config, Box::new(advisor), event_tx)
    }

    /// Creates a session with a custom advisor.
    pub fn with_advisor(
        config: &SessionConfig,
        advisor: Box<dyn Advisor>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let (ticket_tx, ticket_rx) = mpsc::unbounded_channel();
        Self {
            engine: GameEngine::with_computer_mark(*config.computer_mark()),
            advisor,
            delay: config.computer_delay(),
            event_tx,
            ticket_tx,
            ticket_rx,
        }
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Runs the session on a new task, returning the input sender.
    pub fn spawn(self) -> (mpsc::UnboundedSender<InputEvent>, JoinHandle<Result<()>>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.run(input_rx));
        (input_tx, handle)
    }

    /// Processes input and computer tickets until the input channel closes
    /// or the notification receiver is dropped.
    pub async fn run(mut self, mut inputs: mpsc::UnboundedReceiver<InputEvent>) -> Result<()> {
        info!("Session loop started");
        loop {
            let next = tokio::select! {
                input = inputs.recv() => Next::Input(input),
                Some(ticket) = self.ticket_rx.recv() => Next::Computer(ticket),
            };

            let result = match next {
                Next::Input(Some(input)) => self.handle_input(input),
                Next::Input(None) => {
                    info!("Input channel closed, ending session");
                    return Ok(());
                }
                Next::Computer(ticket) => self.handle_computer_move(ticket),
            };

            if let Err(e) = result {
                if self.event_tx.is_closed() {
                    info!("Notification receiver dropped, ending session");
                    return Ok(());
                }
                return Err(e);
            }
        }
    }

    /// Applies one input event and publishes the resulting notifications.
    #[instrument(skip(self), fields(round = self.engine.round()))]
    pub fn handle_input(&mut self, input: InputEvent) -> Result<()> {
        let events = match input {
            InputEvent::CellSelected(index) => self.engine.apply_move(index),
            InputEvent::NewRoundRequested => self.engine.new_round(),
            InputEvent::ResetScoreRequested => self.engine.reset_score(),
            InputEvent::SessionStarted(mode) => self.engine.start_session(mode),
        };
        if events.is_empty() {
            return Ok(());
        }
        self.emit(events)?;
        self.schedule_computer_move()
    }

    #[instrument(skip(self))]
    fn handle_computer_move(&mut self, ticket: ComputerMoveDue) -> Result<()> {
        if ticket.round != self.engine.round() || !self.engine.is_computer_turn() {
            debug!(current_round = self.engine.round(), "Dropping stale computer move");
            return Ok(());
        }
        let events = self.engine.apply_computer_move(self.advisor.as_mut());
        self.emit(events)
    }

    /// Announces the computer's turn and starts its timer.
    fn schedule_computer_move(&self) -> Result<()> {
        if !self.engine.is_computer_turn() {
            return Ok(());
        }
        self.emit(vec![GameEvent::ComputerThinking])?;

        let ticket = ComputerMoveDue {
            round: self.engine.round(),
        };
        let tx = self.ticket_tx.clone();
        let delay = self.delay;
        debug!(?delay, round = ticket.round, "Scheduling computer move");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The loop owns the receiver; it only disappears once the session ended.
            let _ = tx.send(ticket);
        });
        Ok(())
    }

    fn emit(&self, events: Vec<GameEvent>) -> Result<()> {
        for event in events {
            self.event_tx
                .send(event)
                .context("Notification receiver dropped")?;
        }
        Ok(())
    }
}
