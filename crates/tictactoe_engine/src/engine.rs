//! Game state engine: board, turn, status and score for one session.
//!
//! Every operation returns the notifications it produced, in order. An
//! input that breaks a precondition is ignored: no state changes and the
//! returned list is empty.

use crate::advisor::Advisor;
use crate::rules::{is_full, winning_pattern};
use crate::{Board, GameEvent, GameStatus, Mark, Mode, Outcome, Position, ScoreTally, Square};
use derive_more::Display;
use tracing::{debug, info, instrument};

/// Why an input was ignored.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredInput {
    /// Index outside 0-8.
    #[display("cell {_0} is off the board")]
    OutOfRange(usize),
    /// Target cell already holds a mark.
    #[display("cell {_0} is already taken")]
    Occupied(Position),
    /// The round has ended.
    #[display("the round is over")]
    RoundOver,
    /// The computer owns this turn.
    #[display("it is the computer's turn")]
    ComputerTurn,
    /// A computer move was requested when the computer is not to play.
    #[display("it is not the computer's turn")]
    NotComputerTurn,
}

/// Owns all mutable game state for a session.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    current: Mark,
    status: GameStatus,
    mode: Mode,
    computer: Mark,
    score: ScoreTally,
    round: u64,
}

impl GameEngine {
    /// Creates an engine in human-vs-human mode with the computer playing O
    /// whenever a human-vs-computer session starts.
    #[instrument]
    pub fn new() -> Self {
        Self::with_computer_mark(Mark::O)
    }

    /// Creates an engine whose computer opponent plays `computer`.
    #[instrument]
    pub fn with_computer_mark(computer: Mark) -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            status: GameStatus::InProgress,
            mode: Mode::default(),
            computer,
            score: ScoreTally::new(),
            round: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to play next.
    pub fn current_player(&self) -> Mark {
        self.current
    }

    /// Round status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Session mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mark played by the computer in human-vs-computer mode.
    pub fn computer_mark(&self) -> Mark {
        self.computer
    }

    /// Score tally.
    pub fn score(&self) -> &ScoreTally {
        &self.score
    }

    /// Counter bumped by every new round.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// True when the advisor, not external input, must play next.
    pub fn is_computer_turn(&self) -> bool {
        self.mode == Mode::HumanVsComputer
            && self.status == GameStatus::InProgress
            && self.current == self.computer
    }

    /// The first completed pattern, once the round is won.
    pub fn winning_pattern(&self) -> Option<[Position; 3]> {
        match self.status {
            GameStatus::Won(_) => winning_pattern(&self.board).map(|(_, pattern)| pattern),
            _ => None,
        }
    }

    /// Sets the mode and starts a fresh round.
    #[instrument(skip(self))]
    pub fn start_session(&mut self, mode: Mode) -> Vec<GameEvent> {
        info!(%mode, "Starting session");
        self.mode = mode;
        self.new_round()
    }

    /// Clears the board and hands the first move to X. Score is kept.
    #[instrument(skip(self), fields(round = self.round + 1))]
    pub fn new_round(&mut self) -> Vec<GameEvent> {
        self.board = Board::new();
        self.current = Mark::X;
        self.status = GameStatus::InProgress;
        self.round += 1;
        debug!("Board cleared");
        vec![GameEvent::BoardCleared, GameEvent::TurnChanged(self.current)]
    }

    /// Zeroes the score, then starts a new round.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) -> Vec<GameEvent> {
        self.score.reset();
        let mut events = vec![GameEvent::ScoreChanged(self.score)];
        events.extend(self.new_round());
        events
    }

    /// Checks whether a human may play `index` right now.
    pub fn check_move(&self, index: usize) -> Result<Position, IgnoredInput> {
        let pos = Position::from_index(index).ok_or(IgnoredInput::OutOfRange(index))?;
        if self.status.is_terminal() {
            return Err(IgnoredInput::RoundOver);
        }
        if !self.board.is_empty(pos) {
            return Err(IgnoredInput::Occupied(pos));
        }
        if self.is_computer_turn() {
            return Err(IgnoredInput::ComputerTurn);
        }
        Ok(pos)
    }

    /// Places the current player's mark at `index` on behalf of a human.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn apply_move(&mut self, index: usize) -> Vec<GameEvent> {
        match self.check_move(index) {
            Ok(pos) => self.place(pos),
            Err(reason) => {
                debug!(%reason, "Ignoring move");
                Vec::new()
            }
        }
    }

    /// Lets the advisor play the computer's mark.
    #[instrument(skip(self, advisor))]
    pub fn apply_computer_move(&mut self, advisor: &mut dyn Advisor) -> Vec<GameEvent> {
        if !self.is_computer_turn() {
            debug!(reason = %IgnoredInput::NotComputerTurn, "Ignoring computer move");
            return Vec::new();
        }
        match advisor.choose_move(&self.board, self.computer, self.computer.opponent()) {
            Some(pos) if self.board.is_empty(pos) => self.place(pos),
            Some(pos) => {
                debug!(reason = %IgnoredInput::Occupied(pos), "Advisor picked a taken cell");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Applies a validated move and evaluates win, then tie.
    fn place(&mut self, pos: Position) -> Vec<GameEvent> {
        let mark = self.current;
        self.board.set(pos, Square::Occupied(mark));
        let mut events = vec![GameEvent::CellUpdated {
            index: pos.to_index(),
            mark,
        }];

        let (outcome, pattern) = if let Some((winner, pattern)) = winning_pattern(&self.board) {
            self.status = GameStatus::Won(winner);
            (Outcome::PlayerWon(winner), Some(pattern))
        } else if is_full(&self.board) {
            self.status = GameStatus::Tied;
            (Outcome::Tied, None)
        } else {
            self.current = mark.opponent();
            events.push(GameEvent::TurnChanged(self.current));
            return events;
        };

        self.score.record(outcome);
        info!(%outcome, round = self.round, score = %self.score, "Round ended");
        events.push(GameEvent::RoundEnded { outcome, pattern });
        events.push(GameEvent::ScoreChanged(self.score));
        events
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::HeuristicAdvisor;

    fn play(engine: &mut GameEngine, moves: &[usize]) {
        for &m in moves {
            assert!(!engine.apply_move(m).is_empty(), "move {m} was ignored");
        }
    }

    #[test]
    fn test_first_move_is_x_then_alternates() {
        let mut engine = GameEngine::new();
        engine.start_session(Mode::HumanVsHuman);
        assert_eq!(engine.current_player(), Mark::X);

        let events = engine.apply_move(4);
        assert_eq!(
            events,
            vec![
                GameEvent::CellUpdated { index: 4, mark: Mark::X },
                GameEvent::TurnChanged(Mark::O),
            ]
        );
        engine.apply_move(0);
        assert_eq!(engine.current_player(), Mark::X);
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[4]);
        let before = engine.board().clone();

        assert!(engine.apply_move(4).is_empty());
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.current_player(), Mark::O);
        assert_eq!(engine.check_move(4), Err(IgnoredInput::Occupied(Position::Center)));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut engine = GameEngine::new();
        assert!(engine.apply_move(9).is_empty());
        assert_eq!(engine.board().occupied(), 0);
    }

    #[test]
    fn test_win_reports_first_pattern_and_scores_once() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 3, 1, 4]);
        let events = engine.apply_move(2);

        assert_eq!(engine.status(), GameStatus::Won(Mark::X));
        assert_eq!(engine.current_player(), Mark::X);
        assert_eq!(*engine.score().x(), 1);
        assert_eq!(engine.score().rounds(), 1);
        assert_eq!(
            events[1],
            GameEvent::RoundEnded {
                outcome: Outcome::PlayerWon(Mark::X),
                pattern: Some([Position::TopLeft, Position::TopCenter, Position::TopRight]),
            }
        );
        assert_eq!(engine.winning_pattern(), Some([Position::TopLeft, Position::TopCenter, Position::TopRight]));
    }

    #[test]
    fn test_moves_after_win_are_ignored() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 3, 1, 4, 2]);
        assert!(engine.apply_move(8).is_empty());
        assert_eq!(engine.board().occupied(), 5);
        assert_eq!(engine.check_move(8), Err(IgnoredInput::RoundOver));
    }

    #[test]
    fn test_tie_scores_tie_bucket() {
        // X O X / X O O / O X X
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6]);
        let events = engine.apply_move(8);
        assert_eq!(engine.status(), GameStatus::Tied);
        assert_eq!(*engine.score().tie(), 1);
        assert_eq!(engine.score().rounds(), 1);
        assert!(events.contains(&GameEvent::RoundEnded { outcome: Outcome::Tied, pattern: None }));
        assert_eq!(engine.winning_pattern(), None);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_tie() {
        // X O X / O X O / O X X: X's ninth move completes the diagonal.
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 1, 2, 3, 4, 5, 7, 6]);
        engine.apply_move(8);
        assert_eq!(engine.status(), GameStatus::Won(Mark::X));
        assert_eq!(*engine.score().tie(), 0);
    }

    #[test]
    fn test_new_round_keeps_score() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 3, 1, 4, 2]);
        let round = engine.round();
        let events = engine.new_round();
        assert_eq!(events, vec![GameEvent::BoardCleared, GameEvent::TurnChanged(Mark::X)]);
        assert_eq!(engine.board().occupied(), 0);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.round(), round + 1);
        assert_eq!(*engine.score().x(), 1);
    }

    #[test]
    fn test_reset_score_zeroes_and_clears() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 3, 1, 4, 2]);
        engine.new_round();
        play(&mut engine, &[4]);
        let events = engine.reset_score();
        assert_eq!(events[0], GameEvent::ScoreChanged(ScoreTally::new()));
        assert_eq!(engine.score(), &ScoreTally::new());
        assert_eq!(engine.board().occupied(), 0);
        assert_eq!(engine.current_player(), Mark::X);
    }

    #[test]
    fn test_human_cannot_play_computer_turn() {
        let mut engine = GameEngine::new();
        engine.start_session(Mode::HumanVsComputer);
        play(&mut engine, &[0]);
        assert!(engine.is_computer_turn());
        assert!(engine.apply_move(4).is_empty());
        assert_eq!(engine.check_move(4), Err(IgnoredInput::ComputerTurn));
    }

    #[test]
    fn test_computer_move_only_on_its_turn() {
        let mut advisor = HeuristicAdvisor::seeded(1);
        let mut engine = GameEngine::new();
        engine.start_session(Mode::HumanVsComputer);
        assert!(engine.apply_computer_move(&mut advisor).is_empty());

        play(&mut engine, &[0]);
        let events = engine.apply_computer_move(&mut advisor);
        assert_eq!(events[0], GameEvent::CellUpdated { index: 4, mark: Mark::O });
        assert_eq!(engine.current_player(), Mark::X);
    }

    #[test]
    fn test_computer_move_ignored_in_pvp() {
        let mut advisor = HeuristicAdvisor::seeded(1);
        let mut engine = GameEngine::new();
        engine.start_session(Mode::HumanVsHuman);
        play(&mut engine, &[0]);
        assert!(!engine.is_computer_turn());
        assert!(engine.apply_computer_move(&mut advisor).is_empty());
        assert_eq!(engine.board().occupied(), 1);
    }

    #[test]
    fn test_computer_playing_x_moves_first() {
        let mut engine = GameEngine::with_computer_mark(Mark::X);
        engine.start_session(Mode::HumanVsComputer);
        assert!(engine.is_computer_turn());
        assert!(engine.apply_move(0).is_empty());
    }
}
