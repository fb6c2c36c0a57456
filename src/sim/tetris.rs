//! Falling blocks
//!
//! One piece falls at a time. Gravity is gated by accumulated frame time
//! against the current drop interval, so the driver can poll at any rate and
//! still see level-based speed-ups.

use serde::{Deserialize, Serialize};

use super::board::{Board, check_collision};
use super::rng::{RandomSource, SeededRng};
use super::state::{Engine, GameKind, SessionState};
use super::tetromino::{Piece, Tetromino};
use crate::consts::*;
use crate::highscores::{HighScore, KeyValueStore, MemoryStore};

/// Level for a total line count
pub fn level_for_lines(lines: u32) -> u32 {
    lines / TETRIS_LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, floored at the minimum
pub fn drop_interval_for_level(level: u32) -> u32 {
    let shaved = level.saturating_sub(1).saturating_mul(TETRIS_DROP_STEP_MS);
    TETRIS_BASE_DROP_MS
        .saturating_sub(shaved)
        .max(TETRIS_MIN_DROP_MS)
}

/// Points for clearing `lines` rows at once on `level`
pub fn line_clear_award(lines: u32, level: u32) -> u64 {
    let index = (lines as usize).min(TETRIS_LINE_SCORES.len() - 1);
    TETRIS_LINE_SCORES[index] * u64::from(level)
}

/// Discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TetrisCommand {
    Left,
    Right,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
}

/// Input for one frame: time since the last frame plus the latest command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TetrisInput {
    pub elapsed_ms: u32,
    pub command: Option<TetrisCommand>,
}

/// Outcome of an action or frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisEvent {
    /// Not running (idle, paused or over), nothing changed
    Ignored,
    /// Running, but nothing was due this frame
    Waiting,
    Moved,
    Rotated,
    /// Move or rotation rejected by collision
    Blocked,
    /// Piece merged into the board and the next one spawned
    Locked { lines: u32 },
    /// Next piece could not spawn, session is over
    ToppedOut,
    Paused,
    Resumed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TetrisState {
    pub board: Board,
    /// Falling piece, `None` before the first start and after topping out
    pub piece: Option<Piece>,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub session: SessionState,
}

impl Default for TetrisState {
    fn default() -> Self {
        Self {
            board: Board::new(),
            piece: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: TETRIS_BASE_DROP_MS,
            session: SessionState::Idle,
        }
    }
}

/// Tetris engine with injected randomness and high score store
#[derive(Debug, Clone)]
pub struct TetrisGame<R = SeededRng, S = MemoryStore> {
    state: TetrisState,
    rng: R,
    high_score: HighScore<S>,
    /// Time accumulated since the last downward step
    gravity_ms: u32,
}

impl<R: RandomSource, S: KeyValueStore> TetrisGame<R, S> {
    pub fn new(rng: R, store: S) -> Self {
        Self {
            state: TetrisState::default(),
            rng,
            high_score: HighScore::load(store, GameKind::Tetris),
            gravity_ms: 0,
        }
    }

    pub fn state(&self) -> &TetrisState {
        &self.state
    }

    pub fn high_score_store(&self) -> &S {
        self.high_score.store()
    }

    /// Empty board, level 1, first piece in play
    pub fn start(&mut self) {
        let piece = self.spawn_piece();
        self.state = TetrisState {
            piece: Some(piece),
            session: SessionState::Running,
            ..TetrisState::default()
        };
        self.gravity_ms = 0;
        log::info!("Tetris started with {:?}", piece.kind);
    }

    /// Uniformly random shape at the top center. Does not place it.
    pub fn spawn_piece(&mut self) -> Piece {
        let index = self.rng.next_below(Tetromino::ALL.len() as u32) as usize;
        Piece::spawn(Tetromino::ALL[index])
    }

    pub fn move_piece(&mut self, dx: i32, dy: i32) -> TetrisEvent {
        if !self.state.session.is_running() {
            return TetrisEvent::Ignored;
        }
        let Some(piece) = self.state.piece else {
            return TetrisEvent::Ignored;
        };

        if !check_collision(&piece, &self.state.board, dx, dy) {
            self.state.piece = Some(piece.offset(dx, dy));
            if dy > 0 {
                self.gravity_ms = 0;
            }
            return TetrisEvent::Moved;
        }

        if dy > 0 {
            self.lock(piece)
        } else {
            TetrisEvent::Blocked
        }
    }

    /// Clockwise turn in place. No wall kicks: a colliding turn is dropped.
    pub fn rotate(&mut self) -> TetrisEvent {
        if !self.state.session.is_running() {
            return TetrisEvent::Ignored;
        }
        let Some(piece) = self.state.piece else {
            return TetrisEvent::Ignored;
        };

        let rotated = piece.rotated();
        if check_collision(&rotated, &self.state.board, 0, 0) {
            return TetrisEvent::Blocked;
        }
        self.state.piece = Some(rotated);
        TetrisEvent::Rotated
    }

    /// Drop as far as the piece can go in one move. It locks on the next
    /// gravity step.
    pub fn hard_drop(&mut self) -> TetrisEvent {
        if !self.state.session.is_running() {
            return TetrisEvent::Ignored;
        }
        let Some(piece) = self.state.piece else {
            return TetrisEvent::Ignored;
        };

        let mut distance = 0;
        while !check_collision(&piece, &self.state.board, 0, distance + 1) {
            distance += 1;
        }
        self.move_piece(0, distance)
    }

    /// Remove full rows and apply scoring, level and speed.
    /// Returns the number of rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.state.board.clear_full_rows();
        if cleared == 0 {
            return 0;
        }

        let s = &mut self.state;
        s.score += line_clear_award(cleared, s.level);
        s.lines += cleared;
        s.level = level_for_lines(s.lines);
        s.drop_interval_ms = drop_interval_for_level(s.level);
        log::debug!(
            "Cleared {} lines: score {}, level {}, drop interval {}ms",
            cleared,
            s.score,
            s.level,
            s.drop_interval_ms
        );
        cleared
    }

    pub fn pause(&mut self) -> TetrisEvent {
        if !self.state.session.is_running() {
            return TetrisEvent::Ignored;
        }
        self.state.session = SessionState::Paused;
        log::info!("Tetris paused");
        TetrisEvent::Paused
    }

    pub fn resume(&mut self) -> TetrisEvent {
        if self.state.session != SessionState::Paused {
            return TetrisEvent::Ignored;
        }
        self.state.session = SessionState::Running;
        log::info!("Tetris resumed");
        TetrisEvent::Resumed
    }

    pub fn toggle_pause(&mut self) -> TetrisEvent {
        match self.state.session {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            _ => TetrisEvent::Ignored,
        }
    }

    /// Gravity: step down once accumulated time reaches the drop interval
    pub fn advance(&mut self, elapsed_ms: u32) -> TetrisEvent {
        if !self.state.session.is_running() {
            return TetrisEvent::Ignored;
        }
        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);
        if self.gravity_ms < self.state.drop_interval_ms {
            return TetrisEvent::Waiting;
        }
        self.move_piece(0, 1)
    }

    pub fn apply(&mut self, command: TetrisCommand) -> TetrisEvent {
        match command {
            TetrisCommand::Left => self.move_piece(-1, 0),
            TetrisCommand::Right => self.move_piece(1, 0),
            TetrisCommand::SoftDrop => self.move_piece(0, 1),
            TetrisCommand::Rotate => self.rotate(),
            TetrisCommand::HardDrop => self.hard_drop(),
            TetrisCommand::TogglePause => self.toggle_pause(),
        }
    }

    /// Apply the sampled command, then run gravity for the elapsed time
    pub fn tick(&mut self, input: TetrisInput) -> TetrisEvent {
        let command_event = input.command.map(|command| self.apply(command));
        let gravity_event = self.advance(input.elapsed_ms);
        match (command_event, gravity_event) {
            (Some(event), TetrisEvent::Waiting | TetrisEvent::Ignored) => event,
            (_, event) => event,
        }
    }

    fn lock(&mut self, piece: Piece) -> TetrisEvent {
        self.state.board.merge(&piece);
        let lines = self.clear_lines();
        self.gravity_ms = 0;

        let next = self.spawn_piece();
        if check_collision(&next, &self.state.board, 0, 0) {
            self.state.piece = None;
            self.state.session = SessionState::Over;
            self.high_score.offer(self.state.score);
            log::info!(
                "Tetris topped out: score {}, lines {}, level {}",
                self.state.score,
                self.state.lines,
                self.state.level
            );
            return TetrisEvent::ToppedOut;
        }

        self.state.piece = Some(next);
        TetrisEvent::Locked { lines }
    }
}

impl<R: RandomSource, S: KeyValueStore> Engine for TetrisGame<R, S> {
    type Input = TetrisInput;
    type Event = TetrisEvent;

    const KIND: GameKind = GameKind::Tetris;

    fn start(&mut self) {
        TetrisGame::start(self);
    }

    fn tick(&mut self, input: &TetrisInput) -> TetrisEvent {
        TetrisGame::tick(self, *input)
    }

    fn session(&self) -> SessionState {
        self.state.session
    }

    fn score(&self) -> u64 {
        self.state.score
    }

    fn high_score(&self) -> u64 {
        self.high_score.best()
    }
}
