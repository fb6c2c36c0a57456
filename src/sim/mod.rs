//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven by an external tick source, no timers
//! - Injected randomness only
//! - Input arrives as a sampled snapshot per tick
//! - No rendering or platform dependencies

pub mod board;
pub mod clock;
pub mod collision;
pub mod pong;
pub mod rng;
pub mod snake;
pub mod state;
pub mod tetris;
pub mod tetromino;

pub use board::{Board, check_collision};
pub use clock::FixedStep;
pub use pong::{Ball, Paddle, PaddleInput, PongEvent, PongGame, PongState};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use snake::{Cell, Direction, SnakeEvent, SnakeGame, SnakeInput, SnakeState};
pub use state::{Engine, GameKind, SessionState};
pub use tetris::{TetrisCommand, TetrisEvent, TetrisGame, TetrisInput, TetrisState};
pub use tetromino::{Piece, Shape, Tetromino};
