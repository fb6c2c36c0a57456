//! Stellarcade - deterministic engines for the browser arcade
//!
//! Core modules:
//! - `sim`: Snake, Pong and Tetris simulations (pure, pull-based, seeded RNG)
//! - `highscores`: Injected key-value store and per-game high score tracking
//! - `settings`: Tick cadences and logging preferences
//! - `ledger`: Score submission boundary and an in-memory leaderboard
//! - `platform`: Browser bindings (wasm32 only)

pub mod highscores;
pub mod ledger;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{HighScore, KeyValueStore, MemoryStore};
pub use ledger::{InMemoryLedger, Ledger, LedgerError, ScoreSubmission, SubmissionGuard};
pub use settings::Settings;
pub use sim::{Engine, GameKind, SessionState};

/// Game configuration constants
pub mod consts {
    // Snake

    /// Side length of the square snake grid, in cells
    pub const SNAKE_GRID_SIZE: i32 = 20;
    /// Points awarded per food eaten
    pub const SNAKE_FOOD_POINTS: u64 = 10;
    /// Random draws tried before falling back to free-cell enumeration
    pub const SNAKE_FOOD_ATTEMPTS: u32 = 32;

    // Pong

    /// Field dimensions
    pub const PONG_WIDTH: f32 = 700.0;
    pub const PONG_HEIGHT: f32 = 480.0;
    /// Paddle defaults
    pub const PONG_PADDLE_WIDTH: f32 = 100.0;
    pub const PONG_PADDLE_HEIGHT: f32 = 12.0;
    /// Gap between a paddle and its field edge
    pub const PONG_PADDLE_MARGIN: f32 = 4.0;
    /// Player paddle speed per tick while a key is held
    pub const PONG_PADDLE_SPEED: f32 = 8.0;
    /// Opponent paddle tracking speed per tick
    pub const PONG_OPPONENT_SPEED: f32 = 8.0;
    /// Ball is a square box addressed by its top-left corner
    pub const PONG_BALL_SIZE: f32 = 10.0;
    pub const PONG_BALL_START_VX: f32 = 6.0;
    pub const PONG_BALL_START_VY: f32 = -6.0;
    /// Ball y at or above which the opponent paddle can return it
    pub const PONG_OPPONENT_CONTACT_Y: f32 = PONG_PADDLE_HEIGHT + 6.0;
    /// Top edge of the player paddle
    pub const PONG_PLAYER_LINE_Y: f32 = PONG_HEIGHT - PONG_PADDLE_HEIGHT - PONG_PADDLE_MARGIN;
    /// Speed boost when the player returns the ball (multiplicative)
    pub const PONG_SPEEDUP: f32 = 1.02;
    /// Horizontal velocity added per pixel of offset from paddle center
    pub const PONG_ENGLISH: f32 = 0.05;
    /// Displayed score per internal point
    pub const PONG_DISPLAY_MULTIPLIER: u64 = 10;

    // Tetris

    /// Board dimensions
    pub const TETRIS_COLS: usize = 10;
    pub const TETRIS_ROWS: usize = 20;
    /// Gravity interval at level 1 (ms)
    pub const TETRIS_BASE_DROP_MS: u32 = 1000;
    /// Gravity interval floor (ms)
    pub const TETRIS_MIN_DROP_MS: u32 = 100;
    /// Interval shaved off per level (ms)
    pub const TETRIS_DROP_STEP_MS: u32 = 100;
    pub const TETRIS_LINES_PER_LEVEL: u32 = 10;
    /// Award per lines cleared at once, multiplied by level
    pub const TETRIS_LINE_SCORES: [u64; 5] = [0, 40, 100, 300, 1200];
}
