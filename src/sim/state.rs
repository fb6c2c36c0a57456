//! Session lifecycle shared by every engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Constructed, waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Suspended by the player (Tetris only)
    Paused,
    /// Session ended, score is final
    Over,
}

impl SessionState {
    pub fn is_running(self) -> bool {
        self == SessionState::Running
    }

    pub fn is_over(self) -> bool {
        self == SessionState::Over
    }
}

/// Which game a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Snake,
    Pong,
    Tetris,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Snake, GameKind::Pong, GameKind::Tetris];

    /// Tag used by the ledger to separate leaderboards
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Pong => "pong",
            GameKind::Tetris => "tetris",
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snake" => Some(GameKind::Snake),
            "pong" => Some(GameKind::Pong),
            "tetris" => Some(GameKind::Tetris),
            _ => None,
        }
    }

    /// Store key holding the local high score
    pub fn high_score_key(&self) -> &'static str {
        match self {
            GameKind::Snake => "snakeHighScore",
            GameKind::Pong => "pongHighScore",
            GameKind::Tetris => "tetrisHighScore",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common shape of the three engines, so drivers can run any of them.
pub trait Engine {
    /// Input snapshot sampled once per tick
    type Input;
    /// What happened during a tick
    type Event;

    const KIND: GameKind;

    /// Reset all entity state and enter `Running`
    fn start(&mut self);

    /// Advance one tick. No-op unless `Running`.
    fn tick(&mut self, input: &Self::Input) -> Self::Event;

    fn session(&self) -> SessionState;

    /// Score as displayed and submitted to the ledger
    fn score(&self) -> u64;

    /// Best score stored for this game, in the same units as `score`
    fn high_score(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_tags_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_tag("TETRIS"), Some(GameKind::Tetris));
        assert_eq!(GameKind::from_tag("chess"), None);
    }

    #[test]
    fn test_game_kind_serializes_lowercase() {
        let json = serde_json::to_string(&GameKind::Pong).unwrap();
        assert_eq!(json, "\"pong\"");
    }

    #[test]
    fn test_default_session_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert!(!SessionState::Idle.is_running());
        assert!(SessionState::Over.is_over());
    }
}
