//! Remote score ledger boundary
//!
//! Finished sessions are submitted to an external ledger that ranks the top 10
//! scores per game and lets the current leader claim a reward once. The wire
//! protocol lives outside this crate; here we only define the call surface,
//! an in-memory double with the same ranking rules, and a guard that submits
//! each finished session at most once.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{Engine, GameKind};

/// Maximum rows kept per game
pub const MAX_LEADERBOARD_ROWS: usize = 10;

/// Score submission payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    /// Wallet address or other player identity
    pub player: String,
    /// Display name
    pub username: String,
    pub score: u64,
    pub game: GameKind,
}

impl ScoreSubmission {
    /// Build a submission from a finished engine. Returns `None` while the
    /// session is still in progress.
    pub fn from_engine<E: Engine>(engine: &E, player: &str, username: &str) -> Option<Self> {
        if !engine.session().is_over() {
            return None;
        }
        Some(Self {
            player: player.to_string(),
            username: username.to_string(),
            score: engine.score(),
            game: E::KIND,
        })
    }
}

/// One ranked leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub username: String,
    pub score: u64,
}

/// Ledger failures. None of these are fatal and all can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No wallet connected or the player identity is missing
    WalletUnavailable,
    /// The ledger refused the call
    Rejected(String),
    /// Transport failure
    Network(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::WalletUnavailable => write!(f, "wallet unavailable"),
            LedgerError::Rejected(reason) => write!(f, "submission rejected: {}", reason),
            LedgerError::Network(reason) => write!(f, "network error: {}", reason),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Call surface of the score ledger
pub trait Ledger {
    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<(), LedgerError>;

    fn top_score(&self, game: GameKind) -> Result<Option<LeaderboardEntry>, LedgerError>;

    /// Ranked rows, highest first
    fn leaderboard(&self, game: GameKind) -> Result<Vec<LeaderboardEntry>, LedgerError>;

    fn last_player(&self, game: GameKind) -> Result<Option<String>, LedgerError>;

    fn has_claimed_reward(&self, game: GameKind) -> Result<bool, LedgerError>;

    /// Mark the reward as claimed. Returns false when the player is not the
    /// current leader or the reward was already claimed.
    fn claim_reward(&mut self, player: &str, game: GameKind) -> Result<bool, LedgerError>;
}

#[derive(Debug, Clone, Default)]
struct GameBoard {
    entries: Vec<LeaderboardEntry>,
    last_player: Option<String>,
    reward_claimed: bool,
}

impl GameBoard {
    fn leader(&self) -> Option<&str> {
        self.entries.first().map(|e| e.player.as_str())
    }

    /// Insert keeping descending order; equal scores stay in submission order
    fn insert(&mut self, entry: LeaderboardEntry) {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_LEADERBOARD_ROWS);
    }
}

/// Ledger kept in process memory, for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    games: HashMap<GameKind, GameBoard>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ledger for InMemoryLedger {
    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<(), LedgerError> {
        if submission.player.is_empty() {
            return Err(LedgerError::WalletUnavailable);
        }

        let board = self.games.entry(submission.game).or_default();
        board.last_player = Some(submission.player.clone());

        let previous_leader = board.leader().map(str::to_string);
        board.insert(LeaderboardEntry {
            player: submission.player.clone(),
            username: submission.username.clone(),
            score: submission.score,
        });

        let leader_changed = previous_leader
            .as_deref()
            .is_some_and(|previous| board.leader() != Some(previous));
        if leader_changed {
            board.reward_claimed = false;
            log::info!(
                "New {} leader: {} with {}",
                submission.game,
                submission.username,
                submission.score
            );
        }
        Ok(())
    }

    fn top_score(&self, game: GameKind) -> Result<Option<LeaderboardEntry>, LedgerError> {
        Ok(self
            .games
            .get(&game)
            .and_then(|board| board.entries.first().cloned()))
    }

    fn leaderboard(&self, game: GameKind) -> Result<Vec<LeaderboardEntry>, LedgerError> {
        Ok(self
            .games
            .get(&game)
            .map(|board| board.entries.clone())
            .unwrap_or_default())
    }

    fn last_player(&self, game: GameKind) -> Result<Option<String>, LedgerError> {
        Ok(self.games.get(&game).and_then(|b| b.last_player.clone()))
    }

    fn has_claimed_reward(&self, game: GameKind) -> Result<bool, LedgerError> {
        Ok(self.games.get(&game).is_some_and(|b| b.reward_claimed))
    }

    fn claim_reward(&mut self, player: &str, game: GameKind) -> Result<bool, LedgerError> {
        if player.is_empty() {
            return Err(LedgerError::WalletUnavailable);
        }
        let Some(board) = self.games.get_mut(&game) else {
            return Ok(false);
        };
        if board.reward_claimed || board.leader() != Some(player) {
            return Ok(false);
        }
        board.reward_claimed = true;
        log::info!("{} reward claimed by {}", game, player);
        Ok(true)
    }
}

/// Submit-once latch for a single session
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    submitted: bool,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Arm the guard again for a new session
    pub fn reset(&mut self) {
        self.submitted = false;
    }

    /// Submit unless this session was already submitted or scored zero.
    /// Returns whether a submission reached the ledger. On failure the guard
    /// stays open so the caller can retry.
    pub fn submit<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        submission: &ScoreSubmission,
    ) -> Result<bool, LedgerError> {
        if self.submitted || submission.score == 0 {
            return Ok(false);
        }
        match ledger.submit_score(submission) {
            Ok(()) => {
                self.submitted = true;
                log::info!(
                    "Submitted {} score {} for {}",
                    submission.game,
                    submission.score,
                    submission.username
                );
                Ok(true)
            }
            Err(err) => {
                log::warn!("Score submission failed: {}", err);
                Err(err)
            }
        }
    }
}
