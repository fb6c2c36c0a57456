//! High score tracking
//!
//! Engines never touch ambient storage. The presentation layer hands each engine
//! a `KeyValueStore` (LocalStorage in the browser, `MemoryStore` elsewhere) and
//! the engine reads the best score at construction and offers a new one at
//! game over.

use std::collections::HashMap;

use crate::sim::GameKind;

/// String key-value persistence injected into engines and settings
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for seeding a store
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Best score for one game, backed by a store
#[derive(Debug, Clone)]
pub struct HighScore<S> {
    store: S,
    kind: GameKind,
    best: u64,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Read the stored best score. Missing or unparsable values read as 0.
    pub fn load(store: S, kind: GameKind) -> Self {
        let best = match store.get(kind.high_score_key()) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed {} high score {:?}", kind, raw);
                0
            }),
            None => 0,
        };
        log::debug!("Loaded {} high score: {}", kind, best);
        Self { store, kind, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Record `score` if it beats the stored best.
    /// Returns true when a new high score was written.
    pub fn offer(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.store.set(self.kind.high_score_key(), &score.to_string());
        log::info!("New {} high score: {}", self.kind, score);
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_reads_as_zero() {
        let high = HighScore::load(MemoryStore::new(), GameKind::Snake);
        assert_eq!(high.best(), 0);
    }

    #[test]
    fn test_loads_stored_value() {
        let store = MemoryStore::new().with("tetrisHighScore", "1200");
        let high = HighScore::load(store, GameKind::Tetris);
        assert_eq!(high.best(), 1200);
    }

    #[test]
    fn test_malformed_value_reads_as_zero() {
        let store = MemoryStore::new().with("pongHighScore", "lots");
        let high = HighScore::load(store, GameKind::Pong);
        assert_eq!(high.best(), 0);
    }

    #[test]
    fn test_offer_only_writes_higher_scores() {
        let store = MemoryStore::new().with("snakeHighScore", "50");
        let mut high = HighScore::load(store, GameKind::Snake);

        assert!(!high.offer(50));
        assert!(!high.offer(20));
        assert_eq!(high.store().get("snakeHighScore").as_deref(), Some("50"));

        assert!(high.offer(70));
        assert_eq!(high.best(), 70);
        assert_eq!(high.store().get("snakeHighScore").as_deref(), Some("70"));
    }

    #[test]
    fn test_games_use_separate_keys() {
        let mut high = HighScore::load(MemoryStore::new(), GameKind::Pong);
        high.offer(3);
        let store = high.into_store();
        assert_eq!(store.get("pongHighScore").as_deref(), Some("3"));
        assert_eq!(store.get("snakeHighScore"), None);
    }
}
