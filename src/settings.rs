//! Arcade settings and preferences
//!
//! Persisted as JSON in the same key-value store as the high scores.

use serde::{Deserialize, Serialize};

use crate::highscores::KeyValueStore;
use crate::sim::FixedStep;

/// Driver settings shared by every game page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snake tick interval (ms)
    pub snake_interval_ms: u32,
    /// Pong tick interval (ms)
    pub pong_interval_ms: u32,
    /// Ticks allowed per rendered frame before backlog is dropped
    pub max_substeps: u32,
    /// `log` level filter name ("error" .. "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snake_interval_ms: 150,
            pong_interval_ms: 16,
            max_substeps: 8,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Store key
    const STORAGE_KEY: &'static str = "stellarcade_settings";

    /// Load settings, falling back to defaults on missing or malformed data
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Discarding malformed settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }

    /// Parsed log level, `Info` when unrecognized
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn snake_clock(&self) -> FixedStep {
        FixedStep::new(self.snake_interval_ms, self.max_substeps)
    }

    pub fn pong_clock(&self) -> FixedStep {
        FixedStep::new(self.pong_interval_ms, self.max_substeps)
    }
}
