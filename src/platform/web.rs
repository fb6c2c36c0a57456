//! Browser bindings
//!
//! Each handle owns one engine and its frame clock. The page calls `frame`
//! from `requestAnimationFrame` with the elapsed milliseconds, forwards key
//! presses through the input setters and draws from `state_json`.

use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::highscores::KeyValueStore;
use crate::ledger::ScoreSubmission;
use crate::settings::Settings;
use crate::sim::{
    Direction, Engine, FixedStep, PaddleInput, PongGame, SeededRng, SnakeGame, TetrisCommand,
    TetrisGame, TetrisInput,
};

/// `KeyValueStore` backed by `window.localStorage`.
/// Reads and writes silently do nothing when storage is unavailable.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, scores will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("Failed to write {} to LocalStorage", key);
        }
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();

    let settings = Settings::load(&LocalStorageStore::new());
    let level = settings
        .level_filter()
        .to_level()
        .unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Stellarcade engines ready");
}

/// Seed from the page clock mixed with `Math.random`
fn browser_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    now ^ (noise << 21)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn submission_json<E: Engine>(
    engine: &E,
    player: &str,
    username: &str,
) -> Result<Option<String>, JsValue> {
    ScoreSubmission::from_engine(engine, player, username)
        .map(|s| to_json(&s))
        .transpose()
}

fn parse_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "up" => Some(Direction::Up),
        "ArrowDown" | "down" => Some(Direction::Down),
        "ArrowLeft" | "left" => Some(Direction::Left),
        "ArrowRight" | "right" => Some(Direction::Right),
        _ => None,
    }
}

fn parse_command(key: &str) -> Option<TetrisCommand> {
    match key {
        "ArrowLeft" | "left" => Some(TetrisCommand::Left),
        "ArrowRight" | "right" => Some(TetrisCommand::Right),
        "ArrowDown" | "down" => Some(TetrisCommand::SoftDrop),
        "ArrowUp" | "rotate" => Some(TetrisCommand::Rotate),
        " " | "Space" | "drop" => Some(TetrisCommand::HardDrop),
        "p" | "P" | "pause" => Some(TetrisCommand::TogglePause),
        _ => None,
    }
}

#[wasm_bindgen]
pub struct SnakeHandle {
    game: SnakeGame<SeededRng, LocalStorageStore>,
    clock: FixedStep,
}

#[wasm_bindgen]
impl SnakeHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let store = LocalStorageStore::new();
        let clock = Settings::load(&store).snake_clock();
        Self {
            game: SnakeGame::new(SeededRng::new(browser_seed()), store),
            clock,
        }
    }

    pub fn start(&mut self) {
        self.clock.reset();
        self.game.start();
    }

    /// Returns false for keys that are not arrows
    pub fn set_direction(&mut self, key: &str) -> bool {
        let Some(direction) = parse_direction(key) else {
            return false;
        };
        self.game.set_direction(direction);
        true
    }

    /// Run the ticks due for this frame. Returns the number of ticks run.
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        let ticks = self.clock.advance(elapsed_ms);
        for _ in 0..ticks {
            if !self.game.state().session.is_running() {
                break;
            }
            self.game.tick();
        }
        ticks
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(self.game.state())
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    pub fn is_over(&self) -> bool {
        self.game.session().is_over()
    }

    /// Ledger payload once the session is over, `undefined` before that
    pub fn submission_json(&self, player: &str, username: &str) -> Result<Option<String>, JsValue> {
        submission_json(&self.game, player, username)
    }
}

#[wasm_bindgen]
pub struct PongHandle {
    game: PongGame<LocalStorageStore>,
    clock: FixedStep,
    input: PaddleInput,
}

#[wasm_bindgen]
impl PongHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let store = LocalStorageStore::new();
        let clock = Settings::load(&store).pong_clock();
        Self {
            game: PongGame::new(store),
            clock,
            input: PaddleInput::default(),
        }
    }

    pub fn start(&mut self) {
        self.clock.reset();
        self.input = PaddleInput::default();
        self.game.start();
    }

    /// Held key state, sampled on every tick
    pub fn set_input(&mut self, left: bool, right: bool) {
        self.input = PaddleInput { left, right };
    }

    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        let ticks = self.clock.advance(elapsed_ms);
        for _ in 0..ticks {
            if !self.game.state().session.is_running() {
                break;
            }
            self.game.tick(self.input);
        }
        ticks
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(self.game.state())
    }

    /// Displayed score (points x 10)
    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    pub fn is_over(&self) -> bool {
        self.game.session().is_over()
    }

    pub fn submission_json(&self, player: &str, username: &str) -> Result<Option<String>, JsValue> {
        submission_json(&self.game, player, username)
    }
}

#[wasm_bindgen]
pub struct TetrisHandle {
    game: TetrisGame<SeededRng, LocalStorageStore>,
    /// Latest key press, consumed by the next frame
    pending: Option<TetrisCommand>,
}

#[wasm_bindgen]
impl TetrisHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: TetrisGame::new(SeededRng::new(browser_seed()), LocalStorageStore::new()),
            pending: None,
        }
    }

    pub fn start(&mut self) {
        self.pending = None;
        self.game.start();
    }

    pub fn command(&mut self, key: &str) -> bool {
        let Some(command) = parse_command(key) else {
            return false;
        };
        self.pending = Some(command);
        true
    }

    /// Apply the pending command and run gravity. Elapsed time is clamped to
    /// one second so a backgrounded tab does not drop pieces in a burst.
    pub fn frame(&mut self, elapsed_ms: f64) {
        let elapsed_ms = elapsed_ms.clamp(0.0, 1000.0) as u32;
        let input = TetrisInput {
            elapsed_ms,
            command: self.pending.take(),
        };
        self.game.tick(input);
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(self.game.state())
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    pub fn is_over(&self) -> bool {
        self.game.session().is_over()
    }

    pub fn submission_json(&self, player: &str, username: &str) -> Result<Option<String>, JsValue> {
        submission_json(&self.game, player, username)
    }
}
