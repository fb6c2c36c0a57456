//! Grid snake
//!
//! Discrete movement on a 20x20 grid. The snake moves one cell per tick in its
//! pending direction, dies on walls or itself, and grows by one cell per food.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rng::{RandomSource, SeededRng};
use super::state::{Engine, GameKind, SessionState};
use crate::consts::*;
use crate::highscores::{HighScore, KeyValueStore, MemoryStore};

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid center, where every session starts
    pub const fn center() -> Self {
        Self::new(SNAKE_GRID_SIZE / 2, SNAKE_GRID_SIZE / 2)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..SNAKE_GRID_SIZE).contains(&self.x) && (0..SNAKE_GRID_SIZE).contains(&self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector, y grows downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Input for one tick: the latest requested direction, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeInput {
    pub direction: Option<Direction>,
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    /// Not running, nothing changed
    Ignored,
    Moved,
    /// Head landed on food, snake grew
    Ate,
    /// Hit a wall or itself, session is over
    Crashed,
}

/// Everything the renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct SnakeState {
    /// Head first
    pub snake: VecDeque<Cell>,
    /// `None` only when the snake fills the whole grid
    pub food: Option<Cell>,
    /// Direction applied on the next tick
    pub direction: Direction,
    /// Direction of the last completed move
    pub heading: Direction,
    pub score: u64,
    pub session: SessionState,
}

impl SnakeState {
    fn fresh() -> Self {
        Self {
            snake: VecDeque::from([Cell::center()]),
            food: None,
            direction: Direction::Right,
            heading: Direction::Right,
            score: 0,
            session: SessionState::Idle,
        }
    }

    pub fn head(&self) -> Cell {
        self.snake.front().copied().unwrap_or_else(Cell::center)
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }
}

/// Snake engine with injected randomness and high score store
#[derive(Debug, Clone)]
pub struct SnakeGame<R = SeededRng, S = MemoryStore> {
    state: SnakeState,
    rng: R,
    high_score: HighScore<S>,
}

impl<R: RandomSource, S: KeyValueStore> SnakeGame<R, S> {
    pub fn new(rng: R, store: S) -> Self {
        Self {
            state: SnakeState::fresh(),
            rng,
            high_score: HighScore::load(store, GameKind::Snake),
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    pub fn high_score_store(&self) -> &S {
        self.high_score.store()
    }

    /// Reset to a single cell at the center heading right
    pub fn start(&mut self) {
        let mut state = SnakeState::fresh();
        state.food = place_food(&mut self.rng, &state.snake);
        state.session = SessionState::Running;
        self.state = state;
        log::info!("Snake started, food at {:?}", self.state.food);
    }

    /// Queue a turn. Reversing onto the current heading is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.state.session.is_running() {
            return;
        }
        if direction == self.state.heading.opposite() {
            return;
        }
        self.state.direction = direction;
    }

    pub fn tick(&mut self) -> SnakeEvent {
        if !self.state.session.is_running() {
            return SnakeEvent::Ignored;
        }

        let direction = self.state.direction;
        let new_head = self.state.head().step(direction);

        if !new_head.in_bounds() || self.state.occupies(new_head) {
            self.state.session = SessionState::Over;
            self.high_score.offer(self.state.score);
            log::info!(
                "Snake crashed at ({}, {}) with score {}",
                new_head.x,
                new_head.y,
                self.state.score
            );
            return SnakeEvent::Crashed;
        }

        self.state.heading = direction;
        self.state.snake.push_front(new_head);

        if self.state.food == Some(new_head) {
            self.state.score += SNAKE_FOOD_POINTS;
            self.state.food = place_food(&mut self.rng, &self.state.snake);
            log::debug!(
                "Snake ate, length {}, food now {:?}",
                self.state.len(),
                self.state.food
            );
            SnakeEvent::Ate
        } else {
            self.state.snake.pop_back();
            SnakeEvent::Moved
        }
    }
}

impl<R: RandomSource, S: KeyValueStore> Engine for SnakeGame<R, S> {
    type Input = SnakeInput;
    type Event = SnakeEvent;

    const KIND: GameKind = GameKind::Snake;

    fn start(&mut self) {
        SnakeGame::start(self);
    }

    fn tick(&mut self, input: &SnakeInput) -> SnakeEvent {
        if let Some(direction) = input.direction {
            self.set_direction(direction);
        }
        SnakeGame::tick(self)
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

/// Pick a free cell uniformly. Rejection sampling first, then an exhaustive
/// scan once the grid is crowded enough for the draws to keep missing.
fn place_food<R: RandomSource>(rng: &mut R, snake: &VecDeque<Cell>) -> Option<Cell> {
    let size = SNAKE_GRID_SIZE as u32;
    for _ in 0..SNAKE_FOOD_ATTEMPTS {
        let cell = Cell::new(rng.next_below(size) as i32, rng.next_below(size) as i32);
        if !snake.contains(&cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..SNAKE_GRID_SIZE)
        .flat_map(|y| (0..SNAKE_GRID_SIZE).map(move |x| Cell::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();
    if free.is_empty() {
        return None;
    }
    let index = rng.next_below(free.len() as u32) as usize;
    Some(free[index])
}
