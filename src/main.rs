//! Stellarcade entry point
//!
//! In the browser the engines are driven from JavaScript through the handles in
//! `platform::web`. Natively there is no window; the binary runs a headless
//! attract-mode session of each game with a simple autopilot and submits the
//! results to an in-memory ledger.

#[cfg(not(target_arch = "wasm32"))]
mod attract {
    use stellarcade::sim::{
        Cell, Direction, Engine, PaddleInput, PongGame, SeededRng, SnakeGame, SnakeInput,
        TetrisCommand, TetrisGame, TetrisInput,
    };
    use stellarcade::{InMemoryLedger, Ledger, MemoryStore, ScoreSubmission, SubmissionGuard};

    /// Hard cap on ticks per demo session
    const MAX_TICKS: u32 = 20_000;

    /// Run an engine until it ends or the tick cap is hit
    fn run<E: Engine>(engine: &mut E, mut autopilot: impl FnMut(&E) -> E::Input) -> u32 {
        engine.start();
        let mut ticks = 0;
        while engine.session().is_running() && ticks < MAX_TICKS {
            let input = autopilot(engine);
            engine.tick(&input);
            ticks += 1;
        }
        ticks
    }

    /// Turn toward the food, avoiding immediate walls and body cells
    fn snake_pilot(game: &SnakeGame) -> SnakeInput {
        let state = game.state();
        let head = state.head();
        let safe = |d: Direction| {
            let next = head.step(d);
            d != state.heading.opposite() && next.in_bounds() && !state.occupies(next)
        };

        let target = state.food.unwrap_or_else(Cell::center);
        let preferred = [
            (target.x > head.x, Direction::Right),
            (target.x < head.x, Direction::Left),
            (target.y > head.y, Direction::Down),
            (target.y < head.y, Direction::Up),
        ];
        let direction = preferred
            .iter()
            .filter(|(wanted, _)| *wanted)
            .map(|&(_, d)| d)
            .chain([Direction::Up, Direction::Right, Direction::Down, Direction::Left])
            .find(|&d| safe(d));

        SnakeInput { direction }
    }

    /// Keep the paddle under the ball
    fn pong_pilot(game: &PongGame) -> PaddleInput {
        let state = game.state();
        let paddle = state.player.center();
        let ball = state.ball.center_x();
        PaddleInput {
            left: ball < paddle - 10.0,
            right: ball > paddle + 10.0,
        }
    }

    /// Slide the piece toward the emptiest column, then drop it
    fn tetris_pilot(game: &TetrisGame) -> TetrisInput {
        let state = game.state();
        let command = state.piece.map(|piece| {
            let target = (0..10i32)
                .min_by_key(|&x| {
                    state
                        .board
                        .rows()
                        .iter()
                        .filter(|row| row[x as usize] != 0)
                        .count()
                })
                .unwrap_or(0);
            match piece.x.cmp(&target) {
                std::cmp::Ordering::Greater => TetrisCommand::Left,
                std::cmp::Ordering::Less => TetrisCommand::Right,
                std::cmp::Ordering::Equal => TetrisCommand::HardDrop,
            }
        });
        TetrisInput {
            elapsed_ms: 16,
            command,
        }
    }

    fn submit<E: Engine>(ledger: &mut InMemoryLedger, engine: &E, ticks: u32) {
        log::info!(
            "{} demo finished after {} ticks: score {}, best {}",
            E::KIND,
            ticks,
            engine.score(),
            engine.high_score()
        );
        let Some(entry) = ScoreSubmission::from_engine(engine, "demo-player", "Autopilot") else {
            log::info!("{} demo hit the tick cap, nothing to submit", E::KIND);
            return;
        };
        let mut guard = SubmissionGuard::new();
        if let Err(e) = guard.submit(ledger, &entry) {
            log::warn!("Demo submission failed: {}", e);
        }
    }

    pub fn run_all(seed: u64) {
        let mut ledger = InMemoryLedger::new();

        let mut snake = SnakeGame::new(SeededRng::new(seed), MemoryStore::new());
        let ticks = run(&mut snake, snake_pilot);
        submit(&mut ledger, &snake, ticks);

        let mut pong = PongGame::new(MemoryStore::new());
        let ticks = run(&mut pong, pong_pilot);
        submit(&mut ledger, &pong, ticks);

        let mut tetris = TetrisGame::new(SeededRng::new(seed), MemoryStore::new());
        let ticks = run(&mut tetris, tetris_pilot);
        submit(&mut ledger, &tetris, ticks);

        for kind in stellarcade::GameKind::ALL {
            match ledger.top_score(kind) {
                Ok(Some(top)) => log::info!("{} leader: {} ({})", kind, top.username, top.score),
                Ok(None) => log::info!("{} leaderboard empty", kind),
                Err(e) => log::warn!("{} leaderboard unavailable: {}", kind, e),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let settings = stellarcade::Settings::default();
    env_logger::Builder::new()
        .filter_level(settings.level_filter())
        .parse_default_env()
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5eed);
    log::info!("Stellarcade (native) attract mode, seed {}", seed);
    log::info!("Browser builds drive the engines through wasm-bindgen handles");
    attract::run_all(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry is `platform::web::wasm_start`
}
