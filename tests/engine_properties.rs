//! Property tests for the three engines.
//!
//! Each test drives an engine with generated input sequences and checks the
//! invariants that must hold on every tick regardless of play:
//! - Snake grows by exactly one cell only when the head lands on the food and
//!   never overlaps itself while running.
//! - Pong scores at most one point per tick, only on a player return, and the
//!   ball never loses speed on a player return.
//! - Tetris score and line counts are monotonic and the level always matches
//!   the line count.
//! - High scores never decrease across restarts.

use std::collections::HashSet;

use proptest::prelude::*;
use stellarcade::sim::{
    Direction, PaddleInput, PongEvent, PongGame, SeededRng, SnakeEvent, SnakeGame, SnakeInput,
    TetrisCommand, TetrisGame, TetrisInput,
};
use stellarcade::{Engine, MemoryStore};

fn direction(code: u8) -> Option<Direction> {
    match code % 6 {
        0 => Some(Direction::Up),
        1 => Some(Direction::Down),
        2 => Some(Direction::Left),
        3 => Some(Direction::Right),
        _ => None,
    }
}

fn command(code: u8) -> Option<TetrisCommand> {
    match code % 9 {
        0 => Some(TetrisCommand::Left),
        1 => Some(TetrisCommand::Right),
        2 => Some(TetrisCommand::SoftDrop),
        3 => Some(TetrisCommand::Rotate),
        4 => Some(TetrisCommand::HardDrop),
        5 => Some(TetrisCommand::TogglePause),
        _ => None,
    }
}

#[test]
fn snake_reverse_turn_is_rejected() {
    let mut game = SnakeGame::new(SeededRng::new(1), MemoryStore::new());
    game.start();
    game.set_direction(Direction::Left);
    assert_eq!(game.state().direction, Direction::Right);
    game.tick();
    assert_eq!(game.state().direction, Direction::Right);
}

proptest! {
    #[test]
    fn snake_grows_only_on_food_and_never_overlaps(
        seed in any::<u64>(),
        moves in prop::collection::vec(any::<u8>(), 1..300),
    ) {
        let mut game = SnakeGame::new(SeededRng::new(seed), MemoryStore::new());
        game.start();

        for code in moves {
            if !game.state().session.is_running() {
                break;
            }
            let before_len = game.state().len();
            let before_food = game.state().food;

            let event = Engine::tick(&mut game, &SnakeInput { direction: direction(code) });
            let state = game.state();

            prop_assert!(state.len() >= before_len);
            match event {
                SnakeEvent::Ate => {
                    prop_assert_eq!(state.len(), before_len + 1);
                    prop_assert_eq!(Some(state.head()), before_food);
                }
                SnakeEvent::Moved => {
                    prop_assert_eq!(state.len(), before_len);
                    prop_assert_ne!(Some(state.head()), before_food);
                }
                SnakeEvent::Crashed => prop_assert!(state.session.is_over()),
                SnakeEvent::Ignored => prop_assert!(false, "running engine ignored a tick"),
            }

            if state.session.is_running() {
                let unique: HashSet<_> = state.snake.iter().collect();
                prop_assert_eq!(unique.len(), state.len());
            }
        }
    }

    #[test]
    fn pong_scores_one_point_per_player_return(
        moves in prop::collection::vec((any::<bool>(), any::<bool>()), 1..2000),
    ) {
        let mut game = PongGame::new(MemoryStore::new());
        game.start();

        for (left, right) in moves {
            if !game.state().session.is_running() {
                break;
            }
            let before = game.state().clone();
            let event = game.tick(PaddleInput { left, right });
            let after = game.state();

            match event {
                PongEvent::PlayerReturn => {
                    prop_assert_eq!(after.points, before.points + 1);
                    prop_assert!(after.ball.vel.x.abs() >= before.ball.vel.x.abs());
                    prop_assert!(after.ball.vel.y.abs() >= before.ball.vel.y.abs());
                }
                PongEvent::Missed => {
                    prop_assert_eq!(after.points, before.points);
                    prop_assert!(after.session.is_over());
                }
                _ => prop_assert_eq!(after.points, before.points),
            }
            prop_assert_eq!(Engine::score(&game), after.points * 10);
        }
    }

    #[test]
    fn tetris_counters_stay_consistent(
        seed in any::<u64>(),
        frames in prop::collection::vec((any::<u8>(), 0u32..400), 1..600),
    ) {
        let mut game = TetrisGame::new(SeededRng::new(seed), MemoryStore::new());
        game.start();

        for (code, elapsed_ms) in frames {
            if game.state().session.is_over() {
                break;
            }
            let before_score = game.state().score;
            let before_lines = game.state().lines;

            game.tick(TetrisInput { elapsed_ms, command: command(code) });
            let state = game.state();

            prop_assert!(state.score >= before_score);
            prop_assert!(state.lines >= before_lines);
            prop_assert_eq!(state.level, state.lines / 10 + 1);
            prop_assert_eq!(
                state.drop_interval_ms,
                1000u32.saturating_sub((state.level - 1) * 100).max(100)
            );
            if state.session.is_over() {
                prop_assert!(state.piece.is_none());
            }
        }
    }

    #[test]
    fn high_scores_never_decrease_across_sessions(
        seed in any::<u64>(),
        sessions in 1usize..4,
    ) {
        let mut snake = SnakeGame::new(SeededRng::new(seed), MemoryStore::new());
        let mut tetris = TetrisGame::new(SeededRng::new(seed), MemoryStore::new());
        let mut pong = PongGame::new(MemoryStore::new());

        let mut snake_best = 0;
        let mut tetris_best = 0;
        let mut pong_best = 0;

        for _ in 0..sessions {
            snake.start();
            while snake.state().session.is_running() {
                snake.tick();
            }
            prop_assert!(snake.high_score() >= snake_best);
            prop_assert!(snake.high_score() >= Engine::score(&snake));
            snake_best = snake.high_score();

            tetris.start();
            let drop = TetrisInput { elapsed_ms: 0, command: Some(TetrisCommand::HardDrop) };
            let fall = TetrisInput { elapsed_ms: 1000, command: None };
            while tetris.state().session.is_running() {
                tetris.tick(drop);
                tetris.tick(fall);
            }
            prop_assert!(tetris.high_score() >= tetris_best);
            prop_assert!(tetris.high_score() >= Engine::score(&tetris));
            tetris_best = tetris.high_score();

            pong.start();
            let idle = PaddleInput::default();
            for _ in 0..20_000 {
                if !pong.state().session.is_running() {
                    break;
                }
                pong.tick(idle);
            }
            prop_assert!(pong.high_score() >= pong_best);
            if pong.session().is_over() {
                prop_assert!(pong.high_score() >= Engine::score(&pong));
            }
            pong_best = pong.high_score();
        }
    }
}
