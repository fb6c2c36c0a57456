//! Paddle and ball
//!
//! Vertical Pong: the opponent guards the top edge, the player guards the
//! bottom. Every player return is a point and speeds the ball up; the first
//! miss at the bottom ends the session. The opponent is a perfect tracker, so
//! the ball never escapes at the top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    angled_return, opponent_contact, paddle_offset, player_contact, reflect_off_side_wall,
    side_wall_contact, steered_return,
};
use super::state::{Engine, GameKind, SessionState};
use crate::consts::*;
use crate::highscores::{HighScore, KeyValueStore, MemoryStore};

/// Held keys, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleInput {
    pub left: bool,
    pub right: bool,
}

/// A paddle's horizontal position (left edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (PONG_WIDTH - PONG_PADDLE_WIDTH) / 2.0,
        }
    }
}

impl Paddle {
    pub fn center(&self) -> f32 {
        self.x + PONG_PADDLE_WIDTH / 2.0
    }

    /// Move horizontally, clamped to the field
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, PONG_WIDTH - PONG_PADDLE_WIDTH);
    }

    /// Step toward a target x by at most `speed`
    pub fn follow(&mut self, target_x: f32, speed: f32) {
        let center = self.center();
        if target_x < center {
            self.shift(-speed);
        } else if target_x > center {
            self.shift(speed);
        }
    }
}

/// The ball: top-left corner plus per-tick velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PONG_WIDTH / 2.0, PONG_HEIGHT / 2.0),
            vel: Vec2::new(PONG_BALL_START_VX, PONG_BALL_START_VY),
        }
    }
}

impl Ball {
    pub fn center_x(&self) -> f32 {
        self.pos.x + PONG_BALL_SIZE / 2.0
    }
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongEvent {
    /// Not running, nothing changed
    Ignored,
    Moved,
    /// Opponent paddle sent the ball back down
    OpponentReturn,
    /// Player paddle returned the ball, one point scored
    PlayerReturn,
    /// Ball passed the player, session is over
    Missed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PongState {
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    /// Internal point counter, one per player return
    pub points: u64,
    pub session: SessionState,
}

impl PongState {
    /// Score shown on screen and submitted to the ledger
    pub fn display_score(&self) -> u64 {
        self.points * PONG_DISPLAY_MULTIPLIER
    }
}

/// Pong engine. Deterministic, so no random source.
#[derive(Debug, Clone)]
pub struct PongGame<S = MemoryStore> {
    state: PongState,
    high_score: HighScore<S>,
}

impl<S: KeyValueStore> PongGame<S> {
    pub fn new(store: S) -> Self {
        Self {
            state: PongState::default(),
            high_score: HighScore::load(store, GameKind::Pong),
        }
    }

    pub fn state(&self) -> &PongState {
        &self.state
    }

    /// Best raw point count (displayed ×10, like the score)
    pub fn high_points(&self) -> u64 {
        self.high_score.best()
    }

    pub fn high_score_store(&self) -> &S {
        self.high_score.store()
    }

    /// Center both paddles and serve from the middle toward the opponent
    pub fn start(&mut self) {
        self.state = PongState {
            session: SessionState::Running,
            ..PongState::default()
        };
        log::info!("Pong started");
    }

    pub fn tick(&mut self, input: PaddleInput) -> PongEvent {
        if !self.state.session.is_running() {
            return PongEvent::Ignored;
        }
        let s = &mut self.state;

        if input.left {
            s.player.shift(-PONG_PADDLE_SPEED);
        }
        if input.right {
            s.player.shift(PONG_PADDLE_SPEED);
        }

        // Opponent follows where the ball is now, before it moves
        s.opponent.follow(s.ball.center_x(), PONG_OPPONENT_SPEED);

        s.ball.pos += s.ball.vel;

        if let Some(side) = side_wall_contact(s.ball.pos) {
            reflect_off_side_wall(&mut s.ball.pos, &mut s.ball.vel, side);
        }

        let mut event = PongEvent::Moved;

        if opponent_contact(s.ball.pos, s.ball.vel, s.opponent.x) {
            s.ball.vel.y = s.ball.vel.y.abs();
            s.ball.pos.y = PONG_OPPONENT_CONTACT_Y;
            let offset = paddle_offset(s.ball.pos.x, s.opponent.x);
            s.ball.vel.x = angled_return(s.ball.vel.x, offset);
            event = PongEvent::OpponentReturn;
        }

        if player_contact(s.ball.pos, s.ball.vel, s.player.x) {
            let prior_vx = s.ball.vel.x.abs();
            s.ball.vel.y = -s.ball.vel.y.abs();
            s.ball.pos.y = PONG_PLAYER_LINE_Y - PONG_BALL_SIZE;
            s.ball.vel *= PONG_SPEEDUP;
            let offset = paddle_offset(s.ball.pos.x, s.player.x);
            s.ball.vel.x = steered_return(s.ball.vel.x, offset, prior_vx);
            s.points += 1;
            log::debug!("Player return #{}, ball velocity {:?}", s.points, s.ball.vel);
            event = PongEvent::PlayerReturn;
        }

        // Past the opponent: just bounce
        if s.ball.pos.y <= 0.0 {
            s.ball.vel.y = s.ball.vel.y.abs();
            s.ball.pos.y = 0.0;
        }

        if s.ball.pos.y >= PONG_HEIGHT - PONG_BALL_SIZE {
            s.session = SessionState::Over;
            let points = s.points;
            let display = s.display_score();
            self.high_score.offer(points);
            log::info!("Pong over with score {}", display);
            return PongEvent::Missed;
        }

        event
    }
}

impl<S: KeyValueStore> Engine for PongGame<S> {
    type Input = PaddleInput;
    type Event = PongEvent;

    const KIND: GameKind = GameKind::Pong;

    fn start(&mut self) {
        PongGame::start(self);
    }

    fn tick(&mut self, input: &PaddleInput) -> PongEvent {
        PongGame::tick(self, *input)
    }

    fn session(&self) -> SessionState {
        self.state.session
    }

    fn score(&self) -> u64 {
        self.state.display_score()
    }

    fn high_score(&self) -> u64 {
        self.high_score.best() * PONG_DISPLAY_MULTIPLIER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> PongGame {
        let mut game = PongGame::new(MemoryStore::new());
        game.start();
        game
    }

    /// Place the ball just above the player line, falling straight down
    fn drop_ball_at(game: &mut PongGame, x: f32) {
        game.state.ball.pos = Vec2::new(x, 450.0);
        game.state.ball.vel = Vec2::new(0.0, 6.0);
        game.state.player.x = 300.0;
    }

    #[test]
    fn test_start_centers_everything() {
        let game = running();
        let state = game.state();
        assert_eq!(state.session, SessionState::Running);
        assert_eq!(state.player.x, 300.0);
        assert_eq!(state.opponent.x, 300.0);
        assert_eq!(state.ball.pos, Vec2::new(350.0, 240.0));
        assert_eq!(state.ball.vel, Vec2::new(6.0, -6.0));
        assert_eq!(state.points, 0);
    }

    #[test]
    fn test_idle_game_ignores_ticks() {
        let mut game = PongGame::new(MemoryStore::new());
        assert_eq!(game.tick(PaddleInput::default()), PongEvent::Ignored);
        assert_eq!(game.state().ball.pos, Vec2::new(350.0, 240.0));
    }

    #[test]
    fn test_player_paddle_moves_and_clamps() {
        let mut game = running();
        let left = PaddleInput {
            left: true,
            right: false,
        };
        game.tick(left);
        assert_eq!(game.state().player.x, 292.0);

        game.state.player.x = 3.0;
        game.tick(left);
        assert_eq!(game.state().player.x, 0.0);

        game.state.player.x = 598.0;
        game.tick(PaddleInput {
            left: false,
            right: true,
        });
        assert_eq!(game.state().player.x, 600.0);
    }

    #[test]
    fn test_both_keys_cancel_out() {
        let mut game = running();
        game.tick(PaddleInput {
            left: true,
            right: true,
        });
        assert_eq!(game.state().player.x, 300.0);
    }

    #[test]
    fn test_opponent_tracks_ball() {
        let mut game = running();
        game.state.ball.pos.x = 100.0;
        game.tick(PaddleInput::default());
        assert_eq!(game.state().opponent.x, 292.0);

        game.state.ball.pos.x = 600.0;
        game.tick(PaddleInput::default());
        assert_eq!(game.state().opponent.x, 300.0);
    }

    #[test]
    fn test_ball_integrates_velocity() {
        let mut game = running();
        assert_eq!(game.tick(PaddleInput::default()), PongEvent::Moved);
        assert_eq!(game.state().ball.pos, Vec2::new(356.0, 234.0));
    }

    #[test]
    fn test_side_wall_reflects() {
        let mut game = running();
        game.state.ball.pos = Vec2::new(3.0, 200.0);
        game.state.ball.vel = Vec2::new(-6.0, 6.0);
        game.tick(PaddleInput::default());
        assert_eq!(game.state().ball.pos.x, 0.0);
        assert_eq!(game.state().ball.vel.x, 6.0);
    }

    #[test]
    fn test_player_return_scores_and_speeds_up() {
        let mut game = running();
        drop_ball_at(&mut game, 350.0);
        assert_eq!(game.tick(PaddleInput::default()), PongEvent::PlayerReturn);

        let state = game.state();
        assert_eq!(state.points, 1);
        assert_eq!(state.display_score(), 10);
        assert_eq!(state.ball.pos.y, 454.0);
        assert!(state.ball.vel.y < 0.0);
        assert!(state.ball.vel.y.abs() > 6.0);
    }

    #[test]
    fn test_miss_ends_session() {
        let mut game = running();
        drop_ball_at(&mut game, 450.0);
        let mut last = PongEvent::Moved;
        for _ in 0..10 {
            last = game.tick(PaddleInput::default());
            if last == PongEvent::Missed {
                break;
            }
        }
        assert_eq!(last, PongEvent::Missed);
        assert_eq!(game.state().session, SessionState::Over);
        assert_eq!(game.state().points, 0);
        assert_eq!(game.tick(PaddleInput::default()), PongEvent::Ignored);
    }

    #[test]
    fn test_player_return_never_slows_ball() {
        for x in [300.0, 310.0, 340.0, 350.0, 380.0, 400.0] {
            for vx in [-8.0, -3.0, 0.0, 2.5, 6.0] {
                let mut game = running();
                drop_ball_at(&mut game, x);
                // Lands on `x` after this tick's integration
                game.state.ball.pos.x = x - vx;
                game.state.ball.vel.x = vx;
                let before = game.state.ball.vel;
                assert_eq!(game.tick(PaddleInput::default()), PongEvent::PlayerReturn);
                let after = game.state().ball.vel;
                assert!(after.x.abs() >= before.x.abs(), "x={x} vx={vx}");
                assert!(after.y.abs() >= before.y.abs(), "x={x} vx={vx}");
            }
        }
    }

    #[test]
    fn test_opponent_return_sends_ball_down() {
        let mut game = running();
        game.state.opponent.x = 300.0;
        game.state.ball.pos = Vec2::new(340.0, 20.0);
        game.state.ball.vel = Vec2::new(0.0, -6.0);
        assert_eq!(game.tick(PaddleInput::default()), PongEvent::OpponentReturn);
        let state = game.state();
        assert_eq!(state.ball.pos.y, PONG_OPPONENT_CONTACT_Y);
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.points, 0);
    }

    #[test]
    fn test_top_edge_bounces_without_score() {
        let mut game = running();
        game.state.opponent.x = 0.0;
        game.state.ball.pos = Vec2::new(600.0, 3.0);
        game.state.ball.vel = Vec2::new(0.0, -6.0);
        // Opponent is far away, ball reaches the top edge
        game.tick(PaddleInput::default());
        let state = game.state();
        assert_eq!(state.ball.pos.y, 0.0);
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.session, SessionState::Running);
        assert_eq!(state.points, 0);
    }

    #[test]
    fn test_high_score_stores_raw_points() {
        let mut game = running();
        drop_ball_at(&mut game, 350.0);
        game.tick(PaddleInput::default());
        drop_ball_at(&mut game, 450.0);
        while game.tick(PaddleInput::default()) != PongEvent::Missed {}
        assert_eq!(game.high_points(), 1);
        assert_eq!(Engine::high_score(&game), 10);
        assert_eq!(Engine::score(&game), 10);
        assert_eq!(
            game.high_score_store().get("pongHighScore").as_deref(),
            Some("1")
        );
    }
}
