//! Collision detection and response for the paddle field
//!
//! The ball is an axis-aligned box tracked by its top-left corner. Contacts are
//! tested after integration, so a fast ball may sit slightly inside a paddle's
//! band; responses reposition it just outside before reflecting.

use glam::Vec2;

use crate::consts::*;

/// Which side wall the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// Check the left/right walls
pub fn side_wall_contact(pos: Vec2) -> Option<WallSide> {
    if pos.x <= 0.0 {
        Some(WallSide::Left)
    } else if pos.x >= PONG_WIDTH - PONG_BALL_SIZE {
        Some(WallSide::Right)
    } else {
        None
    }
}

/// Bounce off a side wall: clamp back into the field and point vx away from it
pub fn reflect_off_side_wall(pos: &mut Vec2, vel: &mut Vec2, side: WallSide) {
    match side {
        WallSide::Left => {
            pos.x = 0.0;
            vel.x = vel.x.abs();
        }
        WallSide::Right => {
            pos.x = PONG_WIDTH - PONG_BALL_SIZE;
            vel.x = -vel.x.abs();
        }
    }
}

/// Ball's left edge lies within the paddle span
pub fn overlaps_paddle(ball_x: f32, paddle_x: f32) -> bool {
    ball_x >= paddle_x && ball_x <= paddle_x + PONG_PADDLE_WIDTH
}

/// Signed distance of the ball from the paddle center (negative = left half)
pub fn paddle_offset(ball_x: f32, paddle_x: f32) -> f32 {
    (ball_x - paddle_x) - PONG_PADDLE_WIDTH / 2.0
}

/// Ball moving up into the opponent paddle's band
pub fn opponent_contact(pos: Vec2, vel: Vec2, opponent_x: f32) -> bool {
    vel.y < 0.0 && pos.y <= PONG_OPPONENT_CONTACT_Y && overlaps_paddle(pos.x, opponent_x)
}

/// Ball's bottom edge reaching the player paddle line while moving down
pub fn player_contact(pos: Vec2, vel: Vec2, player_x: f32) -> bool {
    vel.y > 0.0
        && pos.y + PONG_BALL_SIZE >= PONG_PLAYER_LINE_Y
        && overlaps_paddle(pos.x, player_x)
}

/// Horizontal velocity after an angled return
pub fn angled_return(vx: f32, offset: f32) -> f32 {
    vx + offset * PONG_ENGLISH
}

/// Angled return whose magnitude never drops below `floor`.
/// The offset still steers the ball, including flipping its direction.
pub fn steered_return(vx: f32, offset: f32, floor: f32) -> f32 {
    let steered = angled_return(vx, offset);
    if steered.abs() < floor {
        floor.copysign(steered)
    } else {
        steered
    }
}
