//! Flyer kinematics
//!
//! Arcade motion: per-tick gravity and jump impulse vertically, accelerate /
//! decelerate toward a capped speed horizontally. Positions are clamped to the
//! arena; velocities are not touched by the clamp.

use glam::Vec2;

use super::state::{Flyer, Movement};
use crate::consts::*;

/// Advance the flyer by one tick
///
/// `jump` replaces this tick's gravity accumulation with the jump velocity.
pub fn integrate(flyer: &Flyer, movement: Movement, jump: bool) -> Flyer {
    let vel_y = if jump {
        JUMP_VELOCITY
    } else {
        flyer.vel.y + GRAVITY
    };
    let pos_y = (flyer.pos.y + vel_y).clamp(0.0, ARENA_HEIGHT - FLYER_HEIGHT);

    let vel_x = horizontal_velocity(flyer.vel.x, movement);
    let pos_x = (flyer.pos.x + vel_x).clamp(0.0, ARENA_WIDTH - FLYER_WIDTH);

    Flyer {
        pos: Vec2::new(pos_x, pos_y),
        vel: Vec2::new(vel_x, vel_y),
        movement,
    }
}

/// Accelerate toward the held direction, or bleed speed off toward zero
fn horizontal_velocity(vel: f32, movement: Movement) -> f32 {
    match movement {
        Movement::Left => (vel - FLYER_ACCELERATION).max(-FLYER_MAX_SPEED),
        Movement::Right => (vel + FLYER_ACCELERATION).min(FLYER_MAX_SPEED),
        Movement::None if vel > 0.0 => (vel - FLYER_DECELERATION).max(0.0),
        Movement::None if vel < 0.0 => (vel + FLYER_DECELERATION).min(0.0),
        Movement::None => 0.0,
    }
}
