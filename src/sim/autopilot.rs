//! Idle/demo mode - the flyer plays itself
//!
//! Hops whenever it sinks below a target height: the middle of the obstacle
//! gap normally, or the half of the arena away from the boss's mouth.

use super::state::{Movement, SessionState};
use super::tick::Intent;
use crate::consts::*;

/// Target height when hiding above the beams
const HIGH_LANE: f32 = 100.0;
/// Target height when hiding below the beams
const LOW_LANE: f32 = ARENA_HEIGHT - FLYER_HEIGHT - 20.0;
/// Dead zone around the home column
const HOME_TOLERANCE: f32 = 10.0;

/// Pick this tick's intent from the current state
pub fn autopilot(state: &SessionState) -> Intent {
    let flyer = &state.flyer;

    let target_y = if state.boss.is_active() {
        let mouth = state.boss.pos.y + BOSS_SIZE / 2.0;
        if mouth > ARENA_HEIGHT / 2.0 {
            HIGH_LANE
        } else {
            LOW_LANE
        }
    } else {
        state.obstacle.gap_top + (OBSTACLE_GAP_HEIGHT - FLYER_HEIGHT) / 2.0
    };

    // Each hop rises ~80px, so hopping on the way down keeps it just above target
    let jump = flyer.pos.y > target_y && flyer.vel.y > 0.0;

    // Drift back to the start column
    let movement = if flyer.pos.x < FLYER_START_X - HOME_TOLERANCE {
        Movement::Right
    } else if flyer.pos.x > FLYER_START_X + HOME_TOLERANCE {
        Movement::Left
    } else {
        Movement::None
    };

    Intent { movement, jump }
}
