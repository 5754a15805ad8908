//! Boss encounter state machine
//!
//! Inactive -> Approaching -> Engaged -> Inactive. Activation is score driven,
//! the end is purely time driven. Beams are owned by the boss and vanish with it.

use glam::Vec2;

use super::state::{Boss, BossPhase, LaserBeam};
use crate::consts::*;

/// Encounter triggers once the score has grown by a full interval since the last one
pub fn should_activate(score: u64, last_spawn_score: u64) -> bool {
    score >= BOSS_SCORE_INTERVAL && score.saturating_sub(last_spawn_score) >= BOSS_SCORE_INTERVAL
}

/// Boss entering from beyond the right edge, vertically centered
pub fn begin_encounter(now: u64) -> Boss {
    Boss {
        phase: BossPhase::Approaching,
        pos: Vec2::new(
            ARENA_WIDTH + BOSS_ENTRY_OFFSET,
            (ARENA_HEIGHT - BOSS_SIZE) / 2.0,
        ),
        direction: 1.0,
        encounter_start: Some(now),
        lasers: Vec::new(),
    }
}

/// Encounter has run its full duration
pub fn encounter_over(boss: &Boss, now: u64) -> bool {
    match boss.encounter_start {
        Some(start) => boss.is_active() && now.saturating_sub(start) >= BOSS_DURATION_MS,
        None => false,
    }
}

/// Move the boss one tick
///
/// Approaching: slide left until the station line, then switch to Engaged.
/// Engaged: bounce vertically between the top and bottom of the arena.
pub fn advance(boss: &Boss) -> Boss {
    let mut next = boss.clone();
    match boss.phase {
        BossPhase::Inactive => {}
        BossPhase::Approaching => {
            next.pos.x -= BOSS_APPROACH_SPEED;
            if next.pos.x <= ARENA_WIDTH - BOSS_STATION_OFFSET {
                next.phase = BossPhase::Engaged;
            }
        }
        BossPhase::Engaged => {
            let bottom = ARENA_HEIGHT - BOSS_SIZE;
            next.pos.y += BOSS_VERTICAL_SPEED * boss.direction;
            if next.pos.y <= 0.0 {
                next.pos.y = 0.0;
                next.direction = 1.0;
            } else if next.pos.y >= bottom {
                next.pos.y = bottom;
                next.direction = -1.0;
            }
        }
    }
    next
}

/// Engaged boss fires once more than an interval has passed since the last shot
pub fn laser_due(boss: &Boss, last_laser_at: u64, now: u64) -> bool {
    boss.phase == BossPhase::Engaged && now.saturating_sub(last_laser_at) > LASER_INTERVAL_MS
}

/// New zero-width beam from the boss's mouth (vertical center, left edge)
pub fn fire_laser(boss: &Boss) -> LaserBeam {
    LaserBeam {
        pos: Vec2::new(boss.pos.x, boss.pos.y + BOSS_SIZE / 2.0),
        width: 0.0,
    }
}

/// Scroll a beam left while it stretches toward its full width
pub fn advance_laser(laser: &LaserBeam) -> LaserBeam {
    LaserBeam {
        pos: Vec2::new(laser.pos.x - LASER_SPEED, laser.pos.y),
        width: (laser.width + LASER_SPEED).min(LASER_MAX_WIDTH),
    }
}

/// Beam has scrolled completely past the left edge
pub fn laser_gone(laser: &LaserBeam) -> bool {
    laser.pos.x + laser.width <= 0.0
}
