//! Obstacle and collectible generation
//!
//! All randomness comes from the caller's generator so a seeded run replays
//! identically.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, CollectibleKind, ObstaclePair};
use crate::consts::*;

/// Draw a gap top that keeps the whole gap inside the edge margins
pub fn random_gap_top<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let low = OBSTACLE_MIN_EDGE_GAP;
    let high = ARENA_HEIGHT - OBSTACLE_MIN_EDGE_GAP - OBSTACLE_GAP_HEIGHT;
    if high <= low {
        return low;
    }
    rng.random_range(low..=high)
}

/// Scroll the obstacle one tick, respawning it at the right edge once it has
/// fully left the arena
///
/// Returns the moved obstacle and whether it respawned (one point scored).
pub fn advance_obstacle<R: Rng + ?Sized>(obstacle: &ObstaclePair, rng: &mut R) -> (ObstaclePair, bool) {
    let moved = ObstaclePair {
        x: obstacle.x - OBSTACLE_SPEED,
        gap_top: obstacle.gap_top,
    };
    if moved.is_past() {
        let respawned = ObstaclePair {
            x: ARENA_WIDTH,
            gap_top: random_gap_top(rng),
        };
        (respawned, true)
    } else {
        (moved, false)
    }
}

/// Scroll a collectible left while it bobs on a sine of its horizontal position
pub fn advance_collectible(collectible: &Collectible) -> Collectible {
    let size = collectible.kind.size();
    let bob = (collectible.pos.x * COLLECTIBLE_BOB_FREQUENCY).sin() * COLLECTIBLE_BOB_AMPLITUDE;
    let top = (collectible.pos.y + bob).clamp(0.0, ARENA_HEIGHT - size);
    Collectible {
        pos: Vec2::new(collectible.pos.x - COLLECTIBLE_SPEED, top),
        kind: collectible.kind,
    }
}

/// Collectible has scrolled completely past the left edge
pub fn is_offscreen(collectible: &Collectible) -> bool {
    collectible.pos.x + collectible.kind.size() <= 0.0
}

/// Roll for this tick's collectible spawn
pub fn roll_collectible<R: Rng + ?Sized>(rng: &mut R) -> Option<Collectible> {
    if rng.random::<f32>() >= COLLECTIBLE_SPAWN_CHANCE {
        return None;
    }

    let kind = if rng.random_bool(0.5) {
        CollectibleKind::Favorable
    } else {
        CollectibleKind::Unfavorable
    };
    let top = rng.random_range(0.0..ARENA_HEIGHT - kind.size());

    Some(Collectible {
        pos: Vec2::new(ARENA_WIDTH, top),
        kind,
    })
}
