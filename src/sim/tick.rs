//! Per-frame simulation step
//!
//! One call advances the whole session: flyer physics, obstacle and
//! collectible traffic (or the boss encounter), collisions and scoring. A
//! terminal collision replaces the state with the canonical initial state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boss;
use super::collision::{
    Rect, hits_arena_edge, hits_boss, hits_collectible, hits_laser, hits_obstacle,
};
use super::physics::integrate;
use super::spawn;
use super::state::{
    Boss, CollectibleKind, GameEvent, Movement, ObstaclePair, SessionState, TerminalCause,
};
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Held direction (level-triggered)
    pub movement: Movement,
    /// Jump this tick (edge-triggered, the driver clears it after use)
    pub jump: bool,
}

/// Result of one step: the successor state and what happened on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub state: SessionState,
    pub events: Vec<GameEvent>,
}

impl Tick {
    /// Final score and cause if this tick ended the session
    pub fn session_end(&self) -> Option<(u64, TerminalCause)> {
        self.events.iter().find_map(|event| match *event {
            GameEvent::SessionEnded { final_score, cause } => Some((final_score, cause)),
            _ => None,
        })
    }
}

/// Advance the session by one tick
///
/// `now` is the caller's wall-clock time in milliseconds. A state that is not
/// started is returned untouched.
pub fn step<R: Rng + ?Sized>(mut state: SessionState, intent: &Intent, now: u64, rng: &mut R) -> Tick {
    let mut events = Vec::new();
    if !state.started {
        return Tick { state, events };
    }

    state.flyer = integrate(&state.flyer, intent.movement, intent.jump);
    let flyer = state.flyer.rect();

    if !state.boss.is_active() && boss::should_activate(state.score, state.last_boss_spawn_score) {
        start_encounter(&mut state, now);
        events.push(GameEvent::EncounterStarted);
    }

    let hit = if state.boss.is_active() {
        run_encounter(&mut state, &flyer, now, &mut events)
    } else {
        run_course(&mut state, &flyer, rng, &mut events)
    };
    let terminal = hit.or_else(|| hits_arena_edge(&flyer).then_some(TerminalCause::ArenaEdge));

    if let Some(cause) = terminal {
        let final_score = state.score;
        log::info!("Session ended by {:?} with score {}", cause, final_score);
        events.push(GameEvent::SessionEnded { final_score, cause });
        return Tick {
            state: SessionState::new(),
            events,
        };
    }

    Tick { state, events }
}

/// Clear the course and bring the boss in
fn start_encounter(state: &mut SessionState, now: u64) {
    log::info!("Boss encounter started at score {}", state.score);
    state.collectibles.clear();
    state.obstacle = ObstaclePair {
        x: ARENA_WIDTH,
        ..state.obstacle
    };
    state.boss = boss::begin_encounter(now);
}

/// Boss phase: movement, beams, and boss/beam collisions
fn run_encounter(
    state: &mut SessionState,
    flyer: &Rect,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> Option<TerminalCause> {
    if boss::encounter_over(&state.boss, now) {
        log::info!("Boss encounter ended at score {}", state.score);
        state.boss = Boss::default();
        state.last_boss_spawn_score = state.score;
        events.push(GameEvent::EncounterEnded);
        return None;
    }

    state.boss = boss::advance(&state.boss);

    if boss::laser_due(&state.boss, state.last_laser_at, now) {
        let laser = boss::fire_laser(&state.boss);
        state.boss.lasers.push(laser);
        state.last_laser_at = now;
        events.push(GameEvent::LaserFired);
    }

    state.boss.lasers = state
        .boss
        .lasers
        .iter()
        .map(boss::advance_laser)
        .filter(|laser| !boss::laser_gone(laser))
        .collect();

    if hits_laser(flyer, &state.boss.lasers) {
        Some(TerminalCause::Laser)
    } else if hits_boss(flyer, &state.boss) {
        Some(TerminalCause::BossBody)
    } else {
        None
    }
}

/// Regular phase: obstacle scroll/respawn, collectibles, obstacle collision
fn run_course<R: Rng + ?Sized>(
    state: &mut SessionState,
    flyer: &Rect,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<TerminalCause> {
    let (obstacle, passed) = spawn::advance_obstacle(&state.obstacle, rng);
    state.obstacle = obstacle;
    if passed {
        state.score += 1;
        events.push(GameEvent::ObstaclePassed);
    }

    let mut kept = Vec::with_capacity(state.collectibles.len() + 1);
    for collectible in state.collectibles.iter().map(spawn::advance_collectible) {
        if hits_collectible(flyer, &collectible) {
            match collectible.kind {
                CollectibleKind::Favorable => {
                    state.score += FAVORABLE_POINTS;
                    events.push(GameEvent::FavorableCollected);
                }
                CollectibleKind::Unfavorable => {
                    state.score = state.score.saturating_sub(UNFAVORABLE_PENALTY);
                    events.push(GameEvent::UnfavorableHit);
                }
            }
        } else if !spawn::is_offscreen(&collectible) {
            kept.push(collectible);
        }
    }
    if let Some(collectible) = spawn::roll_collectible(rng) {
        kept.push(collectible);
    }
    state.collectibles = kept;

    hits_obstacle(flyer, &state.obstacle).then_some(TerminalCause::Obstacle)
}
