//! Session state and core entity types
//!
//! Everything the next tick needs (and everything a renderer draws) lives here.
//! A `SessionState` is a plain value: `step` consumes one and returns its successor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Horizontal direction the player is holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    #[default]
    None,
}

/// The player's flyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Direction held on the last tick
    pub movement: Movement,
}

impl Default for Flyer {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FLYER_START_X, FLYER_START_Y),
            vel: Vec2::ZERO,
            movement: Movement::None,
        }
    }
}

impl Flyer {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(FLYER_WIDTH, FLYER_HEIGHT))
    }
}

/// A scrolling column with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge of the column
    pub x: f32,
    /// Top edge of the gap
    pub gap_top: f32,
}

impl Default for ObstaclePair {
    fn default() -> Self {
        Self {
            x: ARENA_WIDTH,
            gap_top: (ARENA_HEIGHT - OBSTACLE_GAP_HEIGHT) / 2.0,
        }
    }
}

impl ObstaclePair {
    /// Bottom edge of the gap
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + OBSTACLE_GAP_HEIGHT
    }

    /// Column has scrolled completely past the left edge
    pub fn is_past(&self) -> bool {
        self.x <= -OBSTACLE_WIDTH
    }
}

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Large, worth points
    Favorable,
    /// Small, costs a point
    Unfavorable,
}

impl CollectibleKind {
    /// Side length of the (square) collectible
    pub fn size(self) -> f32 {
        match self {
            CollectibleKind::Favorable => FAVORABLE_SIZE,
            CollectibleKind::Unfavorable => UNFAVORABLE_SIZE,
        }
    }
}

/// A bobbing bonus or penalty item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Top-left corner
    pub pos: Vec2,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn rect(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.pos, Vec2::splat(size))
    }
}

/// Boss encounter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossPhase {
    /// No encounter running
    #[default]
    Inactive,
    /// Sliding in from beyond the right edge
    Approaching,
    /// At station: oscillating and firing
    Engaged,
}

/// A laser beam fired by the boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserBeam {
    /// Left end of the beam
    pub pos: Vec2,
    pub width: f32,
}

impl LaserBeam {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, LASER_HEIGHT))
    }
}

/// The boss and the beams it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub phase: BossPhase,
    /// Top-left corner
    pub pos: Vec2,
    /// +1.0 moving down, -1.0 moving up
    pub direction: f32,
    /// Timestamp (ms) the current encounter started
    pub encounter_start: Option<u64>,
    pub lasers: Vec<LaserBeam>,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            phase: BossPhase::Inactive,
            pos: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT / 2.0),
            direction: 1.0,
            encounter_start: None,
            lasers: Vec::new(),
        }
    }
}

impl Boss {
    pub fn is_active(&self) -> bool {
        self.phase != BossPhase::Inactive
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(BOSS_SIZE))
    }
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    /// Touched the top or bottom of the arena
    ArenaEdge,
    /// Hit the obstacle outside its gap
    Obstacle,
    Laser,
    BossBody,
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Obstacle respawned: one point
    ObstaclePassed,
    FavorableCollected,
    UnfavorableHit,
    LaserFired,
    EncounterStarted,
    EncounterEnded,
    /// The run is over; `final_score` is the score at the moment of the hit
    SessionEnded {
        final_score: u64,
        cause: TerminalCause,
    },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// False until the driver starts a run, and again after a terminal event
    pub started: bool,
    pub flyer: Flyer,
    pub obstacle: ObstaclePair,
    /// Active collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    pub boss: Boss,
    pub score: u64,
    /// Score at which the last encounter ended (0 before the first one)
    pub last_boss_spawn_score: u64,
    /// Timestamp (ms) of the last laser emission
    pub last_laser_at: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// The canonical initial state (not started)
    pub fn new() -> Self {
        Self {
            started: false,
            flyer: Flyer::default(),
            obstacle: ObstaclePair::default(),
            collectibles: Vec::new(),
            boss: Boss::default(),
            score: 0,
            last_boss_spawn_score: 0,
            last_laser_at: 0,
        }
    }

    /// Fresh state with the run started
    pub fn started() -> Self {
        Self {
            started: true,
            ..Self::new()
        }
    }

    /// Score at which the next boss encounter triggers
    pub fn next_boss_score(&self) -> u64 {
        self.last_boss_spawn_score + BOSS_SCORE_INTERVAL
    }

    /// Whether the boss should be drawn in its firing pose at `now`
    pub fn boss_firing(&self, now: u64) -> bool {
        self.boss.phase == BossPhase::Engaged
            && !self.boss.lasers.is_empty()
            && now.saturating_sub(self.last_laser_at) < BOSS_FIRING_POSE_MS
    }
}
