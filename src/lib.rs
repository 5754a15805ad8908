//! Karen Flyver - A side-scrolling flyer arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, boss encounter)
//! - `session`: Driver that owns the session lifecycle and dispatches events
//! - `platform`: Storage, clock and frame scheduling abstractions
//! - `highscores`: Per-player leaderboard
//! - `settings`: Persisted player preferences
//! - `audio`: Sound notifications for gameplay events
//! - `web`: Browser bindings (wasm32 only)

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{HighScoreEntry, HighScores};
pub use session::{GameSession, StartError};
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds and accelerations are per tick, positions are pixels with the origin
/// at the top-left corner of the arena, times are milliseconds.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Flyer size and spawn point
    pub const FLYER_WIDTH: f32 = 80.0;
    pub const FLYER_HEIGHT: f32 = 80.0;
    pub const FLYER_START_X: f32 = 150.0;
    pub const FLYER_START_Y: f32 = 250.0;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.1;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -4.0;
    /// Horizontal acceleration while a direction is held
    pub const FLYER_ACCELERATION: f32 = 0.2;
    /// Horizontal slow-down when no direction is held
    pub const FLYER_DECELERATION: f32 = 0.1;
    pub const FLYER_MAX_SPEED: f32 = 4.0;

    /// Obstacle column
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_GAP_HEIGHT: f32 = 350.0;
    /// Minimum distance between the gap and the top/bottom arena edge
    pub const OBSTACLE_MIN_EDGE_GAP: f32 = 50.0;
    pub const OBSTACLE_SPEED: f32 = 3.0;

    /// Collectibles
    pub const COLLECTIBLE_SPEED: f32 = 6.0;
    pub const FAVORABLE_SIZE: f32 = 120.0;
    pub const UNFAVORABLE_SIZE: f32 = 80.0;
    pub const FAVORABLE_POINTS: u64 = 5;
    pub const UNFAVORABLE_PENALTY: u64 = 1;
    /// Chance per tick that a collectible spawns
    pub const COLLECTIBLE_SPAWN_CHANCE: f32 = 0.003;
    /// Bob offset per tick is `sin(left * FREQUENCY) * AMPLITUDE`
    pub const COLLECTIBLE_BOB_FREQUENCY: f32 = 0.03;
    pub const COLLECTIBLE_BOB_AMPLITUDE: f32 = 4.0;

    /// Boss encounter
    pub const BOSS_SIZE: f32 = 200.0;
    /// Points needed since the last encounter to trigger the next one
    pub const BOSS_SCORE_INTERVAL: u64 = 50;
    /// Boss enters this far beyond the right edge
    pub const BOSS_ENTRY_OFFSET: f32 = 200.0;
    /// Boss stops approaching this far inside the right edge
    pub const BOSS_STATION_OFFSET: f32 = 200.0;
    pub const BOSS_APPROACH_SPEED: f32 = 2.0;
    pub const BOSS_VERTICAL_SPEED: f32 = 2.0;
    pub const BOSS_DURATION_MS: u64 = 30_000;
    /// How long the boss shows its firing pose after each shot
    pub const BOSS_FIRING_POSE_MS: u64 = 200;

    /// Laser beams
    pub const LASER_INTERVAL_MS: u64 = 1_500;
    pub const LASER_SPEED: f32 = 10.0;
    pub const LASER_MAX_WIDTH: f32 = 300.0;
    pub const LASER_HEIGHT: f32 = 5.0;
}
