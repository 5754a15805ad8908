//! Player preferences
//!
//! Persisted separately from the high scores under their own storage key.

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::platform::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last signed-in player, restored on the next run
    pub player_name: Option<String>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Extra attenuation for the laser, which is loud at full gain
    pub laser_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            laser_volume: 0.3,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "karen_flyver_settings";

    /// Effective gain for one effect (0.0 when muted)
    pub fn volume_for(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let base = self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0);
        match effect {
            SoundEffect::LaserFired => base * self.laser_volume.clamp(0.0, 1.0),
            SoundEffect::FavorableCollected | SoundEffect::UnfavorableHit => base,
        }
    }

    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Discarding malformed settings: {}", e);
            Self::default()
        })
    }

    /// Load settings from storage
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to storage; failures are logged, not returned
    pub fn save(&self, storage: &mut dyn Storage) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match storage.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
