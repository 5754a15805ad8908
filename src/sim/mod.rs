//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in, never read
//! - Randomness comes from the caller's generator
//! - Stable iteration order (spawn order)
//! - No audio, storage or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::Rect;
pub use state::{
    Boss, BossPhase, Collectible, CollectibleKind, Flyer, GameEvent, LaserBeam, Movement,
    ObstaclePair, SessionState, TerminalCause,
};
pub use tick::{Intent, Tick, step};

#[cfg(test)]
pub(crate) mod test_support {
    use rand::RngCore;

    /// Generator that replays a fixed list of `u64` values (cycling)
    ///
    /// `0` passes every probability roll and picks the low end of ranges,
    /// `u64::MAX` fails every roll and picks the high end.
    pub struct ScriptedRng {
        values: Vec<u64>,
        index: usize,
    }

    impl ScriptedRng {
        pub fn new(values: Vec<u64>) -> Self {
            assert!(!values.is_empty());
            Self { values, index: 0 }
        }

        /// Every roll succeeds
        pub fn always() -> Self {
            Self::new(vec![0])
        }

        /// Every roll fails
        pub fn never() -> Self {
            Self::new(vec![u64::MAX])
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.values[self.index % self.values.len()];
            self.index += 1;
            value
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }
}
