//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock in milliseconds)
//! - Frame scheduling with explicit start/stop
//! - Storage (LocalStorage on web, JSON files on native)
//! - Logger setup

pub mod clock;
pub mod scheduler;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{Scheduler, SteppedScheduler};
pub use storage::{MemoryStorage, Storage, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use scheduler::FixedRateScheduler;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Route `log` output to the browser console and panics to `console.error`
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {e}").into());
    }
}

/// Route `log` output to stderr (RUST_LOG overrides the default `info` level)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Logger already initialized: {e}");
    }
}
