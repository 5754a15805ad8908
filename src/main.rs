//! Karen Flyver entry point
//!
//! Native builds run a headless attract-mode game driven by the autopilot and
//! print the leaderboard afterwards. The browser build starts from `web.rs`.
//!
//! Environment:
//! - `FLYVER_DATA_DIR`: where settings and high scores live (default `.karen-flyver`)
//! - `FLYVER_SEED`: fixed RNG seed
//! - `FLYVER_FRAMES`: frame cap (default 3600)
//! - `FLYVER_REALTIME`: set to pace frames at 60 Hz instead of running flat out

#[cfg(not(target_arch = "wasm32"))]
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use karen_flyver::GameSession;
    use karen_flyver::audio::LogAudio;
    use karen_flyver::platform::{
        FileStorage, FixedRateScheduler, Scheduler, SteppedScheduler, SystemClock, init_logging,
    };
    use karen_flyver::sim::autopilot;

    init_logging();
    log::info!("Karen Flyver (native) starting...");

    let data_dir = std::env::var("FLYVER_DATA_DIR").unwrap_or_else(|_| ".karen-flyver".to_string());
    let seed = env_parse::<u64>("FLYVER_SEED");
    let frames = env_parse::<u64>("FLYVER_FRAMES").unwrap_or(3_600);
    let realtime = std::env::var_os("FLYVER_REALTIME").is_some();

    let mut session = GameSession::new(FileStorage::new(&data_dir), LogAudio, seed);
    if session.player().is_none() {
        if let Err(e) = session.sign_in("Autopilot") {
            log::error!("Sign-in failed: {}", e);
            return;
        }
    }
    if let Err(e) = session.start() {
        log::error!("Could not start: {}", e);
        return;
    }

    let mut scheduler: Box<dyn Scheduler> = if realtime {
        Box::new(
            FixedRateScheduler::new(SystemClock, Duration::from_millis(16)).with_frame_limit(frames),
        )
    } else {
        Box::new(SteppedScheduler::new(0, 16).with_frame_limit(frames))
    };
    let ran = session.run(scheduler.as_mut(), |state| Some(autopilot(state)));

    let state = session.snapshot();
    match session.last_result() {
        Some(result) => println!(
            "Session ended after {} frames: score {} ({:?})",
            ran, result.final_score, result.cause
        ),
        None => {
            println!("Frame cap reached after {} frames at score {}", ran, state.score);
            session.stop();
        }
    }

    println!("\nHigh scores:");
    for (i, entry) in session.high_scores().top(5).iter().enumerate() {
        println!("{:>2}. {:<16} {}", i + 1, entry.name, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
