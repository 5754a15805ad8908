//! Frame scheduling
//!
//! A scheduler hands out frame timestamps until it is stopped. The browser
//! build drives frames from `requestAnimationFrame` instead and calls
//! `GameSession::frame` directly.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(not(target_arch = "wasm32"))]
use super::clock::Clock;

/// Source of frame callbacks with explicit lifecycle
pub trait Scheduler {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Wait for the next frame and return its timestamp (ms), or `None` once stopped
    fn next_frame(&mut self) -> Option<u64>;
}

/// Deterministic scheduler: fixed milliseconds per frame, optional frame cap
#[derive(Debug, Clone)]
pub struct SteppedScheduler {
    now: u64,
    step_ms: u64,
    remaining: Option<u64>,
    running: bool,
}

impl SteppedScheduler {
    pub fn new(start: u64, step_ms: u64) -> Self {
        Self {
            now: start,
            step_ms,
            remaining: None,
            running: false,
        }
    }

    /// Stop by itself after `frames` frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Timestamp of the most recent frame
    pub fn now(&self) -> u64 {
        self.now
    }
}

impl Scheduler for SteppedScheduler {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn next_frame(&mut self) -> Option<u64> {
        if !self.running {
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                self.running = false;
                return None;
            }
            *remaining -= 1;
        }
        self.now += self.step_ms;
        Some(self.now)
    }
}

/// Real-time scheduler: sleeps until the next frame deadline
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FixedRateScheduler<C: Clock> {
    clock: C,
    period: Duration,
    next_deadline: Option<Instant>,
    remaining: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<C: Clock> FixedRateScheduler<C> {
    pub fn new(clock: C, period: Duration) -> Self {
        Self {
            clock,
            period,
            next_deadline: None,
            remaining: None,
        }
    }

    /// Stop by itself after `frames` frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<C: Clock> Scheduler for FixedRateScheduler<C> {
    fn start(&mut self) {
        if self.next_deadline.is_none() {
            self.next_deadline = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        self.next_deadline = None;
    }

    fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    fn next_frame(&mut self) -> Option<u64> {
        let deadline = self.next_deadline?;
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                self.next_deadline = None;
                return None;
            }
            *remaining -= 1;
        }
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Fell behind: skip missed frames instead of bursting to catch up
        let next = deadline + self.period;
        self.next_deadline = Some(next.max(Instant::now()));
        Some(self.clock.now_ms())
    }
}
