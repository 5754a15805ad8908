//! Session driver
//!
//! Owns everything around the pure simulation: who is playing, the latched
//! input, the random generator, and the collaborators (storage, audio, high
//! scores) that react to what each tick reports.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::HighScores;
use crate::platform::{Scheduler, Storage};
use crate::settings::Settings;
use crate::sim::{GameEvent, Intent, Movement, SessionState, TerminalCause, step};

/// Why a session could not be started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// Nobody has signed in
    NoPlayer,
    /// Sign-in name was blank after trimming
    EmptyName,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::NoPlayer => write!(f, "no player signed in"),
            StartError::EmptyName => write!(f, "player name is empty"),
        }
    }
}

impl std::error::Error for StartError {}

/// How the last session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub final_score: u64,
    pub cause: TerminalCause,
    /// Leaderboard rank after recording, if on the board
    pub rank: Option<usize>,
}

/// One player's game: lifecycle, input latching and event dispatch
pub struct GameSession<S: Storage, A: AudioSink> {
    state: SessionState,
    intent: Intent,
    rng: Pcg32,
    settings: Settings,
    high_scores: HighScores,
    storage: S,
    audio: A,
    last_result: Option<SessionResult>,
}

impl<S: Storage, A: AudioSink> GameSession<S, A> {
    /// Load preferences and high scores from `storage`
    ///
    /// A seed stored in the settings wins over `seed`; with neither the
    /// generator is seeded from the OS.
    pub fn new(storage: S, audio: A, seed: Option<u64>) -> Self {
        let settings = Settings::load(&storage);
        let high_scores = HighScores::load(&storage);
        let seed = settings.seed.or(seed).unwrap_or_else(rand::random);
        log::info!("Session created (seed {})", seed);
        let mut audio = audio;
        audio.apply_settings(&settings);

        Self {
            state: SessionState::new(),
            intent: Intent::default(),
            rng: Pcg32::seed_from_u64(seed),
            settings,
            high_scores,
            storage,
            audio,
            last_result: None,
        }
    }

    /// Currently signed-in player
    pub fn player(&self) -> Option<&str> {
        self.settings.player_name.as_deref()
    }

    /// Sign in as `name` (trimmed) and remember it for the next run
    pub fn sign_in(&mut self, name: &str) -> Result<(), StartError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StartError::EmptyName);
        }
        log::info!("Signed in as {}", name);
        self.settings.player_name = Some(name.to_string());
        self.settings.save(&mut self.storage);
        Ok(())
    }

    /// Begin a run from the initial state; no-op while one is running
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.state.started {
            return Ok(());
        }
        if self.player().is_none() {
            return Err(StartError::NoPlayer);
        }
        self.state = SessionState::started();
        self.intent = Intent::default();
        self.last_result = None;
        log::info!("Session started");
        Ok(())
    }

    /// Abandon the current run without recording a score
    pub fn stop(&mut self) {
        if self.state.started {
            log::info!("Session stopped at score {}", self.state.score);
        }
        self.state = SessionState::new();
        self.intent = Intent::default();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings_changed();
    }

    /// Master and effects volume, clamped to 0.0 - 1.0
    pub fn set_volume(&mut self, master: f32, sfx: f32) {
        self.settings.master_volume = master.clamp(0.0, 1.0);
        self.settings.sfx_volume = sfx.clamp(0.0, 1.0);
        self.settings_changed();
    }

    /// Persist preferences and hand the new levels to the audio sink
    fn settings_changed(&mut self) {
        self.settings.save(&mut self.storage);
        self.audio.apply_settings(&self.settings);
    }

    pub fn is_started(&self) -> bool {
        self.state.started
    }

    /// Hold a direction until changed (ignored while not started)
    pub fn set_movement(&mut self, movement: Movement) {
        if self.state.started {
            self.intent.movement = movement;
        }
    }

    /// Jump on the next frame only (ignored while not started)
    pub fn jump(&mut self) {
        if self.state.started {
            self.intent.jump = true;
        }
    }

    /// Advance one frame at wall-clock time `now` (ms)
    pub fn frame(&mut self, now: u64) -> Vec<GameEvent> {
        if !self.state.started {
            return Vec::new();
        }

        let state = std::mem::take(&mut self.state);
        let tick = step(state, &self.intent, now, &mut self.rng);
        let session_end = tick.session_end();
        self.state = tick.state;
        self.intent.jump = false;

        for event in &tick.events {
            if let Some(effect) = SoundEffect::from_event(event) {
                self.audio.play(effect);
            }
            match event {
                GameEvent::EncounterStarted => log::debug!("Boss encounter started"),
                GameEvent::EncounterEnded => log::debug!("Boss encounter ended"),
                _ => {}
            }
        }
        if let Some((final_score, cause)) = session_end {
            self.finish(final_score, cause);
        }
        tick.events
    }

    /// Record and persist a finished run (once per `SessionEnded`)
    fn finish(&mut self, final_score: u64, cause: TerminalCause) {
        self.intent = Intent::default();
        let rank = match self.settings.player_name.as_deref() {
            Some(name) => {
                let rank = self.high_scores.record_final_score(name, final_score);
                self.high_scores.save(&mut self.storage);
                rank
            }
            None => {
                log::warn!("Session ended with no player; score {} not recorded", final_score);
                None
            }
        };
        self.last_result = Some(SessionResult {
            final_score,
            cause,
            rank,
        });
    }

    /// Drive frames from `scheduler` until the session ends or the scheduler stops
    ///
    /// `pilot` may replace the input before each frame. Returns the number of
    /// frames run.
    pub fn run<Sch, P>(&mut self, scheduler: &mut Sch, mut pilot: P) -> u64
    where
        Sch: Scheduler + ?Sized,
        P: FnMut(&SessionState) -> Option<Intent>,
    {
        scheduler.start();
        let mut frames = 0;
        while let Some(now) = scheduler.next_frame() {
            if let Some(intent) = pilot(&self.state) {
                self.set_movement(intent.movement);
                if intent.jump {
                    self.jump();
                }
            }
            self.frame(now);
            frames += 1;
            if !self.state.started {
                scheduler.stop();
            }
        }
        frames
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    pub fn last_result(&self) -> Option<SessionResult> {
        self.last_result
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::consts::*;
    use crate::platform::{MemoryStorage, SteppedScheduler, StorageError};
    use crate::highscores::HighScoreEntry;
    use crate::sim::{Boss, BossPhase, Collectible, CollectibleKind, autopilot};
    use glam::Vec2;
    use rand::RngCore;

    type TestSession = GameSession<MemoryStorage, RecordingAudio>;

    fn signed_in() -> TestSession {
        let mut session = GameSession::new(MemoryStorage::new(), RecordingAudio::default(), Some(7));
        session.sign_in("ada").unwrap();
        session
    }

    /// Frames with no input until the flyer falls out of the arena
    fn crash(session: &mut TestSession) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for i in 0..200u64 {
            events.extend(session.frame(i * 16));
            if !session.is_started() {
                return events;
            }
        }
        panic!("session never ended");
    }

    #[test]
    fn test_sign_in_trims_and_persists() {
        let mut session = GameSession::new(MemoryStorage::new(), RecordingAudio::default(), Some(1));
        assert_eq!(session.player(), None);
        assert_eq!(session.sign_in("   "), Err(StartError::EmptyName));
        session.sign_in("  ada ").unwrap();
        assert_eq!(session.player(), Some("ada"));

        let settings = Settings::load(session.storage());
        assert_eq!(settings.player_name.as_deref(), Some("ada"));
    }

    #[test]
    fn test_player_restored_from_storage() {
        let session = signed_in();
        let storage = session.storage().clone();
        let restored = GameSession::new(storage, RecordingAudio::default(), Some(1));
        assert_eq!(restored.player(), Some("ada"));
    }

    #[test]
    fn test_start_requires_player() {
        let mut session = GameSession::new(MemoryStorage::new(), RecordingAudio::default(), Some(1));
        assert_eq!(session.start(), Err(StartError::NoPlayer));
        assert!(!session.is_started());
        assert_eq!(StartError::NoPlayer.to_string(), "no player signed in");
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut session = signed_in();
        session.start().unwrap();
        session.frame(0);
        session.frame(16);
        let before = session.snapshot().clone();
        session.start().unwrap();
        assert_eq!(session.snapshot(), &before);
    }

    #[test]
    fn test_frame_before_start_does_nothing() {
        let mut session = signed_in();
        session.jump();
        session.set_movement(Movement::Right);
        assert!(session.frame(0).is_empty());
        assert_eq!(session.snapshot(), &SessionState::new());

        // Input given before start is not carried in
        session.start().unwrap();
        session.frame(16);
        assert_eq!(session.snapshot().flyer.vel, Vec2::new(0.0, GRAVITY));
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut session = signed_in();
        session.start().unwrap();
        session.jump();
        session.frame(0);
        assert_eq!(session.snapshot().flyer.vel.y, JUMP_VELOCITY);
        session.frame(16);
        assert_eq!(session.snapshot().flyer.vel.y, JUMP_VELOCITY + GRAVITY);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut session = signed_in();
        session.start().unwrap();
        session.set_movement(Movement::Right);
        for i in 0..3 {
            session.frame(i * 16);
        }
        let vx = session.snapshot().flyer.vel.x;
        assert!((vx - 3.0 * FLYER_ACCELERATION).abs() < 1e-5);

        session.set_movement(Movement::None);
        session.frame(48);
        assert!(session.snapshot().flyer.vel.x < vx);
    }

    #[test]
    fn test_final_score_recorded_exactly_once() {
        let mut session = signed_in();
        session.start().unwrap();
        let events = crash(&mut session);

        let ended = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count();
        assert_eq!(ended, 1);
        assert_eq!(
            session.last_result(),
            Some(SessionResult {
                final_score: 0,
                cause: TerminalCause::ArenaEdge,
                rank: Some(1),
            })
        );
        assert_eq!(session.high_scores().len(), 1);
        assert_eq!(HighScores::load(session.storage()), *session.high_scores());

        // Idle frames after the end change nothing
        for i in 0..10 {
            assert!(session.frame(10_000 + i).is_empty());
        }
        assert_eq!(session.high_scores().len(), 1);
        assert_eq!(session.snapshot(), &SessionState::new());
    }

    #[test]
    fn test_boss_body_hit_records_score_at_collision() {
        let mut session = signed_in();
        session.start().unwrap();
        session.state.score = 73;
        session.state.last_boss_spawn_score = 50;
        session.state.boss = Boss {
            phase: BossPhase::Engaged,
            pos: Vec2::new(100.0, 200.0),
            direction: 1.0,
            encounter_start: Some(0),
            lasers: Vec::new(),
        };

        let events = session.frame(1_000);
        assert_eq!(
            events.last(),
            Some(&GameEvent::SessionEnded {
                final_score: 73,
                cause: TerminalCause::BossBody,
            })
        );
        assert_eq!(
            session.last_result(),
            Some(SessionResult {
                final_score: 73,
                cause: TerminalCause::BossBody,
                rank: Some(1),
            })
        );
        let expected = [HighScoreEntry {
            name: "ada".to_string(),
            score: 73,
        }];
        assert_eq!(session.high_scores().entries(), &expected);
        assert_eq!(HighScores::load(session.storage()).entries(), &expected);
        assert!(!session.is_started());
        assert!(session.frame(1_016).is_empty());
        assert_eq!(session.high_scores().len(), 1);
    }

    #[test]
    fn test_volume_and_mute_reach_audio_and_storage() {
        let mut session = signed_in();
        assert_eq!(session.audio().settings.as_ref(), Some(&Settings::default()));

        session.set_volume(0.5, 2.0);
        session.set_muted(true);
        let applied = session.audio().settings.clone().unwrap();
        assert_eq!(applied.master_volume, 0.5);
        assert_eq!(applied.sfx_volume, 1.0);
        assert!(applied.muted);
        assert_eq!(&applied, session.settings());

        let stored = Settings::load(session.storage());
        assert_eq!(stored, applied);
        assert_eq!(stored.player_name.as_deref(), Some("ada"));

        // A new session starts its sink at the stored levels
        let restored = GameSession::new(session.storage().clone(), RecordingAudio::default(), Some(1));
        assert_eq!(restored.audio().settings.as_ref(), Some(&stored));
    }

    #[test]
    fn test_restart_after_end() {
        let mut session = signed_in();
        session.start().unwrap();
        crash(&mut session);
        session.start().unwrap();
        assert!(session.is_started());
        assert_eq!(session.last_result(), None);
        assert_eq!(session.snapshot().score, 0);
    }

    #[test]
    fn test_stop_does_not_record() {
        let mut session = signed_in();
        session.start().unwrap();
        session.frame(0);
        session.stop();
        assert!(!session.is_started());
        assert!(session.high_scores().is_empty());
    }

    #[test]
    fn test_audio_dispatch() {
        let mut session = signed_in();
        session.start().unwrap();
        session.state.collectibles.push(Collectible {
            pos: session.state.flyer.pos,
            kind: CollectibleKind::Favorable,
        });
        let events = session.frame(0);
        assert!(events.contains(&GameEvent::FavorableCollected));
        assert_eq!(session.audio().played, vec![SoundEffect::FavorableCollected]);
        assert_eq!(session.snapshot().score, FAVORABLE_POINTS);
    }

    #[derive(Default)]
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota".to_string()))
        }
    }

    #[test]
    fn test_storage_failure_is_absorbed() {
        let mut session = GameSession::new(BrokenStorage, RecordingAudio::default(), Some(3));
        session.sign_in("ada").unwrap();
        session.start().unwrap();
        for i in 0..200u64 {
            session.frame(i * 16);
        }
        assert!(!session.is_started());
        assert_eq!(session.high_scores().len(), 1);
    }

    #[test]
    fn test_run_stops_scheduler_on_session_end() {
        let mut session = signed_in();
        session.start().unwrap();
        let mut scheduler = SteppedScheduler::new(0, 16).with_frame_limit(10_000);
        let frames = session.run(&mut scheduler, |_| None);
        assert!(frames < 200);
        assert!(!scheduler.is_running());
        assert!(session.last_result().is_some());
    }

    #[test]
    fn test_run_with_autopilot_survives() {
        let mut session = signed_in();
        session.start().unwrap();
        let mut scheduler = SteppedScheduler::new(0, 16).with_frame_limit(600);
        let frames = session.run(&mut scheduler, |state| Some(autopilot(state)));
        assert_eq!(frames, 600);
        assert!(session.is_started());
        assert_eq!(session.snapshot().flyer.pos.x, FLYER_START_X);
    }

    #[test]
    fn test_seed_reproducible() {
        let play = || {
            let mut session = signed_in();
            session.start().unwrap();
            let mut scheduler = SteppedScheduler::new(0, 16).with_frame_limit(400);
            session.run(&mut scheduler, |state| Some(autopilot(state)));
            session.snapshot().clone()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_settings_seed_wins() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            seed: Some(99),
            ..Settings::default()
        };
        settings.save(&mut storage);
        let mut a = GameSession::new(storage.clone(), RecordingAudio::default(), Some(1));
        let mut b = GameSession::new(storage, RecordingAudio::default(), Some(2));
        assert_eq!(a.rng.next_u64(), b.rng.next_u64());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = signed_in();
        session.start().unwrap();
        session.frame(0);
        let json = serde_json::to_string(session.snapshot()).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, session.snapshot());
    }
}
