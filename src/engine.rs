//! Frame driver
//!
//! Bridges the host's display-refresh callback and the simulation. The
//! host calls [`Engine::frame`] once per refresh with a wall-clock
//! timestamp; the engine turns that into a delta, advances the tick
//! pipeline, performs the terminal high-score write, and hands back a
//! read-only snapshot for drawing. The engine owns no timers or callbacks
//! of its own, so teardown is just dropping it and not calling `frame`
//! again.
//!
//! The host is expected to keep calling `frame` every refresh in every
//! phase — menus and pause idle through the same loop, and the snapshot
//! of a frozen phase is how the presentation layer renders the frozen
//! frame.

use crate::consts::*;
use crate::highscores::ScoreStore;
use crate::scale_factor;
use crate::sim::state::{Bullet, Cloud, GamePhase, GameState, Obstacle, Particle, Player};
use crate::sim::tick::{TickInput, tick};
use crate::tuning::Difficulty;

/// Converts host frame timestamps into deltas
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame (ms). The first call after a reset
    /// yields 0, and a clock regression clamps to 0 instead of propagating.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(prev) => now_ms - prev,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt < 0.0 {
            log::warn!("clock regression ({dt:.1} ms), clamping to 0");
            return 0.0;
        }
        dt
    }

    /// Forget the previous timestamp so a long dwell (menu, tab switch)
    /// doesn't become a giant delta
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Everything the presentation layer needs to draw one frame.
/// Borrowed from the engine; strictly read-only.
#[derive(Debug)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub clouds: &'a [Cloud],
    pub bullets: &'a [Bullet],
    pub particles: &'a [Particle],
    /// Parallax scroll offsets, sky to foreground
    pub bg_offsets: [f32; 3],
    pub scale: f32,
    pub score: u32,
    pub high_score: u32,
    /// Countdown display value; 0 reads as "GO"
    pub countdown: Option<u8>,
    pub hyper_active: bool,
    pub hyper_remaining_ms: f64,
    /// Shoot cooldown recharge ratio in [0, 1]
    pub cooldown_progress: f32,
}

/// The frame driver
pub struct Engine {
    state: GameState,
    clock: FrameClock,
    store: Box<dyn ScoreStore>,
    difficulty: Difficulty,
    high_score: u32,
}

impl Engine {
    /// Build an engine for the chosen difficulty. Reads the persisted
    /// high score once. The viewport starts unset (0×0) and should be
    /// supplied via [`Engine::set_viewport`] before the first run; until
    /// then the scale factor sits at its lower clamp.
    pub fn new(difficulty: Difficulty, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        let high_score = store.read();
        let state = GameState::new(seed, difficulty.config(), 0.0, 0.0);
        log::info!(
            "engine ready: {} difficulty, high score {high_score}",
            difficulty.as_str()
        );
        Self {
            state,
            clock: FrameClock::new(),
            store,
            difficulty,
            high_score,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Read-only view of the simulation state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Inform the core of a viewport change. Recomputes the scale factor;
    /// during a run the player keeps its relative altitude and gets its
    /// sprite box rescaled. Entities spawned from here on use the new
    /// scale, as do all physics constants.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let prev_h = self.state.viewport_h;
        self.state.viewport_w = width.max(0.0);
        self.state.viewport_h = height.max(0.0);
        self.state.scale = scale_factor(self.state.viewport_h);

        let mid_run = matches!(
            self.state.phase,
            GamePhase::Countdown | GamePhase::Active | GamePhase::Paused
        );
        if mid_run && prev_h > 0.0 {
            let ratio = self.state.player.y / prev_h;
            self.state.player.y = self.state.viewport_h * ratio;
            self.state.player.width = PLAYER_WIDTH * self.state.scale;
            self.state.player.height = PLAYER_HEIGHT * self.state.scale;
        }
        log::debug!(
            "viewport {}x{}, scale {:.2}",
            self.state.viewport_w,
            self.state.viewport_h,
            self.state.scale
        );
    }

    /// Reset run state and arm the countdown
    pub fn start_run(&mut self) {
        self.state.reset();
        self.state.phase = GamePhase::Countdown;
        self.clock.reset();
        log::info!(
            "run starting: {} difficulty, scale {:.2}, seed {}",
            self.difficulty.as_str(),
            self.state.scale,
            self.state.seed
        );
    }

    /// Return to the idle phase (menu chrome is up)
    pub fn stop(&mut self) {
        self.state.phase = GamePhase::Inactive;
        self.clock.reset();
    }

    /// Advance one display frame and return the drawable state
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> RenderSnapshot<'_> {
        let dt = self.clock.delta(now_ms);
        let phase_before = self.state.phase;
        tick(&mut self.state, input, dt);

        // Terminal transition: persist the score if it beat the record
        if phase_before != GamePhase::GameOver && self.state.phase == GamePhase::GameOver {
            self.finish_run();
        }
        self.snapshot()
    }

    fn finish_run(&mut self) {
        let score = self.state.score;
        if score > self.high_score {
            self.high_score = score;
            self.store.write(score);
            log::info!("new high score {score}");
        }
    }

    /// The current drawable state without advancing the simulation
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let s = &self.state;
        RenderSnapshot {
            phase: s.phase,
            player: &s.player,
            obstacles: &s.obstacles,
            clouds: &s.clouds,
            bullets: &s.bullets,
            particles: &s.particles,
            bg_offsets: s.bg_offsets,
            scale: s.scale,
            score: s.score,
            high_score: self.high_score,
            countdown: s.countdown_display(),
            hyper_active: s.hyper_active(),
            hyper_remaining_ms: s.hyper_remaining_ms(),
            cooldown_progress: s.cooldown_progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Shared-cell store so tests can observe writes from outside
    #[derive(Clone, Default)]
    struct SpyStore(Rc<Cell<u32>>);

    impl ScoreStore for SpyStore {
        fn read(&self) -> u32 {
            self.0.get()
        }
        fn write(&mut self, score: u32) {
            self.0.set(score)
        }
    }

    fn live_engine(store: SpyStore) -> Engine {
        let mut engine = Engine::new(Difficulty::Normal, 99, Box::new(store));
        engine.set_viewport(800.0, 600.0);
        engine.start_run();
        // Prime the clock, then burn through the countdown in one delta
        engine.frame(0.0, &TickInput::default());
        engine.frame(3500.0, &TickInput::default());
        assert_eq!(engine.state.phase, GamePhase::Active);
        engine
    }

    fn force_fatal(engine: &mut Engine, at_ms: f64) {
        engine.state.player.y = engine.state.viewport_h;
        engine.frame(at_ms, &TickInput::default());
        assert_eq!(engine.state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_high_score_written_when_beaten() {
        let spy = SpyStore::default();
        spy.0.set(10);
        let mut engine = live_engine(spy.clone());
        engine.state.score = 15;
        force_fatal(&mut engine, 3516.0);
        assert_eq!(spy.0.get(), 15);
        assert_eq!(engine.high_score(), 15);
    }

    #[test]
    fn test_high_score_kept_when_not_beaten() {
        let spy = SpyStore::default();
        spy.0.set(10);
        let mut engine = live_engine(spy.clone());
        engine.state.score = 5;
        force_fatal(&mut engine, 3516.0);
        assert_eq!(spy.0.get(), 10);
        assert_eq!(engine.high_score(), 10);
    }

    #[test]
    fn test_frame_clock_regression_clamps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(100.0), 0.0);
        assert_eq!(clock.delta(116.0), 16.0);
        // Host clock went backwards; never hand a negative delta on
        assert_eq!(clock.delta(50.0), 0.0);
        assert_eq!(clock.delta(66.0), 16.0);
    }

    #[test]
    fn test_countdown_reaches_active_through_frames() {
        let store = crate::highscores::MemoryScoreStore::default();
        let mut engine = Engine::new(Difficulty::Normal, 1, Box::new(store));
        engine.set_viewport(800.0, 600.0);
        engine.start_run();

        let snap = engine.frame(1000.0, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Countdown);
        assert_eq!(snap.countdown, Some(3));

        engine.frame(2000.0, &TickInput::default());
        let snap = engine.frame(3000.0, &TickInput::default());
        assert_eq!(snap.countdown, Some(1));

        engine.frame(4000.0, &TickInput::default());
        let snap = engine.frame(4500.0, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Active);
        assert_eq!(snap.countdown, None);
    }

    #[test]
    fn test_resize_preserves_relative_altitude() {
        let spy = SpyStore::default();
        let mut engine = live_engine(spy);
        engine.state.player.y = 300.0;

        engine.set_viewport(1600.0, 1200.0);
        assert_eq!(engine.state.scale, 2.0);
        assert_eq!(engine.state.player.y, 600.0);
        assert_eq!(engine.state.player.width, PLAYER_WIDTH * 2.0);
        assert_eq!(engine.state.player.height, PLAYER_HEIGHT * 2.0);
    }

    #[test]
    fn test_snapshot_ui_fields() {
        let spy = SpyStore::default();
        let engine = live_engine(spy);
        let snap = engine.snapshot();
        assert!(!snap.hyper_active);
        assert_eq!(snap.hyper_remaining_ms, 0.0);
        // Fresh run: the gun is charged
        assert_eq!(snap.cooldown_progress, 1.0);
        assert_eq!(snap.scale, 1.0);
    }
}
