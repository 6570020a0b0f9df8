//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here, owned by [`GameState`].
//! The tick pipeline in [`super::tick`] is the only writer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::assets::AssetKey;
use crate::consts::*;
use crate::scale_factor;
use crate::tuning::DifficultyConfig;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Menu / game-over chrome is up; the loop idles
    #[default]
    Inactive,
    /// Pre-run countdown; entities are placed but frozen
    Countdown,
    /// Full simulation
    Active,
    /// Frozen mid-run, still renderable
    Paused,
    /// Terminal collision ended the run
    GameOver,
}

/// Particle tint, rgb
pub type Color = [u8; 3];

pub const WHITE: Color = [0xff, 0xff, 0xff];
pub const GOLD: Color = [0xff, 0xd7, 0x00];
pub const ORANGE: Color = [0xff, 0xa5, 0x00];
pub const RED: Color = [0xff, 0x00, 0x00];

/// The player's flying character
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (px/tick, positive is down)
    pub velocity: f32,
    /// Visual tilt (radians, clamped to ±45°)
    pub rotation: f32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Obstacle variants
///
/// Closed set: collision outcome and draw-key resolution both match
/// exhaustively, so adding a variant is a compile-time checked exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Bird,
    AirplaneA,
    AirplaneB,
    /// Pickup that arms hyper mode instead of dealing damage
    BonusItem,
}

impl ObstacleKind {
    /// Which sprite the presentation layer should draw for this variant
    pub fn asset_key(&self) -> AssetKey {
        match self {
            ObstacleKind::Bird => AssetKey::EnemyBird,
            ObstacleKind::AirplaneA => AssetKey::AirplaneA,
            ObstacleKind::AirplaneB => AssetKey::AirplaneB,
            ObstacleKind::BonusItem => AssetKey::BonusItem,
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward scroll speed (px/tick)
    pub speed: f32,
    pub kind: ObstacleKind,
    /// Post-destruction free-fall; exempt from all collision checks
    pub falling: bool,
    pub rotation: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Decorative cloud; never collides
#[derive(Debug, Clone, Copy)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

/// A fired projectile
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rightward speed (px/tick)
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A visual particle; no gameplay effect
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Unit interval, decays linearly each tick
    pub life: f32,
    pub color: Color,
    pub size: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed (logged, and useful for reproducing a session in tests)
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Balance record, immutable for the duration of a run
    pub config: DifficultyConfig,

    pub viewport_w: f32,
    pub viewport_h: f32,
    /// Dimensionless scale from viewport height; recomputed on resize
    pub scale: f32,

    /// Simulation clock (ms). Advances only while `Active`, so every
    /// timestamp comparison below freezes during pause and countdown.
    pub now_ms: f64,
    pub last_spawn_ms: f64,
    pub last_cloud_ms: f64,
    pub last_shot_ms: f64,
    /// Hyper mode is active while `now_ms` is before this
    pub hyper_until_ms: f64,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,

    pub score: u32,
    /// Elapsed-active-time accumulator toward the next survival point
    pub score_acc_ms: f64,

    /// Parallax scroll offsets, sky to foreground
    pub bg_offsets: [f32; 3],

    /// Countdown display value; 0 means "GO"
    pub countdown_ticks: u8,
    pub countdown_timer_ms: f64,
}

impl GameState {
    /// Create an idle state. Nothing moves until [`GameState::reset`] and a
    /// phase change arm a run.
    pub fn new(seed: u64, config: DifficultyConfig, viewport_w: f32, viewport_h: f32) -> Self {
        let scale = scale_factor(viewport_h);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Inactive,
            config,
            viewport_w,
            viewport_h,
            scale,
            now_ms: 0.0,
            last_spawn_ms: 0.0,
            last_cloud_ms: 0.0,
            last_shot_ms: -SHOOT_COOLDOWN_MS,
            hyper_until_ms: 0.0,
            player: Player {
                x: viewport_w * 0.1,
                y: viewport_h / 2.0,
                width: PLAYER_WIDTH * scale,
                height: PLAYER_HEIGHT * scale,
                velocity: 0.0,
                rotation: 0.0,
            },
            obstacles: Vec::new(),
            clouds: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            score: 0,
            score_acc_ms: 0.0,
            bg_offsets: [0.0; 3],
            countdown_ticks: COUNTDOWN_TICKS,
            countdown_timer_ms: 0.0,
        }
    }

    /// Rebuild all run state for a fresh attempt. Sizes and speeds are
    /// written pre-scaled; raw and scaled values never mix in an entity.
    pub fn reset(&mut self) {
        self.scale = scale_factor(self.viewport_h);
        let scale = self.scale;

        self.player = Player {
            x: self.viewport_w * 0.1,
            y: self.viewport_h / 2.0,
            width: PLAYER_WIDTH * scale,
            height: PLAYER_HEIGHT * scale,
            velocity: 0.0,
            rotation: 0.0,
        };
        self.obstacles.clear();
        self.clouds.clear();
        self.bullets.clear();
        self.particles.clear();
        self.score = 0;
        self.score_acc_ms = 0.0;
        self.now_ms = 0.0;
        self.last_spawn_ms = 0.0;
        self.last_cloud_ms = 0.0;
        // A fresh run may fire immediately
        self.last_shot_ms = -SHOOT_COOLDOWN_MS;
        self.hyper_until_ms = 0.0;
        self.bg_offsets = [0.0; 3];
        self.countdown_ticks = COUNTDOWN_TICKS;
        self.countdown_timer_ms = 0.0;

        // Seed a few clouds in the upper sky so the run doesn't open on
        // an empty screen
        for _ in 0..3 {
            let cloud = Cloud {
                x: self.rng.random::<f32>() * self.viewport_w,
                y: self.rng.random::<f32>() * (self.viewport_h * 0.4),
                width: (80.0 + self.rng.random::<f32>() * 40.0) * scale,
                height: 50.0 * scale,
                speed: (0.5 + self.rng.random::<f32>()) * scale,
            };
            self.clouds.push(cloud);
        }
    }

    /// Is the hyper power-up window open?
    pub fn hyper_active(&self) -> bool {
        self.now_ms < self.hyper_until_ms
    }

    /// Time left in the hyper window (ms), for UI rendering
    pub fn hyper_remaining_ms(&self) -> f64 {
        (self.hyper_until_ms - self.now_ms).max(0.0)
    }

    /// Current shoot cooldown (shortens while hyper)
    pub fn shoot_cooldown_ms(&self) -> f64 {
        if self.hyper_active() {
            RAPID_FIRE_COOLDOWN_MS
        } else {
            SHOOT_COOLDOWN_MS
        }
    }

    /// Cooldown recharge ratio in [0, 1]; 1 means ready to fire
    pub fn cooldown_progress(&self) -> f32 {
        let elapsed = self.now_ms - self.last_shot_ms;
        (elapsed / self.shoot_cooldown_ms()).clamp(0.0, 1.0) as f32
    }

    /// Countdown display value while counting down (0 reads as "GO")
    pub fn countdown_display(&self) -> Option<u8> {
        match self.phase {
            GamePhase::Countdown => Some(self.countdown_ticks),
            _ => None,
        }
    }
}
