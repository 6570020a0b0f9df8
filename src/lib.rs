//! Skyhopper - a side-scrolling shoot-and-dodge arcade game core
//!
//! Core modules:
//! - `sim`: The per-tick simulation (physics, collisions, spawning, game state)
//! - `engine`: Frame driver that turns host frame callbacks into ticks
//! - `tuning`: Data-driven difficulty balance
//! - `highscores`: Single-integer high score persistence
//! - `assets`: Asset-availability capability for the presentation layer
//!
//! The crate draws nothing. Each frame the engine hands the presentation
//! layer a read-only [`engine::RenderSnapshot`] of everything drawable.

pub mod assets;
pub mod engine;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, RenderSnapshot};
pub use highscores::{MemoryScoreStore, ScoreStore};
pub use tuning::{Difficulty, DifficultyConfig};

/// Game configuration constants
pub mod consts {
    /// Base resolution height for scaling calculations
    pub const BASE_HEIGHT: f32 = 600.0;
    /// Scale factor clamp window
    pub const MIN_SCALE: f32 = 0.6;
    pub const MAX_SCALE: f32 = 2.5;

    /// Player sprite box (unscaled)
    pub const PLAYER_WIDTH: f32 = 85.0;
    pub const PLAYER_HEIGHT: f32 = 68.0;
    /// Rotation response to normalized vertical velocity (radians per px/tick)
    pub const ROTATION_SENSITIVITY: f32 = 0.08;
    /// Velocity written back after a ceiling hit (unscaled, keeps the player unstuck)
    pub const CEILING_REBOUND: f32 = 0.5;

    /// Symmetric inward collision padding (unscaled px per side)
    pub const COLLISION_PAD: f32 = 10.0;
    /// Obstacles are dropped once x + width goes this far left of view (unscaled)
    pub const DESPAWN_MARGIN: f32 = -100.0;

    /// Shoot cooldowns (ms)
    pub const SHOOT_COOLDOWN_MS: f64 = 1500.0;
    pub const RAPID_FIRE_COOLDOWN_MS: f64 = 150.0;
    /// Hyper mode window armed by a bonus pickup (ms)
    pub const HYPER_DURATION_MS: f64 = 5000.0;

    /// Bullet box (unscaled); hyper multiplies both sides
    pub const BULLET_WIDTH: f32 = 35.0;
    pub const BULLET_HEIGHT: f32 = 25.0;
    pub const HYPER_BULLET_SIZE_MULT: f32 = 1.5;
    /// Bullet speeds (unscaled px/tick)
    pub const BULLET_SPEED: f32 = 18.0;
    pub const HYPER_BULLET_SPEED: f32 = 25.0;
    /// Backward kick on the player per shot (unscaled px/tick)
    pub const SHOOT_RECOIL: f32 = 0.5;
    pub const HYPER_SHOOT_RECOIL: f32 = 0.2;

    /// Linear life decay per tick for particles
    pub const PARTICLE_DECAY: f32 = 0.03;

    /// Cloud spawn interval, independent of difficulty (ms)
    pub const CLOUD_INTERVAL_MS: f64 = 3000.0;
    /// Survival score: +1 per this much active time (ms)
    pub const SCORE_TICK_MS: f64 = 500.0;
    /// Bonus pickup score
    pub const BONUS_SCORE: u32 = 5;

    /// Countdown: three 1s ticks, then a short grace before the run goes live
    pub const COUNTDOWN_TICKS: u8 = 3;
    pub const COUNTDOWN_TICK_MS: f64 = 1000.0;
    pub const COUNTDOWN_GRACE_MS: f64 = 500.0;

    /// Parallax layer speeds (unscaled px per 16 ms), sky to foreground
    pub const BG_LAYER_SPEEDS: [f32; 3] = [0.2, 0.5, 2.0];
}

/// Map a viewport height to the dimensionless scale factor applied to all
/// physics constants and entity dimensions.
#[inline]
pub fn scale_factor(viewport_h: f32) -> f32 {
    let raw = viewport_h / consts::BASE_HEIGHT;
    raw.clamp(consts::MIN_SCALE, consts::MAX_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_baseline() {
        assert_eq!(scale_factor(600.0), 1.0);
    }

    #[test]
    fn test_scale_factor_clamps() {
        // Tiny and unset (zero) viewports clamp low instead of propagating
        assert_eq!(scale_factor(100.0), consts::MIN_SCALE);
        assert_eq!(scale_factor(0.0), consts::MIN_SCALE);
        // Huge viewports clamp high
        assert_eq!(scale_factor(10_000.0), consts::MAX_SCALE);
    }
}
