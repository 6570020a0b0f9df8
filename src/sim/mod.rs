//! The simulation module
//!
//! All gameplay logic lives here, free of rendering and platform
//! dependencies:
//! - One simulation step per display frame, driven through [`tick::tick`]
//! - Seeded RNG owned by the state, no ambient randomness
//! - Entity collections exclusively owned by [`state::GameState`]

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision, swept_past};
pub use state::{
    Bullet, Cloud, Color, GamePhase, GameState, Obstacle, ObstacleKind, Particle, Player,
};
pub use tick::{TickInput, tick};
