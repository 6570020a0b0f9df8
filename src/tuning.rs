//! Data-driven game balance
//!
//! A difficulty is selected once before a run starts and is immutable for
//! the duration of the run.

use serde::{Deserialize, Serialize};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The balance record for this difficulty
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                gravity: 0.18,
                jump_strength: -4.8,
                spawn_rate_ms: 2000.0,
                game_speed: 3.0,
            },
            Difficulty::Normal => DifficultyConfig {
                gravity: 0.22,
                jump_strength: -5.8,
                spawn_rate_ms: 1600.0,
                game_speed: 3.8,
            },
            Difficulty::Hard => DifficultyConfig {
                gravity: 0.32,
                jump_strength: -7.0,
                spawn_rate_ms: 1200.0,
                game_speed: 5.5,
            },
        }
    }
}

/// Numeric balance for one difficulty
///
/// All values are unscaled; the simulation multiplies by the current scale
/// factor at use time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Downward acceleration per tick (px/tick²)
    pub gravity: f32,
    /// Velocity written on jump (px/tick, negative is up)
    pub jump_strength: f32,
    /// Minimum gap between obstacle spawns (ms)
    pub spawn_rate_ms: f64,
    /// Base obstacle scroll speed (px/tick)
    pub game_speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_harder_is_harder() {
        let easy = Difficulty::Easy.config();
        let normal = Difficulty::Normal.config();
        let hard = Difficulty::Hard.config();
        assert!(easy.gravity < normal.gravity && normal.gravity < hard.gravity);
        assert!(easy.spawn_rate_ms > normal.spawn_rate_ms);
        assert!(normal.spawn_rate_ms > hard.spawn_rate_ms);
        assert!(easy.game_speed < hard.game_speed);
    }
}
