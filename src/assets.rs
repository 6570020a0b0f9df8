//! Asset availability
//!
//! Sprites load fire-and-forget on the presentation side; the simulation
//! never blocks on them. The renderer is handed an [`AssetProvider`] and
//! asks "is this key ready to draw" per draw call, skipping or drawing a
//! placeholder when the answer is no (the bonus item gets an ellipse
//! stand-in so pickups stay visible).

use std::collections::HashSet;

/// Every drawable sprite the presentation layer can ask about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    PlayerBird,
    EnemyBird,
    AirplaneA,
    AirplaneB,
    Cloud,
    BonusItem,
    /// Parallax layers, foreground to sky
    BgLayer1,
    BgLayer2,
    BgLayer3,
}

impl AssetKey {
    pub const ALL: [AssetKey; 9] = [
        AssetKey::PlayerBird,
        AssetKey::EnemyBird,
        AssetKey::AirplaneA,
        AssetKey::AirplaneB,
        AssetKey::Cloud,
        AssetKey::BonusItem,
        AssetKey::BgLayer1,
        AssetKey::BgLayer2,
        AssetKey::BgLayer3,
    ];

    /// Stable name, usable as a file stem or cache key
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKey::PlayerBird => "player_bird",
            AssetKey::EnemyBird => "enemy_bird",
            AssetKey::AirplaneA => "airplane_a",
            AssetKey::AirplaneB => "airplane_b",
            AssetKey::Cloud => "cloud",
            AssetKey::BonusItem => "bonus_item",
            AssetKey::BgLayer1 => "bg_layer1",
            AssetKey::BgLayer2 => "bg_layer2",
            AssetKey::BgLayer3 => "bg_layer3",
        }
    }
}

/// Capability the renderer queries per draw call
pub trait AssetProvider {
    fn is_ready(&self, key: AssetKey) -> bool;
}

/// Set-backed provider; loaders mark keys ready as fetches complete
#[derive(Debug, Default)]
pub struct AssetCatalog {
    ready: HashSet<AssetKey>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&mut self, key: AssetKey) {
        self.ready.insert(key);
    }

    pub fn fully_loaded(&self) -> bool {
        AssetKey::ALL.iter().all(|k| self.ready.contains(k))
    }
}

impl AssetProvider for AssetCatalog {
    fn is_ready(&self, key: AssetKey) -> bool {
        self.ready.contains(&key)
    }
}
