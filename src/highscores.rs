//! High score persistence
//!
//! A single integer under a fixed string key. The engine reads it once at
//! startup and writes it back only when a finished run beats it. Storage
//! failures are logged and tolerated; a run never fails over a score.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fixed storage key
pub const HIGH_SCORE_KEY: &str = "skyhopper_highscore";

/// Where high scores go. The core only ever calls `read` on init and
/// `write` with a value it already knows is greater.
pub trait ScoreStore {
    /// Last persisted high score, 0 when absent or unreadable
    fn read(&self) -> u32;
    /// Persist a new high score
    fn write(&mut self, score: u32);
}

/// Volatile store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    score: u32,
}

impl MemoryScoreStore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self) -> u32 {
        self.score
    }

    fn write(&mut self, score: u32) {
        self.score = score;
    }
}

/// On-disk JSON record
#[derive(Debug, Serialize, Deserialize)]
struct ScoreRecord {
    score: u32,
}

/// File-backed store: one small JSON document named after the fixed key
#[derive(Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    /// Store under `dir/<key>.json`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(format!("{HIGH_SCORE_KEY}.json"));
        Self { path }
    }

    fn try_load(&self) -> io::Result<u32> {
        let json = fs::read_to_string(&self.path)?;
        let record: ScoreRecord = serde_json::from_str(&json).map_err(io::Error::other)?;
        Ok(record.score)
    }

    fn try_save(&self, score: u32) -> io::Result<()> {
        let json = serde_json::to_string(&ScoreRecord { score }).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn read(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                log::info!("loaded high score {score}");
                score
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("high score unreadable ({e}), starting fresh");
                0
            }
        }
    }

    fn write(&mut self, score: u32) {
        match self.try_save(score) {
            Ok(()) => log::info!("high score saved ({score})"),
            Err(e) => log::warn!("failed to save high score: {e}"),
        }
    }
}
