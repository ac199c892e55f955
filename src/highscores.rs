//! Best score tracking
//!
//! A single integer in the `highScore` slot, shared across runs and
//! sessions.

use crate::persistence::KeyValueStore;

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key for the best score
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Read the stored best score; missing or garbage values count as zero
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };

        match raw.trim().parse::<u64>() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(_) => {
                log::warn!("Ignoring malformed high score {:?}", raw);
                Self::default()
            }
        }
    }

    /// Whether a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run; writes to storage only when the best improves
    pub fn submit(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        store.set(Self::STORAGE_KEY, &score.to_string());
        log::info!("High score saved ({})", score);
        true
    }
}
