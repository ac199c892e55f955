//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`], so
//! a custom balance can be loaded from JSON without touching the sim.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub horizontal_drag: f32,
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_start_x: f32,
    pub start_lives: u8,
    pub start_speed: f32,
    pub speed_step: f32,
    pub spawn_interval_ms: f64,
    pub points_per_obstacle: u64,
    pub milestone_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            horizontal_drag: HORIZONTAL_DRAG,
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_start_x: PLAYER_START_X,
            start_lives: START_LIVES,
            start_speed: START_SPEED,
            speed_step: SPEED_STEP,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            points_per_obstacle: POINTS_PER_OBSTACLE,
            milestone_points: MILESTONE_POINTS,
        }
    }
}

impl Tuning {
    /// Storage key for a balance override
    pub const STORAGE_KEY: &'static str = "ball_dash_tuning";

    /// Stored override if present and well formed, defaults otherwise
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY).and_then(|json| Self::from_json(&json)) {
            Some(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            None => Self::default(),
        }
    }

    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(tuning) => Some(tuning),
            Err(e) => {
                log::warn!("Ignoring malformed tuning: {}", e);
                None
            }
        }
    }

    /// Milestone index reached at `score` (0 before the first milestone)
    pub fn milestone_for(&self, score: u64) -> u64 {
        if self.milestone_points == 0 {
            0
        } else {
            score / self.milestone_points
        }
    }
}
