//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One `tick` per rendered frame
//! - Seeded RNG only
//! - Wall-clock time comes in as a plain `now_ms` argument
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ball_rect_overlap};
pub use spawn::{choose_kind, maybe_spawn, pick_kind};
pub use state::{
    Background, Emotion, Field, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player,
};
pub use tick::{TickInput, restart, start_run, tick, toggle_pause};
