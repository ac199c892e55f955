//! Ball Dash - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Frame simulation (physics, collisions, spawning, run lifecycle)
//! - `renderer`: 2D draw calls against an abstract surface
//! - `platform`: Browser/native platform abstraction (input, clock)
//! - `persistence`: Key-value storage for the high score and settings
//! - `tuning`: Data-driven game balance
//! - `driver`: Per-frame orchestration of sim, renderer and audio

pub mod audio;
pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{Driver, FrameOutcome};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to the ball every frame
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Horizontal velocity multiplier per frame when no direction is held
    pub const HORIZONTAL_DRAG: f32 = 0.9;

    /// Ball defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_START_X: f32 = 50.0;

    /// Lives at the start of every run
    pub const START_LIVES: u8 = 3;
    /// Scroll speed at the start of every run (pixels per frame)
    pub const START_SPEED: f32 = 4.0;
    /// Scroll speed gained per milestone
    pub const SPEED_STEP: f32 = 1.0;

    /// Wall-clock time between obstacle spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Points for each obstacle that scrolls off the left edge
    pub const POINTS_PER_OBSTACLE: u64 = 100;
    /// Score interval that bumps speed and background
    pub const MILESTONE_POINTS: u64 = 1000;

    /// Monsters hover this far above the floor
    pub const MONSTER_HOVER: f32 = 10.0;

    /// Fraction of the viewport the play field occupies
    pub const FIELD_WIDTH_FRACTION: f64 = 0.8;
    pub const FIELD_HEIGHT_FRACTION: f64 = 0.6;

    /// Name used when the player leaves the name box blank
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}
