//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]; nothing in the
//! sim reads globals or the platform.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start screen for a name
    NotStarted,
    /// Active gameplay
    Running,
    /// Frames are no longer scheduled
    Paused,
    /// Lives ran out
    GameOver,
}

/// Things that happened during a frame, for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    /// Ball touched a harmful obstacle
    Collision,
    /// A life was lost and the ball respawned
    LifeLost,
    /// An obstacle scrolled off screen
    Score { score: u64 },
    /// Score crossed a milestone; speed and background changed
    Milestone { milestone: u64 },
    GameOver { score: u64 },
    /// Final score beat the stored best
    NewHighScore { score: u64 },
}

/// Ball mood, purely cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Emotion {
    #[default]
    Happy,
    Sad,
    Neutral,
}

/// Play field dimensions; the floor is the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size the field as a fraction of the viewport
    pub fn from_viewport(viewport_w: f64, viewport_h: f64) -> Self {
        Self {
            width: (viewport_w * FIELD_WIDTH_FRACTION) as f32,
            height: (viewport_h * FIELD_HEIGHT_FRACTION) as f32,
        }
    }

    #[inline]
    pub fn floor(&self) -> f32 {
        self.height
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Horizontal drive speed (fixed for the whole session)
    pub speed: f32,
    pub jump_impulse: f32,
    pub grounded: bool,
    pub emotion: Emotion,
}

impl Player {
    pub fn new(tuning: &Tuning, field: &Field) -> Self {
        Self {
            pos: Self::start_pos(tuning, field),
            vel: Vec2::ZERO,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            jump_impulse: tuning.jump_impulse,
            grounded: false,
            emotion: Emotion::Happy,
        }
    }

    /// Spawn point: resting on the floor at the left of the field
    pub fn start_pos(tuning: &Tuning, field: &Field) -> Vec2 {
        Vec2::new(tuning.player_start_x, field.floor() - tuning.player_radius)
    }

    /// Move back to the spawn point at rest (after losing a life)
    pub fn respawn(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    /// Bounding box used for collision
    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Hole,
    Spike,
    Monster,
    /// Harmless; the ball passes straight through
    Block,
}

impl ObstacleKind {
    /// Fixed width/height per kind
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Spike => Vec2::new(30.0, 40.0),
            ObstacleKind::Hole => Vec2::new(100.0, 60.0),
            ObstacleKind::Monster => Vec2::new(50.0, 50.0),
            ObstacleKind::Block => Vec2::new(50.0, 20.0),
        }
    }

    /// Distance between the obstacle's bottom edge and the floor
    pub fn hover(&self) -> f32 {
        match self {
            ObstacleKind::Monster => MONSTER_HOVER,
            _ => 0.0,
        }
    }

    /// Whether touching this kind costs a life
    pub fn is_harmful(&self) -> bool {
        !matches!(self, ObstacleKind::Block)
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle of `kind` at the right edge of the field
    pub fn at_right_edge(kind: ObstacleKind, field: &Field) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(field.width, field.floor() - size.y - kind.hover()),
            size,
        }
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }
}

/// Background themes, cycled at each milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Background {
    #[default]
    Daytime,
    Nighttime,
    Garden,
    Snow,
}

impl Background {
    pub const PALETTE: [Background; 4] = [
        Background::Daytime,
        Background::Nighttime,
        Background::Garden,
        Background::Snow,
    ];

    /// Theme for a given milestone index
    pub fn for_milestone(milestone: u64) -> Self {
        Self::PALETTE[(milestone % Self::PALETTE.len() as u64) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Daytime => "daytime",
            Background::Nighttime => "nighttime",
            Background::Garden => "garden",
            Background::Snow => "snow",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Obstacle kind selection
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub field: Field,
    pub player: Player,
    /// Active obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub lives: u8,
    /// Scroll speed (pixels per frame)
    pub speed: f32,
    /// Milestones already applied this run
    pub milestone: u64,
    pub background: Background,
    pub phase: GamePhase,
    /// Wall-clock time (ms) of the last spawn
    pub last_spawn_ms: f64,
    /// Best score seen so far (loaded from storage by the driver)
    pub high_score: u64,
    pub player_name: String,
    /// Frames simulated this run
    pub frame: u64,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64, field: Field) -> Self {
        Self::with_tuning(seed, field, Tuning::default())
    }

    pub fn with_tuning(seed: u64, field: Field, tuning: Tuning) -> Self {
        let player = Player::new(&tuning, &field);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.start_lives,
            speed: tuning.start_speed,
            tuning,
            field,
            player,
            obstacles: Vec::new(),
            score: 0,
            milestone: 0,
            background: Background::Daytime,
            phase: GamePhase::NotStarted,
            last_spawn_ms: 0.0,
            high_score: 0,
            player_name: String::new(),
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Where the ball (re)spawns
    pub fn start_pos(&self) -> Vec2 {
        Player::start_pos(&self.tuning, &self.field)
    }

    /// Put run counters back to their initial values
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.speed = self.tuning.start_speed;
        self.milestone = 0;
        self.background = Background::Daytime;
        self.obstacles.clear();
        self.last_spawn_ms = 0.0;
        self.frame = 0;
        let start = self.start_pos();
        self.player.respawn(start);
        self.player.emotion = Emotion::Happy;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events pending without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
