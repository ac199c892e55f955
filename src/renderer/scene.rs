//! Scene drawing
//!
//! Turns a [`GameState`] into draw calls. Nothing here feeds back into the
//! simulation; the pupil jitter uses its own RNG so it never disturbs the
//! obstacle sequence.

use glam::Vec2;
use rand::Rng;

use super::Surface;
use super::palette;
use crate::sim::{GameState, Obstacle, ObstacleKind, Player};

/// Eye offset from the ball centre (mirrored for the right eye)
const EYE_OFFSET: Vec2 = Vec2::new(7.0, -5.0);
const EYE_RADIUS: f32 = 5.0;
const PUPIL_RADIUS: f32 = 2.0;
/// Max pupil wobble in each axis
const PUPIL_JITTER: f32 = 1.0;

const MONSTER_EYE_RADIUS: f32 = 5.0;
const MONSTER_MOUTH_RADIUS: f32 = 8.0;

/// Per-frame drawing switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub show_hud: bool,
    pub pupil_jitter: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_hud: true,
            pupil_jitter: true,
        }
    }
}

impl SceneOptions {
    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self {
            show_hud: settings.show_hud,
            pupil_jitter: settings.pupil_jitter(),
        }
    }
}

/// Draw one complete frame
pub fn draw_frame<S: Surface + ?Sized, R: Rng + ?Sized>(
    surface: &mut S,
    state: &GameState,
    rng: &mut R,
    options: SceneOptions,
) {
    surface.clear();
    surface.set_background(palette::background(state.background));

    draw_ball(surface, &state.player, rng, options.pupil_jitter);

    let floor = state.field.floor();
    for obstacle in &state.obstacles {
        draw_obstacle(surface, obstacle, floor);
    }

    if options.show_hud {
        draw_hud(surface, state);
    }
}

/// Ball body plus googly eyes
pub fn draw_ball<S: Surface + ?Sized, R: Rng + ?Sized>(
    surface: &mut S,
    player: &Player,
    rng: &mut R,
    jitter: bool,
) {
    surface.fill_circle(player.pos, player.radius, palette::ball(player.emotion));

    let eyes = [
        player.pos + Vec2::new(-EYE_OFFSET.x, EYE_OFFSET.y),
        player.pos + EYE_OFFSET,
    ];
    for eye in eyes {
        surface.fill_circle(eye, EYE_RADIUS, palette::EYE_WHITE);
    }
    for eye in eyes {
        let wobble = if jitter {
            Vec2::new(
                rng.random_range(-PUPIL_JITTER..PUPIL_JITTER),
                rng.random_range(-PUPIL_JITTER..PUPIL_JITTER),
            )
        } else {
            Vec2::ZERO
        };
        surface.fill_circle(eye + wobble, PUPIL_RADIUS, palette::PUPIL);
    }
}

pub fn draw_obstacle<S: Surface + ?Sized>(surface: &mut S, obstacle: &Obstacle, floor: f32) {
    let color = palette::obstacle(obstacle.kind);
    let Obstacle { pos, size, .. } = *obstacle;

    match obstacle.kind {
        // Holes are cut into the ground, whatever their hitbox says
        ObstacleKind::Hole => {
            surface.fill_rect(Vec2::new(pos.x, floor - size.y), size, color);
        }
        ObstacleKind::Spike => {
            surface.fill_triangle(
                Vec2::new(pos.x, floor),
                Vec2::new(pos.x + size.x / 2.0, floor - size.y),
                Vec2::new(pos.x + size.x, floor),
                color,
            );
        }
        ObstacleKind::Monster => draw_monster(surface, pos, size, color),
        ObstacleKind::Block => surface.fill_rect(pos, size, color),
    }
}

fn draw_monster<S: Surface + ?Sized>(surface: &mut S, pos: Vec2, size: Vec2, color: &str) {
    let center = pos + size / 2.0;
    surface.fill_circle(center, size.x / 2.0, color);

    let eye_y = center.y - size.y / 6.0;
    surface.fill_circle(
        Vec2::new(pos.x + size.x / 3.0, eye_y),
        MONSTER_EYE_RADIUS,
        palette::EYE_WHITE,
    );
    surface.fill_circle(
        Vec2::new(pos.x + 2.0 * size.x / 3.0, eye_y),
        MONSTER_EYE_RADIUS,
        palette::EYE_WHITE,
    );

    surface.fill_half_disc(
        Vec2::new(center.x, center.y + size.y / 6.0),
        MONSTER_MOUTH_RADIUS,
        palette::MONSTER_MOUTH,
    );
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 30.0),
        palette::HUD_FONT,
        palette::HUD_TEXT,
    );
    surface.fill_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(state.field.width - 100.0, 30.0),
        palette::HUD_FONT,
        palette::HUD_TEXT,
    );
}
