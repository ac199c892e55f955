//! Obstacle spawning
//!
//! A new obstacle enters at the right edge every `spawn_interval_ms` of wall
//! clock time, regardless of frame rate.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};

/// Walk the kind ladder, drawing a fresh roll in `[0, 1)` for each rung
///
/// Rungs: 30% monster, then 50% spike, then 80% hole, otherwise block.
/// Rolls are only drawn when a rung is reached.
pub fn pick_kind(mut roll: impl FnMut() -> f32) -> ObstacleKind {
    if roll() < 0.3 {
        ObstacleKind::Monster
    } else if roll() < 0.5 {
        ObstacleKind::Spike
    } else if roll() < 0.8 {
        ObstacleKind::Hole
    } else {
        ObstacleKind::Block
    }
}

/// Choose an obstacle kind from a random source
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    pick_kind(|| rng.random::<f32>())
}

/// Whether enough wall-clock time has passed since the last spawn
#[inline]
pub fn spawn_due(last_spawn_ms: f64, now_ms: f64, interval_ms: f64) -> bool {
    now_ms - last_spawn_ms > interval_ms
}

/// Spawn one obstacle if the cadence allows; returns the kind spawned
pub fn maybe_spawn(state: &mut GameState, now_ms: f64) -> Option<ObstacleKind> {
    if !spawn_due(state.last_spawn_ms, now_ms, state.tuning.spawn_interval_ms) {
        return None;
    }

    let kind = choose_kind(&mut state.rng);
    state
        .obstacles
        .push(Obstacle::at_right_edge(kind, &state.field));
    state.last_spawn_ms = now_ms;

    log::debug!(
        "Spawned {:?} at t={}ms ({} active)",
        kind,
        now_ms,
        state.obstacles.len()
    );
    Some(kind)
}
