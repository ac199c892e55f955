//! Per-frame simulation tick and run lifecycle
//!
//! One call to [`tick`] advances the game by exactly one rendered frame.
//! Physics is integrated per frame (so it runs faster on faster displays)
//! while obstacle spawning follows the wall clock passed in as `now_ms`.

use super::spawn::maybe_spawn;
use super::state::{Background, Emotion, GameEvent, GamePhase, GameState};
use crate::consts::DEFAULT_PLAYER_NAME;

/// Held input intents for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.frame += 1;

    scroll_obstacles(state);
    step_player(state, input);
    check_collisions(state);

    if state.phase == GamePhase::Running {
        maybe_spawn(state, now_ms);
    }
}

/// Shift obstacles left and cash in the ones that left the field
pub fn scroll_obstacles(state: &mut GameState) {
    let speed = state.speed;
    let mut passed = 0u32;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.x -= speed;
        if obstacle.right_edge() < 0.0 {
            passed += 1;
            false
        } else {
            true
        }
    });

    for _ in 0..passed {
        award_obstacle(state);
    }
}

/// Points for one cleared obstacle, plus any milestone it reaches
fn award_obstacle(state: &mut GameState) {
    state.score += state.tuning.points_per_obstacle;
    state.push_event(GameEvent::Score { score: state.score });

    let milestone = state.tuning.milestone_for(state.score);
    if milestone > state.milestone {
        let crossed = milestone - state.milestone;
        state.speed += state.tuning.speed_step * crossed as f32;
        state.milestone = milestone;
        state.background = Background::for_milestone(milestone);
        state.push_event(GameEvent::Milestone { milestone });
        log::debug!(
            "Milestone {} at score {}: speed={}, background={}",
            milestone,
            state.score,
            state.speed,
            state.background.as_str()
        );
    }
}

/// Gravity, jump, horizontal drive and ground clamp for the ball
pub fn step_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let floor = state.field.floor();
    let player = &mut state.player;

    player.vel.y += tuning.gravity;

    let mut jumped = false;
    if input.jump && player.grounded {
        player.vel.y = player.jump_impulse;
        player.grounded = false;
        player.emotion = Emotion::Happy;
        jumped = true;
    }

    if input.right {
        player.vel.x = player.speed;
    } else if input.left {
        player.vel.x = -player.speed;
    } else {
        player.vel.x *= tuning.horizontal_drag;
    }

    player.pos += player.vel;

    if player.bottom() >= floor {
        player.pos.y = floor - player.radius;
        player.vel.y = 0.0;
        player.grounded = true;
    }

    if jumped {
        state.push_event(GameEvent::Jump);
    }
}

/// Test the ball against every obstacle; returns the number of hits taken
///
/// Every harmful obstacle overlapping the ball's box at the start of the
/// pass costs a life, so two spikes touched on one frame cost two. The pass
/// stops as soon as the run ends.
pub fn check_collisions(state: &mut GameState) -> u32 {
    let bounds = state.player.bounds();
    let hits = state
        .obstacles
        .iter()
        .filter(|o| o.kind.is_harmful() && o.bounds().overlaps(&bounds))
        .count();

    let mut taken = 0;
    for _ in 0..hits {
        taken += 1;
        state.push_event(GameEvent::Collision);
        state.lives = state.lives.saturating_sub(1);
        state.player.emotion = Emotion::Sad;

        if state.lives == 0 {
            enter_game_over(state);
            break;
        }

        state.push_event(GameEvent::LifeLost);
        let start = state.start_pos();
        state.player.respawn(start);
        log::debug!("Life lost, {} remaining", state.lives);
    }
    taken
}

/// Final bookkeeping when lives run out
fn enter_game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over for {}: score {} (best {})",
        state.player_name,
        state.score,
        state.high_score
    );

    if state.score > state.high_score {
        state.high_score = state.score;
        state.push_event(GameEvent::NewHighScore { score: state.score });
    }
}

/// Begin the first run; a blank name becomes the default placeholder
pub fn start_run(state: &mut GameState, name: &str) -> bool {
    if state.phase != GamePhase::NotStarted {
        log::debug!("Ignoring start in phase {:?}", state.phase);
        return false;
    }

    let name = name.trim();
    state.player_name = if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.to_string()
    };
    state.reset_run();
    state.phase = GamePhase::Running;
    log::info!("Run started for {}", state.player_name);
    true
}

/// Pause a running game or resume a paused one
pub fn toggle_pause(state: &mut GameState) -> bool {
    state.phase = match state.phase {
        GamePhase::Running => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Running,
        phase => {
            log::debug!("Ignoring pause toggle in phase {:?}", phase);
            return false;
        }
    };
    log::info!("Phase -> {:?}", state.phase);
    true
}

/// Start a fresh run after game over, keeping the name and best score
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        log::debug!("Ignoring restart in phase {:?}", state.phase);
        return false;
    }

    state.reset_run();
    state.phase = GamePhase::Running;
    log::info!("Run restarted for {}", state.player_name);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Field, Obstacle, ObstacleKind};
    use glam::Vec2;
    use proptest::prelude::*;

    const FLOOR: f32 = 400.0;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, Field::new(800.0, FLOOR));
        assert!(start_run(&mut state, "Tester"));
        state
    }

    fn obstacle_at(kind: ObstacleKind, x: f32, y: f32) -> Obstacle {
        Obstacle {
            kind,
            pos: Vec2::new(x, y),
            size: kind.size(),
        }
    }

    /// A spike sitting on the floor right on top of the spawn point
    fn spike_on_player() -> Obstacle {
        obstacle_at(ObstacleKind::Spike, 40.0, FLOOR - 40.0)
    }

    fn hold(left: bool, right: bool, jump: bool) -> TickInput {
        TickInput { left, right, jump }
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut state = GameState::new(1, Field::new(800.0, FLOOR));
        tick(&mut state, &TickInput::default(), 5_000.0);
        assert_eq!(state.frame, 0);
        assert!(state.obstacles.is_empty());

        assert!(start_run(&mut state, "x"));
        assert!(toggle_pause(&mut state));
        tick(&mut state, &TickInput::default(), 5_000.0);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_first_frame_spawns() {
        let mut state = running_state();
        tick(&mut state, &TickInput::default(), 5_000.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 800.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut state = running_state();

        // Settle onto the floor
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.player.grounded);
        state.drain_events();

        tick(&mut state, &hold(false, false, true), 0.0);
        assert_eq!(state.player.vel.y, -12.0);
        assert_eq!(state.player.pos.y, FLOOR - 20.0 - 12.0);
        assert!(!state.player.grounded);
        assert_eq!(state.drain_events(), vec![GameEvent::Jump]);

        // Still holding jump while airborne does nothing extra
        tick(&mut state, &hold(false, false, true), 0.0);
        assert_eq!(state.player.vel.y, -11.5);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_jump_cheers_up_ball() {
        let mut state = running_state();
        tick(&mut state, &TickInput::default(), 0.0);
        state.player.emotion = Emotion::Sad;
        tick(&mut state, &hold(false, false, true), 0.0);
        assert_eq!(state.player.emotion, Emotion::Happy);
    }

    #[test]
    fn test_horizontal_drive_and_drag() {
        let mut state = running_state();

        tick(&mut state, &hold(false, true, false), 0.0);
        assert_eq!(state.player.vel.x, 4.0);
        assert_eq!(state.player.pos.x, 54.0);

        tick(&mut state, &TickInput::default(), 0.0);
        assert!((state.player.vel.x - 3.6).abs() < 1e-6);

        tick(&mut state, &hold(true, false, false), 0.0);
        assert_eq!(state.player.vel.x, -4.0);

        // Right wins when both are held
        tick(&mut state, &hold(true, true, false), 0.0);
        assert_eq!(state.player.vel.x, 4.0);

        // Drag approaches zero without reaching it
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.0);
        }
        assert!(state.player.vel.x > 0.0);
        assert!(state.player.vel.x < 0.001);
    }

    #[test]
    fn test_obstacle_scrolls_and_scores() {
        let mut state = running_state();
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Block, -28.0, FLOOR - 20.0));
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Block, 500.0, FLOOR - 20.0));

        scroll_obstacles(&mut state);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].pos.x, -32.0);
        assert_eq!(state.score, 0);

        // Right edge is at 18; stays on screen until it drops below zero
        for _ in 0..4 {
            scroll_obstacles(&mut state);
        }
        assert_eq!(state.obstacles[0].right_edge(), 2.0);
        assert_eq!(state.score, 0);

        scroll_obstacles(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 476.0);
        assert_eq!(state.score, 100);
        assert_eq!(state.drain_events(), vec![GameEvent::Score { score: 100 }]);
    }

    #[test]
    fn test_adjacent_obstacles_leave_together() {
        let mut state = running_state();
        for _ in 0..3 {
            state
                .obstacles
                .push(obstacle_at(ObstacleKind::Spike, -29.0, FLOOR - 40.0));
        }
        scroll_obstacles(&mut state);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_milestone_bumps_speed_and_background() {
        let mut state = running_state();
        state.score = 900;
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Block, -49.0, FLOOR - 20.0));

        scroll_obstacles(&mut state);
        assert_eq!(state.score, 1000);
        assert_eq!(state.speed, 5.0);
        assert_eq!(state.milestone, 1);
        assert_eq!(state.background, Background::Nighttime);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Score { score: 1000 },
                GameEvent::Milestone { milestone: 1 }
            ]
        );

        // Next 100 points do not trigger another step
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Block, -49.0, FLOOR - 20.0));
        scroll_obstacles(&mut state);
        assert_eq!(state.score, 1100);
        assert_eq!(state.speed, 5.0);
        assert_eq!(state.background, Background::Nighttime);
    }

    #[test]
    fn test_block_is_harmless() {
        let mut state = running_state();
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Block, 40.0, FLOOR - 20.0));
        assert_eq!(check_collisions(&mut state), 0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_hit_loses_life_and_respawns() {
        let mut state = running_state();
        state.player.pos = Vec2::new(60.0, FLOOR - 20.0);
        state.player.vel = Vec2::new(3.0, -2.0);
        state.player.grounded = true;
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Monster, 50.0, FLOOR - 60.0));

        assert_eq!(check_collisions(&mut state), 1);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.emotion, Emotion::Sad);
        assert_eq!(state.player.pos, Vec2::new(50.0, FLOOR - 20.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.grounded);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Collision, GameEvent::LifeLost]
        );
    }

    #[test]
    fn test_simultaneous_hits_each_cost_a_life() {
        let mut state = running_state();
        state.obstacles.push(spike_on_player());
        state
            .obstacles
            .push(obstacle_at(ObstacleKind::Hole, 0.0, FLOOR - 60.0));

        assert_eq!(check_collisions(&mut state), 2);
        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_happens_once() {
        let mut state = running_state();
        state.lives = 1;
        state.score = 700;
        state.high_score = 300;
        for _ in 0..3 {
            state.obstacles.push(spike_on_player());
        }

        assert_eq!(check_collisions(&mut state), 1);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 700);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Collision,
                GameEvent::GameOver { score: 700 },
                GameEvent::NewHighScore { score: 700 }
            ]
        );

        // Frozen afterwards
        tick(&mut state, &TickInput::default(), 99_999.0);
        assert_eq!(state.lives, 0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_keeps_better_high_score() {
        let mut state = running_state();
        state.lives = 1;
        state.score = 200;
        state.high_score = 5000;
        state.obstacles.push(spike_on_player());

        check_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 5000);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_three_spikes_scenario() {
        let mut state = GameState::new(2024, Field::new(800.0, FLOOR));
        assert!(start_run(&mut state, "Ava"));
        assert_eq!(state.player_name, "Ava");
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 4.0);

        state.obstacles.push(spike_on_player());
        tick(&mut state, &TickInput::default(), 1_000.0);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.pos, Vec2::new(50.0, FLOOR - 20.0));
        assert_eq!(state.player.vel, Vec2::ZERO);

        // The spike keeps scrolling through the spawn point
        tick(&mut state, &TickInput::default(), 1_016.0);
        assert_eq!(state.lives, 1);
        state.score = 400;
        tick(&mut state, &TickInput::default(), 1_032.0);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 400);
    }

    #[test]
    fn test_name_defaults_when_blank() {
        let mut state = GameState::new(1, Field::default());
        assert!(start_run(&mut state, "   "));
        assert_eq!(state.player_name, "Player");

        let mut state = GameState::new(1, Field::default());
        assert!(start_run(&mut state, "  Zed "));
        assert_eq!(state.player_name, "Zed");
    }

    #[test]
    fn test_lifecycle_guards() {
        let mut state = GameState::new(1, Field::default());
        assert!(!toggle_pause(&mut state));
        assert!(!restart(&mut state));
        assert!(start_run(&mut state, "a"));
        assert!(!start_run(&mut state, "b"));
        assert!(!restart(&mut state));

        assert!(toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::GameOver;
        assert!(!toggle_pause(&mut state));
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = running_state();
        state.score = 2300;
        state.speed = 6.0;
        state.milestone = 2;
        state.background = Background::Garden;
        state.lives = 1;
        state.high_score = 100;
        state.obstacles.push(spike_on_player());
        check_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(restart(&mut state));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.speed, 4.0);
        assert_eq!(state.milestone, 0);
        assert_eq!(state.background, Background::Daytime);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(50.0, FLOOR - 20.0));
        assert_eq!(state.player.emotion, Emotion::Happy);
        assert_eq!(state.high_score, 2300);
        assert_eq!(state.player_name, "Tester");
    }

    #[test]
    fn test_spawn_rate_ignores_frame_rate() {
        // Physics advances per frame while spawning follows the wall clock:
        // 62.5 fps and 31.25 fps spawn the same number of obstacles over the
        // same three seconds, but the faster display scrolls them further.
        fn run(step_ms: u32) -> (usize, f32) {
            let mut state = GameState::new(5, Field::new(2000.0, FLOOR));
            start_run(&mut state, "fps");
            let mut spawned = 0;
            let mut t = 0;
            while t <= 3000 {
                let before = state.obstacles.len();
                tick(&mut state, &TickInput::default(), 10_000.0 + t as f64);
                spawned += state.obstacles.len() - before;
                t += step_ms;
            }
            (spawned, state.obstacles[0].pos.x)
        }

        let (fast_spawns, fast_x) = run(16);
        let (slow_spawns, slow_x) = run(32);
        assert_eq!(fast_spawns, 2);
        assert_eq!(slow_spawns, 2);
        assert!(fast_x < slow_x);
    }

    proptest! {
        #[test]
        fn prop_gravity_adds_constant(
            y in 50.0f32..200.0,
            vy in -15.0f32..15.0,
            vx in -4.0f32..4.0
        ) {
            let mut state = running_state();
            state.player.pos = Vec2::new(300.0, y);
            state.player.vel = Vec2::new(vx, vy);
            state.player.grounded = false;

            step_player(&mut state, &TickInput::default());
            prop_assert_eq!(state.player.vel.y, vy + 0.5);
            prop_assert_eq!(state.player.pos.y, y + (vy + 0.5));
            prop_assert!(!state.player.grounded);
        }

        #[test]
        fn prop_ground_clamp(y in 370.0f32..=380.0, vy in 10.0f32..20.0) {
            let mut state = running_state();
            state.player.pos = Vec2::new(300.0, y);
            state.player.vel = Vec2::new(0.0, vy);

            step_player(&mut state, &TickInput::default());
            prop_assert_eq!(state.player.bottom(), FLOOR);
            prop_assert_eq!(state.player.vel.y, 0.0);
            prop_assert!(state.player.grounded);
        }

        #[test]
        fn prop_airborne_jump_is_noop(y in 50.0f32..300.0, vy in -12.0f32..5.0) {
            let mut with_jump = running_state();
            with_jump.player.pos = Vec2::new(300.0, y);
            with_jump.player.vel = Vec2::new(0.0, vy);
            with_jump.player.grounded = false;
            let mut without = with_jump.clone();

            step_player(&mut with_jump, &hold(false, false, true));
            step_player(&mut without, &TickInput::default());
            prop_assert_eq!(with_jump.player.pos, without.player.pos);
            prop_assert_eq!(with_jump.player.vel, without.player.vel);
            prop_assert!(with_jump.events().is_empty());
        }

        #[test]
        fn prop_each_cleared_obstacle_scores_100(n in 1usize..40) {
            let mut state = running_state();
            for _ in 0..n {
                let kind = ObstacleKind::Spike;
                state.obstacles.push(obstacle_at(kind, -kind.size().x + 1.0, FLOOR - 40.0));
            }
            scroll_obstacles(&mut state);

            let score = 100 * n as u64;
            prop_assert!(state.obstacles.is_empty());
            prop_assert_eq!(state.score, score);
            prop_assert_eq!(state.speed, 4.0 + (score / 1000) as f32);
            prop_assert_eq!(state.background, Background::for_milestone(score / 1000));
        }
    }
}
