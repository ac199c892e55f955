//! Per-frame orchestration
//!
//! The [`Driver`] owns the game state together with its collaborators
//! (storage, settings, held keys) and runs one frame at a time:
//! clear → draw → move → collide, then reports whether the host should
//! schedule another frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::{InputState, Key};
use crate::renderer::{SceneOptions, Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::{self, Field, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// Game session: state plus the pieces around it
pub struct Driver<K: KeyValueStore> {
    state: GameState,
    store: K,
    high_score: HighScore,
    settings: Settings,
    input: InputState,
    /// Cosmetic randomness (pupil jitter), kept apart from the sim RNG
    cosmetic_rng: Pcg32,
}

impl<K: KeyValueStore> Driver<K> {
    /// Load the stored best score, settings and balance and build a fresh game
    pub fn new(seed: u64, field: Field, store: K) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let tuning = Tuning::load(&store);
        let mut state = GameState::with_tuning(seed, field, tuning);
        state.high_score = high_score.best;

        log::info!(
            "Game initialized with seed {} on a {}x{} field",
            seed,
            field.width,
            field.height
        );

        Self {
            state,
            store,
            high_score,
            settings,
            input: InputState::default(),
            cosmetic_rng: Pcg32::seed_from_u64(seed.rotate_left(32)),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings and persist them
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(&mut self.store);
    }

    /// Flip mute and persist it; returns the volume to apply
    pub fn toggle_mute(&mut self) -> f32 {
        let mut settings = self.settings.clone();
        settings.muted = !settings.muted;
        log::info!("Sound {}", if settings.muted { "muted" } else { "on" });
        self.update_settings(settings);
        self.settings.effective_volume()
    }

    /// Key pressed; returns true if it toggled pause
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.input.key_down(key) {
            Some(Key::Pause) => self.toggle_pause(),
            Some(Key::Mute) => {
                self.toggle_mute();
                false
            }
            _ => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Start the first run
    pub fn start(&mut self, name: &str) -> bool {
        self.input.clear();
        sim::start_run(&mut self.state, name)
    }

    pub fn toggle_pause(&mut self) -> bool {
        sim::toggle_pause(&mut self.state)
    }

    /// Start over after game over
    pub fn play_again(&mut self) -> bool {
        self.input.clear();
        sim::restart(&mut self.state)
    }

    /// Draw the current state without advancing it
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let options = SceneOptions::from_settings(&self.settings);
        draw_frame(surface, &self.state, &mut self.cosmetic_rng, options);
    }

    /// Run one frame at wall-clock time `now_ms`
    pub fn frame<S: Surface + ?Sized, A: AudioSink + ?Sized>(
        &mut self,
        surface: &mut S,
        audio: &mut A,
        now_ms: f64,
    ) -> FrameOutcome {
        if !self.is_running() {
            return FrameOutcome::Stop;
        }

        self.render(surface);
        sim::tick(&mut self.state, &self.input.to_tick_input(), now_ms);

        for event in self.state.drain_events() {
            audio.play(SoundEffect::for_event(&event));
            if let GameEvent::GameOver { score } = event {
                self.high_score.submit(score, &mut self.store);
            }
        }

        if self.is_running() {
            FrameOutcome::Continue
        } else {
            FrameOutcome::Stop
        }
    }
}
