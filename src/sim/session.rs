//! Session state machine and difficulty pacing
//!
//! Idle -> Playing -> Ended -> (replay) Playing. Difficulty only grows while
//! playing and drives both spawn intervals.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the start trigger
    #[default]
    Idle,
    Playing,
    /// Fox was caught, waiting for replay
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    phase: GamePhase,
    score: u32,
    difficulty: f32,
    since_adversary_spawn: f32,
    since_resource_spawn: f32,
    config: SessionConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            difficulty: 1.0,
            since_adversary_spawn: 0.0,
            since_resource_spawn: 0.0,
            config,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Change phase; entering Playing resets score, difficulty and timers
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }

        log::info!("Game phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;

        if phase == GamePhase::Playing {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.score = 0;
        self.difficulty = 1.0;
        self.since_adversary_spawn = 0.0;
        self.since_resource_spawn = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_playing() {
            return;
        }

        self.difficulty += dt * self.config.difficulty_rate;
        self.since_adversary_spawn += dt;
        self.since_resource_spawn += dt;
    }

    /// True (and the timer restarts) once `interval / difficulty` has elapsed
    pub fn should_spawn_adversary(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        let due = self.config.adversary_spawn_interval / self.difficulty;
        if self.since_adversary_spawn >= due {
            self.since_adversary_spawn = 0.0;
            return true;
        }
        false
    }

    /// Food gets rarer with difficulty and is capped on the field
    pub fn should_spawn_resource(&mut self, on_field: usize) -> bool {
        if !self.is_playing() || on_field >= self.config.max_resources {
            return false;
        }

        let due = self.config.resource_spawn_interval * self.difficulty.sqrt();
        if self.since_resource_spawn >= due {
            self.since_resource_spawn = 0.0;
            return true;
        }
        false
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_since_adversary_spawn(&self) -> f32 {
        self.since_adversary_spawn
    }

    pub fn time_since_resource_spawn(&self) -> f32 {
        self.since_resource_spawn
    }
}
