//! Food (resource): bobs in place, plays a short pickup animation when eaten

use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Food {
    pub bob_time: f32,
    /// Seconds since collection started
    pub collecting: Option<f32>,
}

impl Food {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        match &mut self.collecting {
            Some(elapsed) => {
                *elapsed += dt;
                if *elapsed >= FOOD_COLLECT_TIME {
                    body.deactivate();
                }
            }
            None => self.bob_time += dt,
        }
    }

    /// Start the pickup animation; false if already being collected
    pub fn collect(&mut self) -> bool {
        if self.collecting.is_some() {
            return false;
        }
        self.collecting = Some(0.0);
        true
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting.is_some()
    }

    fn progress(&self) -> f32 {
        self.collecting
            .map_or(0.0, |t| (t / FOOD_COLLECT_TIME).clamp(0.0, 1.0))
    }

    /// Vertical draw offset: bobbing while idle, rising while collected
    pub fn draw_offset_y(&self) -> f32 {
        if self.is_collecting() {
            -FOOD_COLLECT_RISE * self.progress()
        } else {
            (self.bob_time * FOOD_BOB_RATE).sin() * FOOD_BOB_AMPLITUDE
        }
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn scale(&self) -> f32 {
        1.0 - 0.5 * self.progress()
    }
}
