//! Dragon (attacker) behavior

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::input::PlayerInput;
use crate::consts::*;
use crate::heading_or;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dragon {
    pub fire_cooldown: f32,
}

impl Dragon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(&mut self, body: &mut Body, dt: f32, input: &PlayerInput) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        if !body.active {
            return;
        }

        body.vel = input.direction * DRAGON_SPEED;
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Fire a fireball, returning its unit direction
    ///
    /// With `aim` the shot heads for that point, otherwise along the current
    /// velocity (+X when standing still). `None` while on cooldown.
    pub fn fire(&mut self, body: &Body, aim: Option<Vec2>) -> Option<Vec2> {
        if !body.active || !self.can_fire() {
            return None;
        }

        let heading = heading_or(body.vel, Vec2::X);
        let dir = match aim {
            Some(target) => heading_or(target - body.pos, heading),
            None => heading,
        };

        self.fire_cooldown = FIRE_COOLDOWN;
        Some(dir)
    }
}

/// Closest candidate to `from`; ties keep the first seen
pub fn nearest(from: Vec2, candidates: impl IntoIterator<Item = Vec2>) -> Option<Vec2> {
    candidates.into_iter().fold(None, |best, pos| match best {
        Some(b) if from.distance_squared(b) <= from.distance_squared(pos) => Some(b),
        _ => Some(pos),
    })
}
