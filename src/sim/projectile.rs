//! Finite-lifetime entities: fireballs and poo

use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;

/// Dragon fireball: flies straight until it expires or hits something
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub age: f32,
    pub lifetime: f32,
    /// Render rotation (radians)
    pub rotation: f32,
}

impl Default for Fireball {
    fn default() -> Self {
        Self::new()
    }
}

impl Fireball {
    pub fn new() -> Self {
        Self {
            age: 0.0,
            lifetime: FIREBALL_LIFETIME,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        self.age += dt;
        if self.age >= self.lifetime {
            body.deactivate();
            return;
        }

        body.integrate(dt);
        self.rotation += FIREBALL_SPIN * dt;
    }
}

/// Left behind when the fox eats; immobilizes hunters that step in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poo {
    pub remaining: f32,
}

impl Default for Poo {
    fn default() -> Self {
        Self::new()
    }
}

impl Poo {
    pub fn new() -> Self {
        Self::with_lifetime(POO_LIFETIME)
    }

    pub fn with_lifetime(lifetime: f32) -> Self {
        Self {
            remaining: lifetime,
        }
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            body.deactivate();
        }
    }

    /// Fades linearly over the final seconds
    pub fn alpha(&self) -> f32 {
        if self.remaining < POO_FADE_TIME {
            (self.remaining / POO_FADE_TIME).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn remaining_lifespan(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_poo_lifetime() {
        let mut poo = Poo::new();
        let mut body = Body::new(Vec2::new(150.0, 150.0), POO_SIZE, POO_SIZE);

        poo.update(&mut body, 14.9);
        assert!(body.active);
        assert!((poo.remaining_lifespan() - 0.1).abs() < 1e-3);

        poo.update(&mut body, 0.2);
        assert!(!body.active);
    }

    #[test]
    fn test_poo_fades_out() {
        let mut poo = Poo::new();
        let mut body = Body::new(Vec2::ZERO, POO_SIZE, POO_SIZE);
        assert_eq!(poo.alpha(), 1.0);

        poo.update(&mut body, 13.5);
        assert!((poo.alpha() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_fireball_moves_and_spins() {
        let mut fireball = Fireball::new();
        let mut body = Body::new(Vec2::ZERO, FIREBALL_SIZE, FIREBALL_SIZE);
        body.vel = Vec2::new(FIREBALL_SPEED, 0.0);

        fireball.update(&mut body, 0.5);

        assert!(body.active);
        assert!((body.pos.x - 200.0).abs() < 1e-3);
        assert!((fireball.rotation - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_fireball_expires() {
        let mut fireball = Fireball::new();
        let mut body = Body::new(Vec2::ZERO, FIREBALL_SIZE, FIREBALL_SIZE);
        body.vel = Vec2::new(FIREBALL_SPEED, 0.0);

        fireball.update(&mut body, 1.9);
        assert!(body.active);
        fireball.update(&mut body, 0.2);
        assert!(!body.active);
    }
}
