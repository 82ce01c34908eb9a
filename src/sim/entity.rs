//! Entity record shared by every simulated object
//!
//! An entity is a common [`Body`] plus a variant [`Payload`]. The world keeps
//! all entities in one collection sorted by id; variant behavior is dispatched
//! from [`Entity::update`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::dragon::Dragon;
use super::food::Food;
use super::fox::Fox;
use super::hunter::{Hunter, HunterState};
use super::projectile::{Fireball, Poo};

/// Stable entity identifier, never reused within a world
pub type EntityId = u32;

/// Variant tag exposed to collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Evader,
    Attacker,
    Adversary,
    Resource,
    Obstacle,
    Projectile,
    Hazard,
}

/// Kinematic state common to all entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Once false, never true again; purged at end of frame
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            width,
            height,
            active: true,
        }
    }

    /// Semi-implicit Euler step
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.accel * dt;
        self.pos += self.vel * dt;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Bounding box (center-origin)
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    /// Keep the whole box inside `[padding, size - padding]`, zeroing velocity
    /// on any axis that had to be corrected
    pub fn clamp_to_bounds(&mut self, size: Vec2, padding: f32) {
        let half = Vec2::new(self.width / 2.0, self.height / 2.0);
        let lo = half + Vec2::splat(padding);
        let hi = size - half - Vec2::splat(padding);

        if self.pos.x < lo.x {
            self.pos.x = lo.x;
            self.vel.x = 0.0;
        } else if self.pos.x > hi.x {
            self.pos.x = hi.x;
            self.vel.x = 0.0;
        }

        if self.pos.y < lo.y {
            self.pos.y = lo.y;
            self.vel.y = 0.0;
        } else if self.pos.y > hi.y {
            self.pos.y = hi.y;
            self.vel.y = 0.0;
        }
    }
}

/// Variant-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    Evader(Fox),
    Attacker(Dragon),
    Adversary(Hunter),
    Resource(Food),
    Obstacle,
    Projectile(Fireball),
    Hazard(Poo),
}

/// Per-entity render feedback for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    /// Draw position (may differ from the body, e.g. bobbing food)
    pub pos: Vec2,
    pub alpha: f32,
    pub scale: f32,
    pub rotation: f32,
    /// Hunter is stunned or immobilized
    pub disabled: bool,
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    /// Opaque texture handle for the renderer, never inspected here
    pub texture: Option<String>,
    pub payload: Payload,
}

impl Entity {
    pub fn new(id: EntityId, body: Body, payload: Payload) -> Self {
        Self {
            id,
            body,
            texture: None,
            payload,
        }
    }

    pub fn with_texture(mut self, key: impl Into<String>) -> Self {
        self.texture = Some(key.into());
        self
    }

    pub fn kind(&self) -> EntityKind {
        match self.payload {
            Payload::Evader(_) => EntityKind::Evader,
            Payload::Attacker(_) => EntityKind::Attacker,
            Payload::Adversary(_) => EntityKind::Adversary,
            Payload::Resource(_) => EntityKind::Resource,
            Payload::Obstacle => EntityKind::Obstacle,
            Payload::Projectile(_) => EntityKind::Projectile,
            Payload::Hazard(_) => EntityKind::Hazard,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Advance timers and physics for one frame
    ///
    /// Player steering and hunter AI run before this; here every variant only
    /// ages and integrates. Obstacles never move.
    pub fn update(&mut self, dt: f32) {
        if !self.body.active {
            return;
        }

        match &mut self.payload {
            Payload::Obstacle => {}
            Payload::Projectile(fireball) => fireball.update(&mut self.body, dt),
            Payload::Hazard(poo) => poo.update(&mut self.body, dt),
            Payload::Resource(food) => food.update(&mut self.body, dt),
            Payload::Evader(fox) => {
                if !fox.captured {
                    self.body.integrate(dt);
                }
            }
            Payload::Attacker(_) | Payload::Adversary(_) => self.body.integrate(dt),
        }
    }

    pub fn visual(&self) -> Visual {
        let mut visual = Visual {
            pos: self.body.pos,
            alpha: 1.0,
            scale: 1.0,
            rotation: 0.0,
            disabled: false,
        };

        match &self.payload {
            Payload::Evader(fox) => visual.alpha = fox.alpha(),
            Payload::Adversary(hunter) => {
                visual.disabled =
                    matches!(hunter.state, HunterState::Stunned | HunterState::Immobilized);
            }
            Payload::Resource(food) => {
                visual.pos.y += food.draw_offset_y();
                visual.alpha = food.alpha();
                visual.scale = food.scale();
            }
            Payload::Projectile(fireball) => visual.rotation = fireball.rotation,
            Payload::Hazard(poo) => visual.alpha = poo.alpha(),
            Payload::Attacker(_) | Payload::Obstacle => {}
        }

        visual
    }

    pub fn as_hunter(&self) -> Option<&Hunter> {
        match &self.payload {
            Payload::Adversary(hunter) => Some(hunter),
            _ => None,
        }
    }

    pub fn as_fox(&self) -> Option<&Fox> {
        match &self.payload {
            Payload::Evader(fox) => Some(fox),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_applies_accel_then_velocity() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), 10.0, 10.0);
        body.vel = Vec2::new(10.0, 20.0);
        body.accel = Vec2::new(10.0, 25.0);

        body.integrate(0.1);

        assert!((body.vel.x - 11.0).abs() < 1e-5);
        assert!((body.vel.y - 22.5).abs() < 1e-5);
        assert!((body.pos.x - 101.1).abs() < 1e-4);
        assert!((body.pos.y - 102.25).abs() < 1e-4);
    }

    #[test]
    fn test_obstacle_never_moves() {
        let mut body = Body::new(Vec2::new(50.0, 50.0), 100.0, 100.0);
        body.vel = Vec2::new(100.0, 0.0);
        let mut obstacle = Entity::new(1, body, Payload::Obstacle);

        obstacle.update(1.0);

        assert_eq!(obstacle.body.pos, Vec2::new(50.0, 50.0));
        assert_eq!(obstacle.kind(), EntityKind::Obstacle);
    }

    #[test]
    fn test_inactive_entity_does_not_update() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 10.0);
        body.vel = Vec2::new(100.0, 0.0);
        body.deactivate();
        let mut entity = Entity::new(1, body, Payload::Attacker(Dragon::new()));

        entity.update(1.0);

        assert_eq!(entity.body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let size = Vec2::new(800.0, 600.0);
        let mut body = Body::new(Vec2::new(-20.0, 700.0), 30.0, 30.0);
        body.vel = Vec2::new(-100.0, 100.0);

        body.clamp_to_bounds(size, 5.0);

        assert_eq!(body.pos, Vec2::new(20.0, 580.0));
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_visual_reflects_variant_state() {
        let mut fox = Fox::new();
        fox.try_hide();
        let entity = Entity::new(1, Body::new(Vec2::ZERO, 30.0, 30.0), Payload::Evader(fox));
        assert_eq!(entity.visual().alpha, crate::consts::HIDING_ALPHA);

        let mut hunter = Hunter::with_patrol_points(Vec2::ZERO, vec![Vec2::X]);
        let mut body = Body::new(Vec2::ZERO, 30.0, 30.0);
        hunter.take_hit(&mut body);
        let entity = Entity::new(2, body, Payload::Adversary(hunter));
        assert!(entity.visual().disabled);
        assert_eq!(entity.kind(), EntityKind::Adversary);
    }

    #[test]
    fn test_rect_is_center_origin() {
        let body = Body::new(Vec2::new(100.0, 100.0), 30.0, 20.0);
        let rect = body.rect();
        assert_eq!(rect.min(), Vec2::new(85.0, 90.0));
        assert_eq!(rect.max(), Vec2::new(115.0, 110.0));
    }
}
