//! Hunter (adversary) AI
//!
//! State machine: Patrolling -> Chasing (world-triggered on sight) ->
//! Patrolling (target lost). Hits stun, poo immobilizes; both wear off back
//! into Patrolling. Hunters walk straight lines, obstacles only block sight.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, segment_intersects_rect};
use super::entity::{Body, EntityId};
use crate::consts::*;
use crate::{angle_between, heading_or};

/// Current hunter behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HunterState {
    #[default]
    Patrolling,
    Chasing,
    /// Knocked back by a fireball
    Stunned,
    /// Stuck in poo
    Immobilized,
}

/// What a fireball hit did to the hunter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Stunned,
    /// Lost health but stayed immobilized
    Wounded,
    /// Out of health, deactivated
    Disabled,
}

/// Snapshot of the fox that the AI resolves its target against each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaderView {
    pub id: EntityId,
    pub pos: Vec2,
    pub active: bool,
    pub hiding: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunter {
    pub state: HunterState,
    /// Fixed for the hunter's lifetime
    pub patrol_points: Vec<Vec2>,
    pub patrol_index: usize,
    /// Seconds left standing at the last reached patrol point
    pub patrol_wait: f32,
    pub stun_timer: f32,
    pub immobilized_timer: f32,
    pub health: i32,
    speed_multiplier: f32,
    pub vision_range: f32,
    pub vision_half_angle: f32,
    /// Last non-zero movement direction, used for the idle vision cone
    pub facing: Vec2,
    /// Fox being chased (non-owning)
    pub target: Option<EntityId>,
}

impl Hunter {
    /// Create a hunter with a random patrol loop around `spawn`
    pub fn new(spawn: Vec2, map_size: Vec2, rng: &mut impl Rng) -> Self {
        let points = generate_patrol_points(spawn, map_size, rng);
        Self::with_patrol_points(spawn, points)
    }

    pub fn with_patrol_points(spawn: Vec2, patrol_points: Vec<Vec2>) -> Self {
        let facing = patrol_points
            .first()
            .map_or(Vec2::X, |&p| heading_or(p - spawn, Vec2::X));

        Self {
            state: HunterState::Patrolling,
            patrol_points,
            patrol_index: 0,
            patrol_wait: 0.0,
            stun_timer: 0.0,
            immobilized_timer: 0.0,
            health: HUNTER_HEALTH,
            speed_multiplier: 1.0,
            vision_range: VISION_RANGE,
            vision_half_angle: VISION_HALF_ANGLE,
            facing,
            target: None,
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }

    /// Run one AI step: timers, then patrol or chase steering
    ///
    /// Only sets velocity; the world integrates positions afterwards.
    pub fn update_ai(
        &mut self,
        body: &mut Body,
        dt: f32,
        evader: Option<&EvaderView>,
        obstacles: &[Rect],
        rng: &mut impl Rng,
    ) {
        if !body.active {
            return;
        }

        match self.state {
            HunterState::Immobilized => {
                self.immobilized_timer -= dt;
                if self.immobilized_timer > 0.0 {
                    body.vel = Vec2::ZERO;
                    return;
                }
                self.immobilized_timer = 0.0;
                self.state = HunterState::Patrolling;
                log::debug!("Hunter freed from poo");
            }
            HunterState::Stunned => {
                self.stun_timer -= dt;
                if self.stun_timer > 0.0 {
                    body.vel = Vec2::ZERO;
                    return;
                }
                self.stun_timer = 0.0;
                self.state = HunterState::Patrolling;
            }
            HunterState::Patrolling | HunterState::Chasing => {}
        }

        match self.state {
            HunterState::Patrolling => self.patrol(body, dt, rng),
            HunterState::Chasing => self.chase(body, evader, obstacles),
            HunterState::Stunned | HunterState::Immobilized => {}
        }

        if body.vel != Vec2::ZERO {
            self.facing = body.vel.normalize_or_zero();
        }
    }

    fn patrol(&mut self, body: &mut Body, dt: f32, rng: &mut impl Rng) {
        if self.patrol_wait > 0.0 {
            self.patrol_wait -= dt;
            body.vel = Vec2::ZERO;
            return;
        }

        let Some(&waypoint) = self.patrol_points.get(self.patrol_index) else {
            body.vel = Vec2::ZERO;
            return;
        };

        if body.pos.distance(waypoint) < PATROL_ARRIVAL {
            self.patrol_index = (self.patrol_index + 1) % self.patrol_points.len();
            self.patrol_wait = rng.random_range(0.0..=MAX_PATROL_WAIT);
            body.vel = Vec2::ZERO;
        } else {
            let dir = (waypoint - body.pos).normalize_or_zero();
            body.vel = dir * PATROL_SPEED * self.speed_multiplier;
        }
    }

    fn chase(&mut self, body: &mut Body, evader: Option<&EvaderView>, obstacles: &[Rect]) {
        let dir = match evader {
            Some(e) if Some(e.id) == self.target && self.can_see(body, e, obstacles) => {
                (e.pos - body.pos).normalize_or_zero()
            }
            _ => {
                self.stop_chasing();
                return;
            }
        };

        body.vel = dir * CHASE_SPEED * self.speed_multiplier;
    }

    /// Range, vision cone and line-of-sight check
    ///
    /// A moving hunter looks along its velocity; a standing one keeps looking
    /// along its last facing with a narrower cone.
    pub fn can_see(&self, body: &Body, evader: &EvaderView, obstacles: &[Rect]) -> bool {
        if !evader.active || evader.hiding {
            return false;
        }

        let to_evader = evader.pos - body.pos;
        let distance = to_evader.length();
        if distance > self.vision_range {
            return false;
        }

        if distance > 0.0 {
            let moving = body.vel.normalize_or_zero();
            let (heading, half_angle) = if moving == Vec2::ZERO {
                (
                    self.facing,
                    IDLE_VISION_HALF_ANGLE.min(self.vision_half_angle),
                )
            } else {
                (moving, self.vision_half_angle)
            };

            if angle_between(heading, to_evader) > half_angle {
                return false;
            }
        }

        !obstacles
            .iter()
            .any(|rect| segment_intersects_rect(body.pos, evader.pos, rect))
    }

    /// Begin (or keep) chasing; ignored while stunned or immobilized
    pub fn start_chasing(&mut self, target: EntityId) -> bool {
        match self.state {
            HunterState::Patrolling | HunterState::Chasing => {
                self.state = HunterState::Chasing;
                self.target = Some(target);
                true
            }
            HunterState::Stunned | HunterState::Immobilized => false,
        }
    }

    pub fn stop_chasing(&mut self) {
        if self.state == HunterState::Chasing {
            self.state = HunterState::Patrolling;
            self.target = None;
        }
    }

    /// Take one fireball hit
    pub fn take_hit(&mut self, body: &mut Body) -> HitOutcome {
        self.health -= 1;
        body.vel = Vec2::ZERO;
        self.target = None;

        if self.health <= 0 {
            body.deactivate();
            return HitOutcome::Disabled;
        }

        if self.state == HunterState::Immobilized {
            return HitOutcome::Wounded;
        }

        self.state = HunterState::Stunned;
        self.stun_timer = STUN_DURATION;
        HitOutcome::Stunned
    }

    /// Step in poo; no effect while already stunned or immobilized
    pub fn immobilize(&mut self, body: &mut Body) -> bool {
        if matches!(
            self.state,
            HunterState::Stunned | HunterState::Immobilized
        ) {
            return false;
        }

        self.state = HunterState::Immobilized;
        self.immobilized_timer = IMMOBILIZED_DURATION;
        self.target = None;
        body.vel = Vec2::ZERO;
        true
    }

    pub fn is_immobilized(&self) -> bool {
        self.state == HunterState::Immobilized
    }
}

/// Difficulty to hunter speed multiplier, clamped to the allowed range
pub fn speed_multiplier_for(difficulty: f32) -> f32 {
    (1.0 + (difficulty - 1.0) * SPEED_PER_DIFFICULTY).clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER)
}

/// 3-5 points evenly spread by angle around `center` at random distances
fn generate_patrol_points(center: Vec2, map_size: Vec2, rng: &mut impl Rng) -> Vec<Vec2> {
    let count = rng.random_range(PATROL_MIN_POINTS..=PATROL_MAX_POINTS);

    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * TAU;
            let distance = PATROL_MIN_RADIUS + rng.random::<f32>() * PATROL_RADIUS;
            let point = center + Vec2::new(angle.cos(), angle.sin()) * distance;
            point.clamp(Vec2::ZERO, map_size)
        })
        .collect()
}
