//! Fox Escape - A two-player chase/evade arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, hunter AI, collisions, session state)
//! - `config`: Map descriptors and session tuning

pub mod config;
pub mod sim;

pub use config::{ConfigError, MapConfig, SessionConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Fox (evader) defaults
    pub const FOX_SIZE: f32 = 30.0;
    pub const FOX_SPEED: f32 = 200.0;
    /// Seconds the fox stays hidden
    pub const HIDE_DURATION: f32 = 2.0;
    /// Seconds after a hide ends before the fox can hide again
    pub const HIDE_COOLDOWN: f32 = 10.0;
    /// Distance the fox is pushed back when bumping into an obstacle
    pub const FOX_REBOUND: f32 = 10.0;
    /// Sprite alpha while hiding (still visible to the player)
    pub const HIDING_ALPHA: f32 = 0.7;
    /// Inset from the map border that players are clamped to
    pub const MAP_PADDING: f32 = 5.0;

    /// Dragon (attacker) defaults
    pub const DRAGON_SIZE: f32 = 40.0;
    pub const DRAGON_SPEED: f32 = 150.0;
    /// Seconds between fireballs
    pub const FIRE_COOLDOWN: f32 = 0.5;
    /// Dragon spawns offset from the fox on both axes
    pub const DRAGON_SPAWN_OFFSET: f32 = 50.0;

    /// Hunter (adversary) defaults
    pub const HUNTER_SIZE: f32 = 30.0;
    pub const HUNTER_HEALTH: i32 = 2;
    pub const PATROL_SPEED: f32 = 50.0;
    pub const CHASE_SPEED: f32 = 180.0;
    /// Patrol points are within this distance (plus `PATROL_MIN_RADIUS`) of the spawn point
    pub const PATROL_RADIUS: f32 = 200.0;
    pub const PATROL_MIN_RADIUS: f32 = 50.0;
    pub const PATROL_MIN_POINTS: usize = 3;
    pub const PATROL_MAX_POINTS: usize = 5;
    /// Distance at which a patrol point counts as reached
    pub const PATROL_ARRIVAL: f32 = 10.0;
    /// Upper bound of the random wait at each patrol point (seconds)
    pub const MAX_PATROL_WAIT: f32 = 2.0;
    pub const VISION_RANGE: f32 = 250.0;
    /// Half of the 90 degree vision cone of a moving hunter
    pub const VISION_HALF_ANGLE: f32 = PI / 4.0;
    /// Half angle of the narrower cone used while standing still
    pub const IDLE_VISION_HALF_ANGLE: f32 = PI / 8.0;
    pub const STUN_DURATION: f32 = 3.0;
    pub const IMMOBILIZED_DURATION: f32 = 5.0;
    /// Difficulty to speed: 1 + (d - 1) * SPEED_PER_DIFFICULTY
    pub const SPEED_PER_DIFFICULTY: f32 = 0.2;
    pub const MIN_SPEED_MULTIPLIER: f32 = 0.5;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.5;

    /// Fireball (projectile) defaults
    pub const FIREBALL_SIZE: f32 = 20.0;
    pub const FIREBALL_SPEED: f32 = 400.0;
    pub const FIREBALL_LIFETIME: f32 = 2.0;
    /// Spin rate for rendering (radians/sec)
    pub const FIREBALL_SPIN: f32 = 5.0;

    /// Poo (hazard) defaults
    pub const POO_SIZE: f32 = 30.0;
    pub const POO_LIFETIME: f32 = 15.0;
    /// Final seconds of a poo's life during which it fades out
    pub const POO_FADE_TIME: f32 = 3.0;

    /// Food (resource) defaults
    pub const FOOD_SIZE: f32 = 20.0;
    pub const FOOD_COLLECT_TIME: f32 = 0.5;
    /// Collected food floats up this far while fading
    pub const FOOD_COLLECT_RISE: f32 = 20.0;
    pub const FOOD_BOB_AMPLITUDE: f32 = 3.0;
    pub const FOOD_BOB_RATE: f32 = 2.0;

    /// Spawn placement
    pub const MAX_SPAWN_ATTEMPTS: u32 = 50;
    /// Fraction of hunter spawn candidates drawn from the map edges
    pub const EDGE_SPAWN_BIAS: f64 = 0.7;
    /// Edge spawn band measured in from the border
    pub const EDGE_SPAWN_MARGIN: f32 = 50.0;
    /// Minimum hunter distance from both players at difficulty 1
    pub const HUNTER_SPAWN_CLEARANCE: f32 = 300.0;
    pub const HUNTER_SPAWN_CLEARANCE_MIN: f32 = 150.0;
    /// Minimum food distance from both players at difficulty 1
    pub const FOOD_SPAWN_CLEARANCE: f32 = 100.0;
    pub const FOOD_SPAWN_CLEARANCE_MIN: f32 = 50.0;

    /// Score values
    pub const SCORE_PER_FOOD: u32 = 10;
    pub const SCORE_PER_HUNTER: u32 = 25;

    /// Texture keys attached to entities for the renderer
    pub const FOX_TEXTURE: &str = "fox.png";
    pub const DRAGON_TEXTURE: &str = "dragon.png";
    pub const HUNTER_TEXTURE: &str = "hunter.png";
    pub const FOOD_TEXTURE: &str = "food.png";
    pub const FIREBALL_TEXTURE: &str = "fireball.png";
    pub const POO_TEXTURE: &str = "poo.png";
}

/// Unsigned angle between two directions in [0, π]
///
/// Either input being zero-length yields 0.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let a = a.normalize_or_zero();
    let b = b.normalize_or_zero();
    if a == Vec2::ZERO || b == Vec2::ZERO {
        return 0.0;
    }
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Unit direction of `v`, or `fallback` when `v` has no length
#[inline]
pub fn heading_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let dir = v.normalize_or_zero();
    if dir == Vec2::ZERO { fallback } else { dir }
}
