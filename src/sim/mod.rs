//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven, everything scales with `dt`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dragon;
pub mod entity;
pub mod food;
pub mod fox;
pub mod hunter;
pub mod input;
pub mod projectile;
pub mod session;
pub mod world;

pub use collision::{Rect, overlaps, point_in_rect, segment_intersects_rect, segment_intersects_segment};
pub use dragon::Dragon;
pub use entity::{Body, Entity, EntityId, EntityKind, Payload, Visual};
pub use food::Food;
pub use fox::Fox;
pub use hunter::{EvaderView, HitOutcome, Hunter, HunterState, speed_multiplier_for};
pub use input::{FrameInput, PlayerInput};
pub use projectile::{Fireball, Poo};
pub use session::{GamePhase, GameState};
pub use world::{GameEvent, Hud, World};
