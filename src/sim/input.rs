//! Per-frame player input
//!
//! Raw key/touch capture lives outside the simulation; the platform layer
//! fills these structs once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One player's movement and action request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement direction, each axis in [-1, 1], length at most 1
    pub direction: Vec2,
    /// Hide (fox) or aimed fire (dragon)
    pub action: bool,
}

impl PlayerInput {
    pub fn new(direction: Vec2, action: bool) -> Self {
        Self {
            direction: sanitize_direction(direction),
            action,
        }
    }

    /// Build from four digital keys; diagonals are normalized
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        let direction = Vec2::new(axis(left, right), axis(up, down));
        Self {
            direction: direction.normalize_or_zero(),
            action: false,
        }
    }
}

/// Clamp each axis to [-1, 1] and keep the length at most 1
fn sanitize_direction(direction: Vec2) -> Vec2 {
    if !direction.is_finite() {
        return Vec2::ZERO;
    }
    direction.clamp(Vec2::NEG_ONE, Vec2::ONE).clamp_length_max(1.0)
}

/// Everything the world consumes in a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub evader: PlayerInput,
    pub attacker: PlayerInput,
    /// Dragon fires along its heading instead of auto-aiming
    pub fire_forward: bool,
    /// Start or replay trigger, only read outside of play
    pub start: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_diagonal_is_normalized() {
        let input = PlayerInput::from_keys(true, false, false, true);
        assert!((input.direction.length() - 1.0).abs() < 1e-5);
        assert!(input.direction.x > 0.0);
        assert!(input.direction.y < 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let input = PlayerInput::from_keys(true, true, true, false);
        assert_eq!(input.direction, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_analog_direction_is_clamped() {
        let input = PlayerInput::new(Vec2::new(3.0, 3.0), true);
        assert!(input.direction.length() <= 1.0 + 1e-5);
        assert!(input.action);

        let input = PlayerInput::new(Vec2::new(0.3, 0.0), false);
        assert_eq!(input.direction, Vec2::new(0.3, 0.0));

        let input = PlayerInput::new(Vec2::new(f32::NAN, 1.0), false);
        assert_eq!(input.direction, Vec2::ZERO);
    }
}
