//! Fox (evader) behavior
//!
//! Input-driven movement plus the hide ability. Hide duration and cooldown
//! never run at the same time: the cooldown starts when a hide ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::input::PlayerInput;
use crate::consts::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fox {
    pub resources_collected: u32,
    pub captured: bool,
    hiding: bool,
    hide_cooldown: f32,
    hide_remaining: f32,
}

impl Fox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply player input: tick hide timers, steer, maybe hide
    pub fn control(&mut self, body: &mut Body, dt: f32, input: &PlayerInput) {
        if !body.active || self.captured {
            return;
        }

        self.tick_hiding(dt);

        body.vel = input.direction * FOX_SPEED;

        if input.action {
            self.try_hide();
        }
    }

    fn tick_hiding(&mut self, dt: f32) {
        if self.hiding {
            self.hide_remaining -= dt;
            if self.hide_remaining <= 0.0 {
                self.hiding = false;
                self.hide_remaining = 0.0;
                self.hide_cooldown = HIDE_COOLDOWN;
            }
        } else {
            self.hide_cooldown = (self.hide_cooldown - dt).max(0.0);
        }
    }

    /// Start hiding if not already hidden and the cooldown has elapsed
    pub fn try_hide(&mut self) -> bool {
        if self.hiding || self.hide_cooldown > 0.0 {
            return false;
        }
        self.hiding = true;
        self.hide_remaining = HIDE_DURATION;
        self.hide_cooldown = 0.0;
        true
    }

    pub fn is_hidden(&self) -> bool {
        self.hiding
    }

    /// Seconds until hiding is possible again (0 while hiding)
    pub fn hide_cooldown_remaining(&self) -> f32 {
        if self.hiding { 0.0 } else { self.hide_cooldown }
    }

    pub fn hide_time_remaining(&self) -> f32 {
        self.hide_remaining
    }

    /// Back to "can hide immediately", used on restart
    pub fn reset_hiding(&mut self) {
        self.hiding = false;
        self.hide_cooldown = 0.0;
        self.hide_remaining = 0.0;
    }

    /// Count a collected food; returns where the resulting poo lands
    pub fn collect_resource(&mut self, body: &Body) -> Vec2 {
        self.resources_collected += 1;
        body.pos
    }

    /// Bumped into an obstacle: push back against the velocity and stop
    pub fn rebound(&mut self, body: &mut Body) {
        body.pos -= body.vel.normalize_or_zero() * FOX_REBOUND;
        body.vel = Vec2::ZERO;
    }

    /// Caught by a hunter; hiding foxes slip away
    pub fn get_caught(&mut self, body: &mut Body) -> bool {
        if self.hiding || self.captured {
            return false;
        }
        self.captured = true;
        body.vel = Vec2::ZERO;
        body.deactivate();
        true
    }

    pub fn alpha(&self) -> f32 {
        if self.hiding { HIDING_ALPHA } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fox() -> (Fox, Body) {
        (
            Fox::new(),
            Body::new(Vec2::new(100.0, 100.0), FOX_SIZE, FOX_SIZE),
        )
    }

    fn idle() -> PlayerInput {
        PlayerInput::default()
    }

    #[test]
    fn test_control_sets_velocity() {
        let (mut fox, mut body) = fox();
        let input = PlayerInput::new(Vec2::new(0.5, -0.5), false);

        fox.control(&mut body, 0.16, &input);

        assert!((body.vel.x - FOX_SPEED * 0.5).abs() < 1e-4);
        assert!((body.vel.y + FOX_SPEED * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_action_hides() {
        let (mut fox, mut body) = fox();
        assert!(!fox.is_hidden());
        fox.control(&mut body, 0.16, &PlayerInput::new(Vec2::ZERO, true));
        assert!(fox.is_hidden());
        assert_eq!(fox.alpha(), HIDING_ALPHA);
    }

    #[test]
    fn test_hide_expires_after_duration() {
        let (mut fox, mut body) = fox();
        assert!(fox.try_hide());

        fox.control(&mut body, 1.9, &idle());
        assert!(fox.is_hidden());

        fox.control(&mut body, 0.2, &idle());
        assert!(!fox.is_hidden());
        assert_eq!(fox.alpha(), 1.0);
    }

    #[test]
    fn test_hide_cooldown_measured_from_hide_end() {
        let (mut fox, mut body) = fox();
        assert!(fox.try_hide());

        fox.control(&mut body, 2.1, &idle());
        assert!(!fox.is_hidden());

        assert!(!fox.try_hide());
        assert!(!fox.is_hidden());

        fox.control(&mut body, 5.0, &idle());
        assert!(!fox.try_hide());

        fox.control(&mut body, 5.1, &idle());
        assert!(fox.try_hide());
        assert!(fox.is_hidden());
    }

    #[test]
    fn test_cooldown_reporting() {
        let (mut fox, mut body) = fox();
        assert_eq!(fox.hide_cooldown_remaining(), 0.0);

        fox.try_hide();
        assert_eq!(fox.hide_cooldown_remaining(), 0.0);
        assert_eq!(fox.hide_time_remaining(), HIDE_DURATION);

        fox.control(&mut body, 2.1, &idle());
        assert_eq!(fox.hide_cooldown_remaining(), HIDE_COOLDOWN);
        assert_eq!(fox.hide_time_remaining(), 0.0);

        fox.control(&mut body, 4.0, &idle());
        assert!((fox.hide_cooldown_remaining() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_try_hide_while_hiding_fails() {
        let (mut fox, _) = fox();
        assert!(fox.try_hide());
        assert!(!fox.try_hide());
    }

    #[test]
    fn test_reset_hiding() {
        let (mut fox, mut body) = fox();
        fox.try_hide();
        fox.control(&mut body, 2.1, &idle());
        fox.reset_hiding();

        assert!(!fox.is_hidden());
        assert_eq!(fox.hide_cooldown_remaining(), 0.0);
        assert!(fox.try_hide());
    }

    #[test]
    fn test_collect_resource_counts() {
        let (mut fox, body) = fox();
        assert_eq!(fox.resources_collected, 0);
        let drop = fox.collect_resource(&body);
        assert_eq!(drop, body.pos);
        fox.collect_resource(&body);
        fox.collect_resource(&body);
        assert_eq!(fox.resources_collected, 3);
    }

    #[test]
    fn test_rebound() {
        let (mut fox, mut body) = fox();
        body.vel = Vec2::new(100.0, 0.0);

        fox.rebound(&mut body);

        assert_eq!(body.pos, Vec2::new(90.0, 100.0));
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_rebound_when_stationary_stays_put() {
        let (mut fox, mut body) = fox();
        fox.rebound(&mut body);
        assert_eq!(body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_get_caught() {
        let (mut fox, mut body) = fox();
        assert!(fox.get_caught(&mut body));
        assert!(fox.captured);
        assert!(!body.active);
    }

    #[test]
    fn test_hidden_fox_cannot_be_caught() {
        let (mut fox, mut body) = fox();
        fox.try_hide();
        assert!(!fox.get_caught(&mut body));
        assert!(body.active);
    }

    #[test]
    fn test_captured_fox_ignores_input() {
        let (mut fox, mut body) = fox();
        fox.get_caught(&mut body);
        fox.control(&mut body, 0.1, &PlayerInput::new(Vec2::X, true));
        assert_eq!(body.vel, Vec2::ZERO);
        assert!(!fox.is_hidden());
    }
}
