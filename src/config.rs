//! Map descriptors and session tuning
//!
//! Maps are static JSON-serializable descriptors; they are validated before a
//! world is built from them so the simulation never sees degenerate input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse map: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("obstacle {index} has an invalid position or size")]
    InvalidObstacle { index: usize },
    #[error("map has obstacles but no obstacle textures")]
    MissingObstacleTextures,
}

/// Obstacle rectangle, center-origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ObstacleConfig {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapTextures {
    pub background: String,
    /// One is picked at random per obstacle
    pub obstacles: Vec<String>,
}

/// Static map descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Food placed when the world is built
    #[serde(default)]
    pub resource_count: u32,
    /// Hunters placed when the world is built
    #[serde(default)]
    pub adversary_count: u32,
    #[serde(default)]
    pub textures: MapTextures,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
}

impl MapConfig {
    /// Parse and validate a JSON map descriptor
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let map: Self = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if let Some(index) = self.obstacles.iter().position(|o| {
            !positive(o.width) || !positive(o.height) || !o.x.is_finite() || !o.y.is_finite()
        }) {
            return Err(ConfigError::InvalidObstacle { index });
        }

        if !self.obstacles.is_empty() && self.textures.obstacles.is_empty() {
            return Err(ConfigError::MissingObstacleTextures);
        }

        Ok(())
    }

    pub fn size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width, self.height)
    }

    /// Built-in maps by (case-insensitive) name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "forest" => Some(Self::forest()),
            "meadow" => Some(Self::meadow()),
            _ => None,
        }
    }

    pub fn forest() -> Self {
        Self {
            name: "Forest".into(),
            width: 1600.0,
            height: 1200.0,
            resource_count: 10,
            adversary_count: 4,
            textures: MapTextures {
                background: "forest_bg.png".into(),
                obstacles: vec!["tree.png".into(), "rock.png".into()],
            },
            obstacles: vec![
                ObstacleConfig::new(200.0, 200.0, 120.0, 120.0),
                ObstacleConfig::new(500.0, 300.0, 120.0, 120.0),
                ObstacleConfig::new(700.0, 500.0, 100.0, 100.0),
                ObstacleConfig::new(300.0, 700.0, 120.0, 120.0),
                ObstacleConfig::new(900.0, 200.0, 120.0, 120.0),
                ObstacleConfig::new(1100.0, 400.0, 100.0, 100.0),
                ObstacleConfig::new(1300.0, 600.0, 120.0, 120.0),
                ObstacleConfig::new(400.0, 900.0, 120.0, 120.0),
                ObstacleConfig::new(600.0, 1000.0, 100.0, 100.0),
                ObstacleConfig::new(1000.0, 800.0, 120.0, 120.0),
                ObstacleConfig::new(1200.0, 900.0, 100.0, 100.0),
            ],
        }
    }

    pub fn meadow() -> Self {
        Self {
            name: "Meadow".into(),
            width: 1800.0,
            height: 1400.0,
            resource_count: 15,
            adversary_count: 5,
            textures: MapTextures {
                background: "meadow_bg.png".into(),
                obstacles: vec!["rock.png".into()],
            },
            obstacles: vec![
                ObstacleConfig::new(300.0, 300.0, 90.0, 90.0),
                ObstacleConfig::new(600.0, 400.0, 90.0, 90.0),
                ObstacleConfig::new(900.0, 600.0, 80.0, 80.0),
                ObstacleConfig::new(400.0, 800.0, 90.0, 90.0),
                ObstacleConfig::new(1000.0, 300.0, 90.0, 90.0),
                ObstacleConfig::new(1200.0, 500.0, 80.0, 80.0),
                ObstacleConfig::new(1400.0, 700.0, 90.0, 90.0),
                ObstacleConfig::new(500.0, 1000.0, 90.0, 90.0),
                ObstacleConfig::new(700.0, 1100.0, 80.0, 80.0),
                ObstacleConfig::new(1100.0, 900.0, 90.0, 90.0),
                ObstacleConfig::new(1300.0, 1000.0, 80.0, 80.0),
                ObstacleConfig::new(1500.0, 1200.0, 90.0, 90.0),
            ],
        }
    }
}

/// Session pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds between hunter spawns at difficulty 1
    pub adversary_spawn_interval: f32,
    /// Seconds between food spawns at difficulty 1
    pub resource_spawn_interval: f32,
    pub max_resources: usize,
    /// Difficulty gained per second of play
    pub difficulty_rate: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            adversary_spawn_interval: 5.0,
            resource_spawn_interval: 12.0,
            max_resources: 5,
            difficulty_rate: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(MapConfig::forest().validate().is_ok());
        assert!(MapConfig::meadow().validate().is_ok());
        assert_eq!(MapConfig::preset("FOREST"), Some(MapConfig::forest()));
        assert_eq!(MapConfig::preset("swamp"), None);
    }

    #[test]
    fn test_json_roundtrip_of_preset() {
        let json = serde_json::to_string(&MapConfig::meadow()).unwrap();
        let map = MapConfig::from_json(&json).unwrap();
        assert_eq!(map, MapConfig::meadow());
    }

    #[test]
    fn test_minimal_json() {
        let map = MapConfig::from_json(r#"{"name": "Empty", "width": 800, "height": 600}"#)
            .unwrap();
        assert_eq!(map.resource_count, 0);
        assert!(map.obstacles.is_empty());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            MapConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut map = MapConfig::forest();
        map.width = 0.0;
        assert!(matches!(
            map.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));

        map.width = f32::NAN;
        assert!(map.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_obstacle() {
        let mut map = MapConfig::forest();
        map.obstacles[3].height = -5.0;
        assert!(matches!(
            map.validate(),
            Err(ConfigError::InvalidObstacle { index: 3 })
        ));
    }

    #[test]
    fn test_rejects_missing_obstacle_textures() {
        let mut map = MapConfig::forest();
        map.textures.obstacles.clear();
        assert!(matches!(
            map.validate(),
            Err(ConfigError::MissingObstacleTextures)
        ));
    }

    #[test]
    fn test_session_defaults_fill_partial_json() {
        let cfg: SessionConfig = serde_json::from_str(r#"{"max_resources": 8}"#).unwrap();
        assert_eq!(cfg.max_resources, 8);
        assert_eq!(cfg.adversary_spawn_interval, 5.0);
        assert_eq!(cfg.difficulty_rate, 0.01);
    }
}
