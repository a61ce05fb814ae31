//! Walkaround configuration.
//!
//! Every section is `#[serde(default)]`, so a config file only needs to name
//! the values it overrides. Files are YAML (`.yaml` / `.yml`) or JSON
//! (`.json`), chosen by extension.

use serde::{Deserialize, Serialize};
use std::path::Path;
use walkaround_input::{KeyBindings, normalize_key};

/// Errors from loading, saving or validating a config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension: {0:?}")]
    UnsupportedExtension(String),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Room geometry and colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Edge length of the square room.
    pub size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Edge length of the floor plane (extends past the walls).
    pub floor_size: f32,
    /// Checker tiles per floor edge.
    pub floor_repeat: u32,
    pub background_color: u32,
    pub wall_color: u32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            wall_height: 10.0,
            wall_thickness: 1.0,
            floor_size: 100.0,
            floor_repeat: 20,
            background_color: 0xaaaaaa,
            wall_color: 0x999999,
        }
    }
}

/// Player movement and jump tunables. Speeds are per frame, not per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Player radius kept between the eye and every wall.
    pub margin: f32,
    /// Eye height when standing on the floor.
    pub ground_level: f32,
    pub move_speed: f32,
    pub jump_height: f32,
    pub gravity: f32,
    /// Tolerance for "standing on the ground" when triggering a jump.
    pub ground_epsilon: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            margin: 1.0,
            ground_level: 2.0,
            move_speed: 0.15,
            jump_height: 3.0,
            gravity: 0.01,
            ground_epsilon: 0.001,
        }
    }
}

/// Projection and mouse-look parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians of rotation per pixel of mouse motion.
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.002,
        }
    }
}

/// Full demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub room: RoomConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub keys: KeyBindings,
}

impl WalkConfig {
    /// Maximum |x| or |z| the player may reach.
    pub fn boundary_limit(&self) -> f32 {
        self.room.size / 2.0 - self.player.margin
    }

    /// Initial upward velocity of a jump: `sqrt(2 * gravity * jump_height)`.
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.player.gravity * self.player.jump_height).sqrt()
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = match extension(path).as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedExtension(other.to_string())),
        };
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config, format chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = match extension(path).as_str() {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "json" => serde_json::to_string_pretty(self)?,
            other => return Err(ConfigError::UnsupportedExtension(other.to_string())),
        };
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the locomotion and scene code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("room.size", self.room.size)?;
        positive("room.wall_height", self.room.wall_height)?;
        positive("room.wall_thickness", self.room.wall_thickness)?;
        positive("room.floor_size", self.room.floor_size)?;
        positive("player.move_speed", self.player.move_speed)?;
        positive("player.jump_height", self.player.jump_height)?;
        positive("player.gravity", self.player.gravity)?;
        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("camera.near", self.camera.near)?;

        if self.player.margin.is_nan() || self.player.margin < 0.0 {
            return Err(invalid("player.margin", "must be non-negative"));
        }
        if self.player.ground_epsilon.is_nan() || self.player.ground_epsilon < 0.0 {
            return Err(invalid("player.ground_epsilon", "must be non-negative"));
        }
        if !self.player.ground_level.is_finite() {
            return Err(invalid("player.ground_level", "must be finite"));
        }
        if self.room.floor_repeat == 0 {
            return Err(invalid("room.floor_repeat", "must be at least 1"));
        }
        if self.boundary_limit() <= 0.0 {
            return Err(invalid(
                "player.margin",
                format!("leaves no walkable area in a room of size {}", self.room.size),
            ));
        }
        if self.camera.far <= self.camera.near {
            return Err(invalid("camera.far", "must be greater than camera.near"));
        }
        for (action, keys) in self.keys.actions() {
            if keys.is_empty() {
                return Err(invalid("keys", format!("{action} has no key bound")));
            }
            // Bindings are matched against normalized names; `W` would never fire.
            if let Some(key) = keys.iter().find(|k| normalize_key(k) != **k) {
                return Err(invalid(
                    "keys",
                    format!("{action} key {key:?} should be written as {:?}", normalize_key(key)),
                ));
            }
        }
        Ok(())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_room() {
        let c = WalkConfig::default();
        assert_eq!(c.boundary_limit(), 24.0);
        assert_eq!(c.player.ground_level, 2.0);
        assert_eq!(c.player.move_speed, 0.15);
        c.validate().unwrap();
    }

    #[test]
    fn jump_velocity_from_height_and_gravity() {
        let c = WalkConfig::default();
        assert!((c.jump_velocity() - 0.06_f32.sqrt()).abs() < 1e-6);
        assert!((c.jump_velocity() - 0.2449).abs() < 1e-4);
    }

    #[test]
    fn shipped_config_equals_defaults() {
        let text = include_str!("../../../config/walkaround.yaml");
        let c: WalkConfig = serde_yaml::from_str(text).unwrap();
        assert_eq!(c, WalkConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c: WalkConfig = serde_yaml::from_str("player:\n  move_speed: 0.3\n").unwrap();
        assert_eq!(c.player.move_speed, 0.3);
        assert_eq!(c.player.gravity, 0.01);
        assert_eq!(c.room, RoomConfig::default());
    }

    #[test]
    fn save_and_load_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("walk.yaml");
        let mut c = WalkConfig::default();
        c.room.size = 30.0;
        c.save(&path).unwrap();
        let loaded = WalkConfig::load(&path).unwrap();
        assert_eq!(loaded, c);
    }

    #[test]
    fn load_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("walk.json");
        std::fs::write(&path, r#"{ "player": { "jump_height": 5.0 } }"#).unwrap();
        let loaded = WalkConfig::load(&path).unwrap();
        assert_eq!(loaded.player.jump_height, 5.0);
    }

    #[test]
    fn unknown_extension_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("walk.toml");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            WalkConfig::load(&path),
            Err(ConfigError::UnsupportedExtension(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn margin_too_large_is_invalid() {
        let mut c = WalkConfig::default();
        c.player.margin = 25.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "player.margin", .. })
        ));
    }

    #[test]
    fn non_positive_gravity_is_invalid() {
        let mut c = WalkConfig::default();
        c.player.gravity = 0.0;
        assert!(c.validate().is_err());
        c.player.gravity = f32::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn key_bindings_load_from_yaml() {
        let c: WalkConfig = serde_yaml::from_str("keys:\n  jump: [j]\n").unwrap();
        assert_eq!(c.keys.jump, vec!["j"]);
        assert_eq!(c.keys.forward, KeyBindings::default().forward);
        c.validate().unwrap();
    }

    #[test]
    fn empty_or_unnormalized_bindings_are_invalid() {
        let mut c = WalkConfig::default();
        c.keys.left.clear();
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { field: "keys", .. })));

        let mut c = WalkConfig::default();
        c.keys.forward = vec!["W".to_string()];
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { field: "keys", .. })));
    }

    #[test]
    fn invalid_file_fails_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("walk.yml");
        std::fs::write(&path, "camera:\n  near: 10.0\n  far: 5.0\n").unwrap();
        assert!(matches!(
            WalkConfig::load(&path),
            Err(ConfigError::Invalid { field: "camera.far", .. })
        ));
    }
}
