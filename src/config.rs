//! Game configuration
//!
//! Tuning values and the asset manifest, stored as a RON file next to the
//! executable. A missing file means compiled defaults; a malformed or
//! invalid file aborts startup. Nothing here is reloadable at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Hitbox;

/// Config file looked up relative to the working directory.
pub const CONFIG_PATH: &str = "tomb-runner.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("{name} animation has no frames")]
    EmptyAnimation { name: String },
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: String, value: f32 },
    #[error("spawn interval bounds inverted: min {min} > max {max}")]
    SpawnBounds { min: f32, max: f32 },
}

/// Paths of every image the game needs, grouped per role. All are loaded
/// up-front; any failure prevents the session from starting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPaths {
    /// Parallax bands, back to front.
    pub backgrounds: Vec<String>,
    pub stand: Vec<String>,
    pub run: Vec<String>,
    pub jump: Vec<String>,
    /// Pool the spawner picks from.
    pub obstacles: Vec<String>,
    pub life_icon: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            backgrounds: vec![
                "assets/sprites/background/enchanted_sky.png".into(),
                "assets/sprites/background/black_pyramids.png".into(),
                "assets/sprites/background/grey_pyramids.png".into(),
                "assets/sprites/background/front_pyramids.png".into(),
            ],
            stand: (1..=4)
                .map(|i| format!("assets/sprites/stand/cat_stand{i}.png"))
                .collect(),
            run: (1..=8)
                .map(|i| format!("assets/sprites/run/cat_run{i}.png"))
                .collect(),
            jump: (1..=4)
                .map(|i| format!("assets/sprites/jump/cat_jump{i}.png"))
                .collect(),
            obstacles: (1..=3)
                .map(|i| format!("assets/sprites/obstacles/tomb{i}.png"))
                .collect(),
            life_icon: "assets/sprites/ui/heart.png".into(),
        }
    }
}

/// All tuning in one place. Speeds and accelerations are px per reference
/// frame (60 FPS tick); intervals are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_width: i32,
    pub window_height: i32,
    /// Speed of the back-most layer; each layer in front adds the step.
    pub base_layer_speed: f32,
    pub layer_speed_step: f32,
    /// Height of every layer except the back-most, which fills the window.
    pub overlay_layer_height: f32,
    pub player_x: f32,
    pub stand_interval_ms: f32,
    pub run_interval_ms: f32,
    pub jump_interval_ms: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub player_hitbox: Hitbox,
    pub starting_lives: u32,
    pub obstacle_speed: f32,
    /// Obstacle images are drawn at this fraction of their pixel size.
    pub obstacle_scale: f32,
    pub obstacle_hitbox_inset: f32,
    pub spawn_min_ms: f32,
    pub spawn_max_ms: f32,
    /// Scale simulation steps by the real frame delta instead of the
    /// fixed 60 FPS tick. Off by default; the game is tuned against the
    /// fixed cadence.
    pub scale_time: bool,
    /// Stroke entity hitboxes for tuning.
    pub debug_hitboxes: bool,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1000,
            window_height: 400,
            base_layer_speed: 3.0,
            layer_speed_step: 0.5,
            overlay_layer_height: 351.0,
            player_x: 450.0,
            stand_interval_ms: 200.0,
            run_interval_ms: 100.0,
            jump_interval_ms: 100.0,
            jump_impulse: -12.0,
            gravity: 0.4,
            player_hitbox: Hitbox::new(10.0, 8.0, 44.0, 40.0),
            starting_lives: 3,
            obstacle_speed: 4.0,
            obstacle_scale: 0.5,
            obstacle_hitbox_inset: 4.0,
            spawn_min_ms: 2000.0,
            spawn_max_ms: 5000.0,
            scale_time: false,
            debug_hitboxes: false,
            assets: AssetPaths::default(),
        }
    }
}

impl GameConfig {
    /// Load from `path`, falling back to defaults when the file does not
    /// exist. Parse and validation failures are fatal.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self::default().validate();
            }
            Err(e) => return Err(ConfigError::Io { path: path.to_string(), source: e }),
        };
        let cfg: GameConfig = ron::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        cfg.validate()
    }

    /// The browser build has no filesystem; it always runs the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default(_path: &str) -> Result<Self, ConfigError> {
        Self::default().validate()
    }

    /// Check the cross-field rules the type system cannot.
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("stand_interval_ms", self.stand_interval_ms),
            ("run_interval_ms", self.run_interval_ms),
            ("jump_interval_ms", self.jump_interval_ms),
            ("gravity", self.gravity),
            ("obstacle_scale", self.obstacle_scale),
            ("spawn_min_ms", self.spawn_min_ms),
            ("spawn_max_ms", self.spawn_max_ms),
            ("starting_lives", self.starting_lives as f32),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name: name.to_string(), value });
            }
        }
        if self.spawn_min_ms > self.spawn_max_ms {
            return Err(ConfigError::SpawnBounds {
                min: self.spawn_min_ms,
                max: self.spawn_max_ms,
            });
        }
        for (name, set) in [
            ("backgrounds", &self.assets.backgrounds),
            ("stand", &self.assets.stand),
            ("run", &self.assets.run),
            ("jump", &self.assets.jump),
            ("obstacles", &self.assets.obstacles),
        ] {
            if set.is_empty() {
                return Err(ConfigError::EmptyAnimation { name: name.to_string() });
            }
        }
        if self.player_hitbox.w < 0.0 || self.player_hitbox.h < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "player_hitbox size".to_string(),
                value: self.player_hitbox.w.min(self.player_hitbox.h),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_spawn_bounds_rejected() {
        let cfg = GameConfig { spawn_min_ms: 5000.0, spawn_max_ms: 2000.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::SpawnBounds { .. })));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let cfg = GameConfig { run_interval_ms: 0.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn test_empty_frame_list_rejected() {
        let mut cfg = GameConfig::default();
        cfg.assets.run.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyAnimation { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.ron");
        let cfg = GameConfig::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn test_round_trips_through_ron_on_disk() {
        let cfg = GameConfig { obstacle_speed: 6.5, starting_lives: 9, ..Default::default() };
        let text = ron::ser::to_string_pretty(&cfg, ron::ser::PrettyConfig::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tomb-runner.ron");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = GameConfig::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tomb-runner.ron");
        std::fs::write(&path, "(starting_lives: 5)").unwrap();
        let cfg = GameConfig::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.starting_lives, 5);
        assert_eq!(cfg.window_width, GameConfig::default().window_width);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tomb-runner.ron");
        std::fs::write(&path, "(starting_lives: \"many\")").unwrap();
        assert!(matches!(
            GameConfig::load_or_default(path.to_str().unwrap()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
