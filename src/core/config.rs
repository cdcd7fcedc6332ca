//! Game configuration loaded from an external RON file.
//!
//! Allows tweaking tuning values without recompilation. Every field has a
//! default, so a config file only needs to list what it overrides.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game_config.ron";

/// Errors that can occur when reading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {details}")]
    Read { path: String, details: String },

    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// What to do when a required image fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AssetFailurePolicy {
    /// Log the failure and keep waiting; the game never starts.
    #[default]
    Stall,
    /// Log the failure and show a visible error screen.
    Abort,
}

/// Tuning and environment values for a session.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Player movement in pixels per frame
    pub player_speed: f32,
    /// Player animation advances once every N frames
    pub player_frame_delay: u32,
    /// Coin animation advances once every N frames
    pub coin_animation_delay: u32,
    pub respawn_delay_ms: u64,
    /// Inset from each canvas edge for coin respawn positions
    pub spawn_margin: f32,
    pub notification_delay_secs: f32,
    pub notification_fade_secs: f32,
    /// Where the file bridge keeps the save
    pub save_path: PathBuf,
    /// `false` runs without a host bridge at all
    pub bridge_enabled: bool,
    pub asset_failure_policy: AssetFailurePolicy,
    /// Exit after this many frames (`None` runs forever)
    pub max_frames: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            player_speed: 5.0,
            player_frame_delay: 5,
            coin_animation_delay: 8,
            respawn_delay_ms: 500,
            spawn_margin: 25.0,
            notification_delay_secs: 1.0,
            notification_fade_secs: 0.3,
            save_path: PathBuf::from("game_save.json"),
            bridge_enabled: true,
            asset_failure_policy: AssetFailurePolicy::Stall,
            max_frames: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron_str(path: &str, contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(path, &contents)
    }

    /// Load config from [`CONFIG_PATH`], falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded game config from {}", CONFIG_PATH);
                config
            }
            Err(e @ ConfigError::Read { .. }) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.player_frame_delay == 0 {
            return Err(ConfigError::Invalid {
                field: "player_frame_delay",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.coin_animation_delay == 0 {
            return Err(ConfigError::Invalid {
                field: "coin_animation_delay",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.spawn_margin * 2.0 >= self.canvas_width.min(self.canvas_height) {
            return Err(ConfigError::Invalid {
                field: "spawn_margin",
                reason: format!(
                    "{} leaves no room inside a {}x{} canvas",
                    self.spawn_margin, self.canvas_width, self.canvas_height
                ),
            });
        }
        Ok(())
    }
}
