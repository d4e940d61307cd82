//! Engine configuration.
//!
//! Deserialized from JSON with every field optional, so a config file only
//! needs to name what it overrides.

use std::path::Path;

use engine_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to load an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup parameters for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub gravity: Vec3,
    /// Stop [`Engine::run`](crate::Engine::run) after this many frames.
    /// Zero means run until [`Engine::stop`](crate::Engine::stop).
    pub max_frames: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            window_title: "Game Engine".to_string(),
            gravity: Vec3::new(0.0, -9.81, 0.0),
            max_frames: 0,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_window(mut self, width: u32, height: u32, title: impl Into<String>) -> Self {
        self.window_width = width;
        self.window_height = height;
        self.window_title = title.into();
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    #[must_use]
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
