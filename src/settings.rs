//! Runtime settings
//!
//! Read from an optional JSON file. Missing fields fall back to defaults so a
//! file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::consts::MAX_FRAME_STEP;
use crate::tuning::Physics;

/// Errors reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics tuning applied to every level
    pub physics: Physics,
    /// Cap on the elapsed time fed to a level per frame (seconds)
    pub max_frame_step: f32,
    /// Seed for coin phases; level `n` uses `seed + n`
    pub seed: u64,
    /// Index of the first level to play
    pub start_level: usize,
    /// Level pack file, built-in levels when unset
    pub level_pack: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: Physics::default(),
            max_frame_step: MAX_FRAME_STEP,
            seed: 0,
            start_level: 0,
            level_pack: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace nonsensical values with defaults
    pub fn sanitized(mut self) -> Self {
        self.physics = self.physics.sanitized();
        if self.max_frame_step.is_nan() || self.max_frame_step <= 0.0 {
            log::warn!(
                "max_frame_step {} is not positive, using {}",
                self.max_frame_step,
                MAX_FRAME_STEP
            );
            self.max_frame_step = MAX_FRAME_STEP;
        }
        self
    }
}
