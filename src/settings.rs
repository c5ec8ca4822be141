//! Game settings and preferences
//!
//! Stored as JSON by whoever hosts the game; this crate only converts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings could not be read or written
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the facing angle and jump are read from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Crank sets the angle, jump only while the button is held
    #[default]
    Crank,
    /// Accelerometer tilt sets the angle, jump is always on
    Tilt,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Crank => "Crank",
            ControlMode::Tilt => "Tilt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "crank" => Some(ControlMode::Crank),
            "tilt" | "accelerometer" => Some(ControlMode::Tilt),
            _ => None,
        }
    }

    /// Whether to jump this frame given the button state
    pub fn jump(&self, button_held: bool) -> bool {
        match self {
            ControlMode::Crank => button_held,
            ControlMode::Tilt => true,
        }
    }
}

/// Map an accelerometer x reading in [-1, 1] to a facing angle in degrees
///
/// Full tilt either way points straight down; level points straight up.
pub fn tilt_to_angle(x: f32) -> u16 {
    let x = x.clamp(-1.0, 1.0);
    let degrees = if x < 0.0 { 360.0 + x * 180.0 } else { x * 180.0 };
    (degrees as i32).rem_euclid(360) as u16
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_mode: ControlMode,
    /// Meteors spawn on schedule either way; disabled ones are harmless
    pub meteors_enabled: bool,
    /// Level generation seed, `None` picks one per session
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Crank,
            meteors_enabled: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
