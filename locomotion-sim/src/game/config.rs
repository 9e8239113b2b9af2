//! Locomotion Configuration
//!
//! Tunable constants for the controller, camera and frame-rate meter.
//! All fields have defaults; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, raised once at setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value must be finite and strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// Value must be finite and not negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// Gravity must pull down.
    #[error("gravity must be negative, got {0}")]
    GravityNotDownward(f32),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Character locomotion tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Base ground speed (units/second)
    pub speed: f32,
    /// Sprint speed multiplier
    pub sprint_multiplier: f32,
    /// Jump apex height (units)
    pub jump_height: f32,
    /// Whether jump requests are honoured
    pub jump_enabled: bool,
    /// Gravity acceleration (negative = down)
    pub gravity: f32,
    /// Input smoothing speed; smooth time is its reciprocal
    pub input_smooth_speed: f32,
    /// Facing rotation rate (1/second, exponential approach)
    pub turn_rate: f32,

    /// Roll speed (units/second)
    pub roll_speed: f32,
    /// Roll duration (seconds)
    pub roll_duration: f32,
    /// Minimum time between roll starts (seconds)
    pub roll_cooldown: f32,
    /// Stamina spent per roll
    pub roll_cost: f32,

    /// Stamina capacity
    pub max_stamina: f32,
    /// Stamina drained per second of sprint
    pub movement_cost: f32,
    /// Stamina regenerated per second when not sprinting
    pub regen_rate: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            sprint_multiplier: 1.5,
            jump_height: 0.2,
            jump_enabled: false,
            gravity: -9.8,
            input_smooth_speed: 10.0,
            turn_rate: 10.0,
            roll_speed: 5.0,
            roll_duration: 0.6,
            roll_cooldown: 1.0,
            roll_cost: 20.0,
            max_stamina: 100.0,
            movement_cost: 10.0,
            regen_rate: 10.0,
        }
    }
}

impl LocomotionConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("speed", self.speed)?;
        positive("sprint_multiplier", self.sprint_multiplier)?;
        positive("input_smooth_speed", self.input_smooth_speed)?;
        positive("roll_speed", self.roll_speed)?;
        positive("roll_duration", self.roll_duration)?;
        positive("max_stamina", self.max_stamina)?;

        non_negative("jump_height", self.jump_height)?;
        non_negative("turn_rate", self.turn_rate)?;
        non_negative("roll_cooldown", self.roll_cooldown)?;
        non_negative("roll_cost", self.roll_cost)?;
        non_negative("movement_cost", self.movement_cost)?;
        non_negative("regen_rate", self.regen_rate)?;

        if !(self.gravity.is_finite() && self.gravity < 0.0) {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }
        Ok(())
    }

    /// Smooth time used for input damping.
    #[inline]
    pub fn input_smooth_time(&self) -> f32 {
        1.0 / self.input_smooth_speed
    }

    /// Initial vertical velocity that reaches `jump_height` under `gravity`.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Follow camera tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the target before yaw is applied
    pub offset: [f32; 3],
    /// Point above the target the camera looks at
    pub look_offset: [f32; 3],
    /// Degrees of yaw per unit of pointer delta per second
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [5.0, 3.0, 0.0],
            look_offset: [0.0, 1.5, 0.0],
            rotation_speed: 15.0,
        }
    }
}

/// Frame-rate meter tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsConfig {
    /// Seconds between published readings
    pub update_interval: f32,
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self { update_interval: 0.5 }
    }
}

/// Everything the demo binary reads from disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Character tunables
    pub locomotion: LocomotionConfig,
    /// Camera tunables
    pub camera: CameraConfig,
    /// Frame-rate meter tunables
    pub fps: FpsConfig,
}

impl SimConfig {
    /// Load from a JSON file and validate the locomotion section.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.locomotion.validate()?;
        positive("fps.update_interval", config.fps.update_interval)?;
        Ok(config)
    }
}
