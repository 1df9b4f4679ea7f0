//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and field is optional; missing values take the defaults
//! below. Command-line arguments override the file.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::bridge::mode::Mode;
use crate::controller::calibration::{AccelCurve, MotionShaper};
use crate::controller::motion_plus::IntegratorLimits;
use crate::error::{PointerBridgeError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub mode: ModeConfig,
    #[serde(default)]
    pub shaping: ShapingConfig,
    #[serde(default)]
    pub motion_plus: MotionPlusConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Virtual pointer configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PointerConfig {
    /// Pointer device node; empty means it must come from the command line
    #[serde(default)]
    pub device_path: String,
}

/// Controller configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    /// Sysfs path or 1-based index of the remote
    #[serde(default = "default_controller_device")]
    pub device: String,

    #[serde(default = "default_rescan_interval_ms")]
    pub rescan_interval_ms: u64,
}

/// Operating mode configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ModeConfig {
    #[serde(default)]
    pub mode: Mode,
}

/// Accelerometer shaping configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ShapingConfig {
    #[serde(default = "default_accel_gain")]
    pub accel_gain: f64,

    #[serde(default = "default_pointer_scale")]
    pub pointer_scale: f64,

    #[serde(default)]
    pub accel_deadzone: i32,

    #[serde(default = "default_curve_divisor")]
    pub curve_divisor: f64,

    #[serde(default = "default_curve_scale_x")]
    pub curve_scale_x: f64,

    #[serde(default = "default_curve_scale_y")]
    pub curve_scale_y: f64,

    #[serde(default = "default_curve_scale_z")]
    pub curve_scale_z: f64,
}

/// Motion-Plus integrator configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MotionPlusConfig {
    #[serde(default = "default_mp_divisor")]
    pub divisor: i32,

    #[serde(default = "default_mp_max_position")]
    pub max_position: i32,

    #[serde(default = "default_display_columns")]
    pub display_columns: i32,

    #[serde(default = "default_display_rows")]
    pub display_rows: i32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; empty logs to stderr only
    #[serde(default)]
    pub directory: String,
}

// Default value functions
fn default_controller_device() -> String { "1".to_string() }
fn default_rescan_interval_ms() -> u64 { 1000 }

fn default_accel_gain() -> f64 { 0.1 }
fn default_pointer_scale() -> f64 { 10.0 }
fn default_curve_divisor() -> f64 { 512.0 }
fn default_curve_scale_x() -> f64 { 10.0 }
fn default_curve_scale_y() -> f64 { 5.0 }
fn default_curve_scale_z() -> f64 { 5.0 }

fn default_mp_divisor() -> i32 { 100 }
fn default_mp_max_position() -> i32 { 10000 }
fn default_display_columns() -> i32 { 22 }
fn default_display_rows() -> i32 { 7 }

fn default_log_level() -> String { "info".to_string() }

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device: default_controller_device(),
            rescan_interval_ms: default_rescan_interval_ms(),
        }
    }
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            accel_gain: default_accel_gain(),
            pointer_scale: default_pointer_scale(),
            accel_deadzone: 0,
            curve_divisor: default_curve_divisor(),
            curve_scale_x: default_curve_scale_x(),
            curve_scale_y: default_curve_scale_y(),
            curve_scale_z: default_curve_scale_z(),
        }
    }
}

impl Default for MotionPlusConfig {
    fn default() -> Self {
        Self {
            divisor: default_mp_divisor(),
            max_position: default_mp_max_position(),
            display_columns: default_display_columns(),
            display_rows: default_display_rows(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn invalid(message: &str) -> PointerBridgeError {
    PointerBridgeError::Config(toml::de::Error::custom(message))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wiimote_pointer::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `Config` if any value is out of its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.controller.device.trim().is_empty() {
            return Err(invalid("controller device cannot be empty"));
        }

        if !(10..=60000).contains(&self.controller.rescan_interval_ms) {
            return Err(invalid("rescan_interval_ms must be between 10 and 60000"));
        }

        if !self.shaping.accel_gain.is_finite() || self.shaping.accel_gain <= 0.0 {
            return Err(invalid("accel_gain must be a positive number"));
        }

        if !self.shaping.pointer_scale.is_finite() || self.shaping.pointer_scale <= 0.0 {
            return Err(invalid("pointer_scale must be a positive number"));
        }

        if !(0..=512).contains(&self.shaping.accel_deadzone) {
            return Err(invalid("accel_deadzone must be between 0 and 512"));
        }

        if !self.shaping.curve_divisor.is_finite() || self.shaping.curve_divisor <= 0.0 {
            return Err(invalid("curve_divisor must be a positive number"));
        }

        for scale in [
            self.shaping.curve_scale_x,
            self.shaping.curve_scale_y,
            self.shaping.curve_scale_z,
        ] {
            if !scale.is_finite() || scale < 0.0 {
                return Err(invalid("curve scales must be non-negative numbers"));
            }
        }

        if self.motion_plus.divisor <= 0 {
            return Err(invalid("motion_plus divisor must be greater than 0"));
        }

        if self.motion_plus.max_position <= 0 {
            return Err(invalid("motion_plus max_position must be greater than 0"));
        }

        if self.motion_plus.display_columns <= 0 || self.motion_plus.display_rows <= 0 {
            return Err(invalid("motion_plus display size must be greater than 0"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(invalid("logging level must be one of trace, debug, info, warn, error"));
        }

        Ok(())
    }

    /// Relative motion shaper built from `[shaping]`
    #[must_use]
    pub fn motion_shaper(&self) -> MotionShaper {
        MotionShaper::new(
            self.shaping.accel_gain,
            self.shaping.pointer_scale,
            self.shaping.accel_deadzone,
        )
    }

    /// Diagnostic power curves built from `[shaping]`
    #[must_use]
    pub fn accel_curve(&self) -> AccelCurve {
        AccelCurve::from_config(
            self.shaping.curve_divisor,
            self.shaping.curve_scale_x,
            self.shaping.curve_scale_y,
            self.shaping.curve_scale_z,
        )
    }

    /// Integrator limits built from `[motion_plus]`
    #[must_use]
    pub fn integrator_limits(&self) -> IntegratorLimits {
        IntegratorLimits {
            divisor: self.motion_plus.divisor,
            max_position: self.motion_plus.max_position,
            columns: self.motion_plus.display_columns,
            rows: self.motion_plus.display_rows,
        }
    }
}
