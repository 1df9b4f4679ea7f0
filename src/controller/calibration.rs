//! # Calibration Module
//!
//! Shapes raw accelerometer and extension axis values.
//!
//! ## Power Curve
//!
//! Diagnostic axis values use a fourth-root response:
//!
//! `output = scale * (raw / 512)^0.25` for non-negative input, mirrored for
//! negative input with its own scale.
//!
//! The curve amplifies fine motion near the origin and compresses large
//! excursions, so small tremor stays small while large tilts saturate
//! smoothly.
//!
//! ## Relative Motion
//!
//! The pointer path uses a flat linear gain instead of the curve. The shaped
//! value is then multiplied by the pointer scale and rounded when the move is
//! emitted:
//!
//! `delta = round(raw * gain * pointer_scale)`
//!
//! ## Usage
//!
//! ```
//! use wiimote_pointer::controller::calibration::{shape_axis, MotionShaper};
//!
//! assert!((shape_axis(512, 10.0, 10.0) - 10.0).abs() < 1e-9);
//!
//! let shaper = MotionShaper::default();
//! let shaped = shaper.shape_relative_motion(50, -30);
//! assert_eq!(shaper.to_pointer_delta(shaped), (50, -30));
//! ```

/// Divisor normalizing raw axis values before the power curve
pub const CURVE_DIVISOR: f64 = 512.0;

/// Exponent of the power curve (fourth root)
pub const CURVE_EXPONENT: f64 = 0.25;

/// Default linear gain of the accelerometer-to-pointer path
pub const DEFAULT_ACCEL_GAIN: f64 = 0.1;

/// Default multiplier applied when a shaped move is emitted
pub const DEFAULT_POINTER_SCALE: f64 = 10.0;

/// Applies the fourth-root curve to a raw axis value.
///
/// # Arguments
///
/// * `raw` - Raw axis value
/// * `scale_positive` - Output scale for non-negative input
/// * `scale_negative` - Output scale for negative input
///
/// # Examples
///
/// ```
/// use wiimote_pointer::controller::calibration::shape_axis;
///
/// assert_eq!(shape_axis(0, 10.0, 5.0), 0.0);
/// assert!((shape_axis(-512, 10.0, 5.0) + 5.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn shape_axis(raw: i32, scale_positive: f64, scale_negative: f64) -> f64 {
    PowerCurve::new(CURVE_DIVISOR, scale_positive, scale_negative).apply(raw)
}

/// Fourth-root response curve with a configurable divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurve {
    divisor: f64,
    scale_positive: f64,
    scale_negative: f64,
}

impl PowerCurve {
    /// Creates a curve. A non-positive divisor falls back to [`CURVE_DIVISOR`].
    #[must_use]
    pub fn new(divisor: f64, scale_positive: f64, scale_negative: f64) -> Self {
        Self {
            divisor: if divisor > 0.0 { divisor } else { CURVE_DIVISOR },
            scale_positive,
            scale_negative,
        }
    }

    /// Curve with the same scale on both sides.
    #[must_use]
    pub fn symmetric(divisor: f64, scale: f64) -> Self {
        Self::new(divisor, scale, scale)
    }

    /// Applies the curve to a raw value.
    #[must_use]
    pub fn apply(&self, raw: i32) -> f64 {
        let normalized = f64::from(raw) / self.divisor;
        if normalized >= 0.0 {
            self.scale_positive * normalized.powf(CURVE_EXPONENT)
        } else {
            -self.scale_negative * (-normalized).powf(CURVE_EXPONENT)
        }
    }
}

/// Power curves for an (x, y, z) accelerometer triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelCurve {
    pub x: PowerCurve,
    pub y: PowerCurve,
    pub z: PowerCurve,
}

impl Default for AccelCurve {
    fn default() -> Self {
        Self::from_config(CURVE_DIVISOR, 10.0, 5.0, 5.0)
    }
}

impl AccelCurve {
    /// Creates the triple curve from config values.
    #[must_use]
    pub fn from_config(divisor: f64, scale_x: f64, scale_y: f64, scale_z: f64) -> Self {
        Self {
            x: PowerCurve::symmetric(divisor, scale_x),
            y: PowerCurve::symmetric(divisor, scale_y),
            z: PowerCurve::symmetric(divisor, scale_z),
        }
    }

    /// Shapes a raw (x, y, z) triple.
    #[must_use]
    pub fn apply(&self, x: i32, y: i32, z: i32) -> (f64, f64, f64) {
        (self.x.apply(x), self.y.apply(y), self.z.apply(z))
    }
}

/// Linear accelerometer-to-pointer shaping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionShaper {
    /// Linear gain applied to raw values.
    gain: f64,
    /// Multiplier applied when converting to an emitted delta.
    pointer_scale: f64,
    /// Raw magnitudes at or below this are clipped to zero.
    deadzone: i32,
}

impl Default for MotionShaper {
    fn default() -> Self {
        Self {
            gain: DEFAULT_ACCEL_GAIN,
            pointer_scale: DEFAULT_POINTER_SCALE,
            deadzone: 0,
        }
    }
}

impl MotionShaper {
    /// Creates a shaper from config values. A negative deadzone is treated as zero.
    #[must_use]
    pub fn new(gain: f64, pointer_scale: f64, deadzone: i32) -> Self {
        Self {
            gain,
            pointer_scale,
            deadzone: deadzone.max(0),
        }
    }

    /// Returns the configured gain.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Returns the configured pointer scale.
    #[must_use]
    pub fn pointer_scale(&self) -> f64 {
        self.pointer_scale
    }

    /// Returns the configured deadzone.
    #[must_use]
    pub fn deadzone(&self) -> i32 {
        self.deadzone
    }

    /// Applies deadzone clipping and the linear gain to a raw (x, y) pair.
    #[must_use]
    pub fn shape_relative_motion(&self, raw_x: i32, raw_y: i32) -> (f64, f64) {
        (self.shape_linear(raw_x), self.shape_linear(raw_y))
    }

    /// Converts shaped motion to the integer delta handed to the pointer.
    ///
    /// Out-of-range values saturate at the `i32` bounds.
    #[must_use]
    pub fn to_pointer_delta(&self, shaped: (f64, f64)) -> (i32, i32) {
        (
            (shaped.0 * self.pointer_scale).round() as i32,
            (shaped.1 * self.pointer_scale).round() as i32,
        )
    }

    #[inline]
    fn shape_linear(&self, raw: i32) -> f64 {
        if raw.unsigned_abs() <= self.deadzone.unsigned_abs() {
            0.0
        } else {
            self.gain * f64::from(raw)
        }
    }
}
