//! # Motion-Plus Integrator
//!
//! Integrates gyroscope angular rates into a bounded position and maps it
//! onto a small display grid.
//!
//! Each sample adds `x / divisor` to the X accumulator and `z / divisor` to
//! the Y accumulator (integer division). Both accumulators are clamped to
//! `[0, max_position]` after every sample.
//!
//! A recalibration request is edge-triggered: the next sample rebases the
//! controller's normalization offsets by the sample's own values, then the
//! request is cleared. Later samples leave the offsets untouched until the
//! next request.

use super::event::AxisTriple;

/// Default rate divisor
pub const DEFAULT_DIVISOR: i32 = 100;
/// Default accumulator upper bound
pub const DEFAULT_MAX_POSITION: i32 = 10_000;
/// Default display columns (X cell range is 0..=columns)
pub const DEFAULT_COLUMNS: i32 = 22;
/// Default display rows (Y cell range is 0..=rows)
pub const DEFAULT_ROWS: i32 = 7;

/// Motion-Plus normalization offsets held by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MpNormalization {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub factor: i32,
}

/// Access to the controller's Motion-Plus normalization offsets
pub trait MpCalibration {
    /// Current offsets
    fn mp_normalization(&self) -> MpNormalization;

    /// Replace the offsets; applies to every later sample
    fn set_mp_normalization(&mut self, normalization: MpNormalization);
}

/// Integrator limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegratorLimits {
    pub divisor: i32,
    pub max_position: i32,
    pub columns: i32,
    pub rows: i32,
}

impl Default for IntegratorLimits {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            max_position: DEFAULT_MAX_POSITION,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
        }
    }
}

/// Result of integrating one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPlusReading {
    /// X accumulator after clamping
    pub pos_x: i32,
    /// Y accumulator after clamping
    pub pos_y: i32,
    /// Display column (0..=columns)
    pub column: i32,
    /// Display row (0..=rows)
    pub row: i32,
    /// True if this sample rebased the normalization offsets
    pub recalibrated: bool,
}

/// Gyroscope accumulator
#[derive(Debug, Clone)]
pub struct MotionPlusIntegrator {
    limits: IntegratorLimits,
    pos_x: i32,
    pos_y: i32,
    refresh_requested: bool,
}

impl Default for MotionPlusIntegrator {
    fn default() -> Self {
        Self::new(IntegratorLimits::default())
    }
}

impl MotionPlusIntegrator {
    /// Creates an integrator with both accumulators at zero.
    ///
    /// Non-positive limits fall back to the defaults.
    #[must_use]
    pub fn new(limits: IntegratorLimits) -> Self {
        let defaults = IntegratorLimits::default();
        let positive_or = |value: i32, fallback: i32| if value > 0 { value } else { fallback };
        Self {
            limits: IntegratorLimits {
                divisor: positive_or(limits.divisor, defaults.divisor),
                max_position: positive_or(limits.max_position, defaults.max_position),
                columns: positive_or(limits.columns, defaults.columns),
                rows: positive_or(limits.rows, defaults.rows),
            },
            pos_x: 0,
            pos_y: 0,
            refresh_requested: false,
        }
    }

    /// Request one recalibration on the next sample
    pub fn request_recalibration(&mut self) {
        self.refresh_requested = true;
    }

    /// True while a recalibration is pending
    #[must_use]
    pub fn recalibration_pending(&self) -> bool {
        self.refresh_requested
    }

    /// Current (X, Y) accumulators
    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.pos_x, self.pos_y)
    }

    /// Integrate one gyroscope sample
    pub fn integrate(
        &mut self,
        sample: AxisTriple,
        calibration: &mut dyn MpCalibration,
    ) -> MotionPlusReading {
        let recalibrated = self.refresh_requested;
        if recalibrated {
            let current = calibration.mp_normalization();
            calibration.set_mp_normalization(MpNormalization {
                x: current.x.saturating_add(sample.x),
                y: current.y.saturating_add(sample.y),
                z: current.z.saturating_add(sample.z),
                factor: current.factor,
            });
            self.refresh_requested = false;
        }

        let max = self.limits.max_position;
        self.pos_x = self.pos_x.saturating_add(sample.x / self.limits.divisor).clamp(0, max);
        self.pos_y = self.pos_y.saturating_add(sample.z / self.limits.divisor).clamp(0, max);

        MotionPlusReading {
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            column: self.cell(self.pos_x, self.limits.columns),
            row: self.cell(self.pos_y, self.limits.rows),
            recalibrated,
        }
    }

    fn cell(&self, position: i32, cells: i32) -> i32 {
        let scaled = i64::from(position) * i64::from(cells) / i64::from(self.limits.max_position);
        scaled.clamp(0, i64::from(cells)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeCalibration {
        normalization: MpNormalization,
        writes: usize,
    }

    impl MpCalibration for FakeCalibration {
        fn mp_normalization(&self) -> MpNormalization {
            self.normalization
        }

        fn set_mp_normalization(&mut self, normalization: MpNormalization) {
            self.normalization = normalization;
            self.writes += 1;
        }
    }

    #[test]
    fn test_accumulates_x_and_z() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        let reading = integrator.integrate(AxisTriple::new(250, 9999, 420), &mut cal);

        // 250 / 100 = 2, 420 / 100 = 4; y is unused
        assert_eq!((reading.pos_x, reading.pos_y), (2, 4));
    }

    #[test]
    fn test_integer_division_truncates_toward_zero() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        integrator.integrate(AxisTriple::new(1000, 0, 1000), &mut cal);
        let reading = integrator.integrate(AxisTriple::new(-199, 0, -99), &mut cal);

        assert_eq!((reading.pos_x, reading.pos_y), (9, 10));
    }

    #[test]
    fn test_clamps_at_lower_bound() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        let reading = integrator.integrate(AxisTriple::new(-50_000, 0, -50_000), &mut cal);
        assert_eq!((reading.pos_x, reading.pos_y), (0, 0));
    }

    #[test]
    fn test_saturating_sequence_stays_pinned() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        for _ in 0..1000 {
            let reading = integrator.integrate(AxisTriple::new(i32::MAX, 0, i32::MAX), &mut cal);
            assert_eq!((reading.pos_x, reading.pos_y), (DEFAULT_MAX_POSITION, DEFAULT_MAX_POSITION));
        }
        for _ in 0..1000 {
            let reading = integrator.integrate(AxisTriple::new(i32::MIN, 0, i32::MIN), &mut cal);
            assert_eq!((reading.pos_x, reading.pos_y), (0, 0));
        }
    }

    #[test]
    fn test_accumulators_never_leave_bounds() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        let mut value: i64 = 12_345;
        for _ in 0..5000 {
            // Cheap pseudo-random walk over the full i32 range
            value = (value * 1_103_515_245 + 12_345) % (1 << 31);
            let x = (value - (1 << 30)) as i32;
            let reading = integrator.integrate(AxisTriple::new(x, 0, x.wrapping_mul(3)), &mut cal);
            assert!((0..=DEFAULT_MAX_POSITION).contains(&reading.pos_x));
            assert!((0..=DEFAULT_MAX_POSITION).contains(&reading.pos_y));
        }
    }

    #[test]
    fn test_display_cells() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        let full = integrator.integrate(AxisTriple::new(i32::MAX, 0, i32::MAX), &mut cal);
        assert_eq!((full.column, full.row), (DEFAULT_COLUMNS, DEFAULT_ROWS));

        let mut integrator = MotionPlusIntegrator::default();
        // 500000 / 100 = 5000 -> 5000 * 22 / 10000 = 11, 5000 * 7 / 10000 = 3
        let half = integrator.integrate(AxisTriple::new(500_000, 0, 500_000), &mut cal);
        assert_eq!((half.column, half.row), (11, 3));
    }

    #[test]
    fn test_recalibration_rebases_offsets_once() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration {
            normalization: MpNormalization { x: 10, y: 20, z: 30, factor: 50 },
            writes: 0,
        };

        integrator.request_recalibration();
        let reading = integrator.integrate(AxisTriple::new(1, 2, 3), &mut cal);

        assert!(reading.recalibrated);
        assert_eq!(cal.normalization, MpNormalization { x: 11, y: 22, z: 33, factor: 50 });
        assert!(!integrator.recalibration_pending());
    }

    #[test]
    fn test_recalibration_is_edge_triggered() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        integrator.request_recalibration();
        integrator.integrate(AxisTriple::new(5, 5, 5), &mut cal);
        let after_trigger = cal.normalization;

        let reading = integrator.integrate(AxisTriple::new(700, 800, 900), &mut cal);

        assert!(!reading.recalibrated);
        assert_eq!(cal.normalization, after_trigger);
        assert_eq!(cal.writes, 1);
    }

    #[test]
    fn test_no_recalibration_without_request() {
        let mut integrator = MotionPlusIntegrator::default();
        let mut cal = FakeCalibration::default();

        integrator.integrate(AxisTriple::new(5, 5, 5), &mut cal);
        assert_eq!(cal.writes, 0);
    }

    #[test]
    fn test_invalid_limits_fall_back_to_defaults() {
        let integrator = MotionPlusIntegrator::new(IntegratorLimits {
            divisor: 0,
            max_position: -1,
            columns: 0,
            rows: 0,
        });
        assert_eq!(integrator.limits, IntegratorLimits::default());
    }
}
