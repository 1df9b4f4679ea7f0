//! # Event Router
//!
//! Classifies one controller event under the current [`Mode`] and decides
//! what it drives: a pointer action, a diagnostic record, both, or nothing.
//!
//! ## Routing Table
//!
//! | Event | Pointer action | Diagnostic (Extended only) |
//! |-------|----------------|----------------------------|
//! | Key `Up` | wheel +1 (Normal/NFS) | key state |
//! | Key `Down` | wheel -1 (Normal/NFS) | key state |
//! | Key `A` | left button press/release (Normal/NFS) | key state |
//! | Other keys | none | key state |
//! | Accelerometer | relative move (every mode) | power-curve values |
//! | IR | none | source positions |
//! | Motion Plus | none | integrated display cell |
//! | Extension | none | shaped axes / keys |
//!
//! Extensions never drive the pointer. Outside Extended mode their samples
//! and Motion-Plus samples are dropped without touching any state.

use std::fmt;

use crate::controller::calibration::{AccelCurve, MotionShaper};
use crate::controller::event::{
    AxisSample, Control, ControllerEvent, ExtensionInput, ExtensionKind, KeyEvent,
};
use crate::controller::motion_plus::{
    IntegratorLimits, MotionPlusIntegrator, MotionPlusReading, MpCalibration,
};
use crate::uinput::protocol::{PointerAction, BTN_LEFT};

use super::mode::Mode;

/// Diagnostic record for the display path
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Core remote button state
    Key(KeyEvent),
    /// Power-curve shaped accelerometer triple
    Accel { x: f64, y: f64, z: f64 },
    /// IR source positions
    Ir(AxisSample),
    /// Integrated Motion-Plus position
    MotionPlus(MotionPlusReading),
    /// Extension button state
    ExtensionKey { kind: ExtensionKind, event: KeyEvent },
    /// Extension axes, with the shaped accelerometer triple for a nunchuk
    ExtensionMove {
        kind: ExtensionKind,
        sample: AxisSample,
        accel: Option<(f64, f64, f64)>,
    },
    /// Balance board sensor weights and their sum
    BalanceBoard { weights: [i32; 4], total: i64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(event) => write!(
                f,
                "key {:?} {}",
                event.control,
                if event.pressed { "pressed" } else { "released" }
            ),
            Self::Accel { x, y, z } => write!(f, "accel x={:+.2} y={:+.2} z={:+.2}", x, y, z),
            Self::Ir(sample) => {
                write!(f, "ir")?;
                for (i, source) in sample.triples().iter().enumerate() {
                    write!(f, " {}=({},{})", i, source.x, source.y)?;
                }
                Ok(())
            }
            Self::MotionPlus(reading) => write!(
                f,
                "motion plus pos=({},{}) cell=({},{}){}",
                reading.pos_x,
                reading.pos_y,
                reading.column,
                reading.row,
                if reading.recalibrated { " recalibrated" } else { "" }
            ),
            Self::ExtensionKey { kind, event } => write!(
                f,
                "{:?} key {:?} {}",
                kind,
                event.control,
                if event.pressed { "pressed" } else { "released" }
            ),
            Self::ExtensionMove { kind, sample, accel } => {
                write!(f, "{:?}", kind)?;
                for (i, t) in sample.triples().iter().enumerate() {
                    write!(f, " {}=({},{},{})", i, t.x, t.y, t.z)?;
                }
                if let Some((x, y, z)) = accel {
                    write!(f, " accel=({:+.2},{:+.2},{:+.2})", x, y, z)?;
                }
                Ok(())
            }
            Self::BalanceBoard { weights, total } => write!(
                f,
                "balance board weights={:?} total={}",
                weights, total
            ),
        }
    }
}

/// Outcome of routing one event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Routed {
    pub action: Option<PointerAction>,
    pub diagnostic: Option<Diagnostic>,
}

impl Routed {
    fn action(action: PointerAction) -> Self {
        Self { action: Some(action), diagnostic: None }
    }

    fn diagnostic(diagnostic: Diagnostic) -> Self {
        Self { action: None, diagnostic: Some(diagnostic) }
    }

    /// True if the event had no effect
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.diagnostic.is_none()
    }
}

/// Event classifier holding the per-session shaping state
///
/// # Examples
///
/// ```
/// use wiimote_pointer::bridge::mode::Mode;
/// use wiimote_pointer::bridge::router::Router;
/// use wiimote_pointer::controller::event::{AxisSample, ControllerEvent};
/// use wiimote_pointer::controller::motion_plus::{MpCalibration, MpNormalization};
/// use wiimote_pointer::uinput::protocol::PointerAction;
///
/// struct NoCalibration;
/// impl MpCalibration for NoCalibration {
///     fn mp_normalization(&self) -> MpNormalization { MpNormalization::default() }
///     fn set_mp_normalization(&mut self, _: MpNormalization) {}
/// }
///
/// let mut router = Router::new(Mode::Normal);
/// let routed = router.route(&ControllerEvent::Accel(AxisSample::single(50, -30, 0)), &mut NoCalibration);
/// assert_eq!(routed.action, Some(PointerAction::RelativeMove { dx: 50, dy: -30 }));
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    mode: Mode,
    shaper: MotionShaper,
    accel_curve: AccelCurve,
    integrator: MotionPlusIntegrator,
}

impl Router {
    /// Router with default shaping
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self::with_shaping(mode, MotionShaper::default(), AccelCurve::default(), IntegratorLimits::default())
    }

    /// Router with explicit shaping parameters
    #[must_use]
    pub fn with_shaping(
        mode: Mode,
        shaper: MotionShaper,
        accel_curve: AccelCurve,
        limits: IntegratorLimits,
    ) -> Self {
        Self {
            mode,
            shaper,
            accel_curve,
            integrator: MotionPlusIntegrator::new(limits),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Rebase the Motion-Plus offsets on the next gyroscope sample
    pub fn request_recalibration(&mut self) {
        self.integrator.request_recalibration();
    }

    #[must_use]
    pub fn recalibration_pending(&self) -> bool {
        self.integrator.recalibration_pending()
    }

    /// Route one event to completion
    pub fn route(&mut self, event: &ControllerEvent, calibration: &mut dyn MpCalibration) -> Routed {
        match event {
            ControllerEvent::Key(key) => self.route_key(key),
            ControllerEvent::Accel(sample) => self.route_accel(sample),
            ControllerEvent::Ir(sample) if self.mode.shows_diagnostics() => {
                Routed::diagnostic(Diagnostic::Ir(*sample))
            }
            ControllerEvent::MotionPlus(sample) if self.mode.shows_diagnostics() => {
                let reading = self.integrator.integrate(sample.primary(), calibration);
                Routed::diagnostic(Diagnostic::MotionPlus(reading))
            }
            ControllerEvent::Extension { kind, input } if self.mode.shows_diagnostics() => {
                Routed::diagnostic(self.extension_diagnostic(*kind, input))
            }
            ControllerEvent::Ir(_) | ControllerEvent::MotionPlus(_) | ControllerEvent::Extension { .. } => {
                Routed::default()
            }
        }
    }

    fn route_key(&self, key: &KeyEvent) -> Routed {
        if !self.mode.emits_keys() {
            return Routed::diagnostic(Diagnostic::Key(*key));
        }

        // Scroll keys fire on press and on release alike
        match key.control {
            Control::Up => Routed::action(PointerAction::Wheel { delta: 1 }),
            Control::Down => Routed::action(PointerAction::Wheel { delta: -1 }),
            Control::A => Routed::action(PointerAction::Button { id: BTN_LEFT, pressed: key.pressed }),
            _ => Routed::default(),
        }
    }

    fn route_accel(&self, sample: &AxisSample) -> Routed {
        let raw = sample.primary();
        let (dx, dy) = self
            .shaper
            .to_pointer_delta(self.shaper.shape_relative_motion(raw.x, raw.y));

        let diagnostic = self.mode.shows_diagnostics().then(|| {
            let (x, y, z) = self.accel_curve.apply(raw.x, raw.y, raw.z);
            Diagnostic::Accel { x, y, z }
        });

        Routed {
            action: Some(PointerAction::RelativeMove { dx, dy }),
            diagnostic,
        }
    }

    fn extension_diagnostic(&self, kind: ExtensionKind, input: &ExtensionInput) -> Diagnostic {
        match input {
            ExtensionInput::Key(event) => Diagnostic::ExtensionKey { kind, event: *event },
            ExtensionInput::Move(sample) if kind == ExtensionKind::BalanceBoard => {
                let mut weights = [0; 4];
                for (weight, triple) in weights.iter_mut().zip(sample.triples()) {
                    *weight = triple.x;
                }
                let total = weights.iter().map(|w| i64::from(*w)).sum();
                Diagnostic::BalanceBoard { weights, total }
            }
            ExtensionInput::Move(sample) => {
                let accel = (kind == ExtensionKind::Nunchuk).then(|| {
                    let a = sample.get(1);
                    self.accel_curve.apply(a.x, a.y, a.z)
                });
                Diagnostic::ExtensionMove { kind, sample: *sample, accel }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::event::AxisTriple;
    use crate::controller::motion_plus::MpNormalization;

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

    const ALL_MODES: [Mode; 3] = [Mode::Normal, Mode::Extended, Mode::Nfs];

    fn key(control: Control, pressed: bool) -> ControllerEvent {
        ControllerEvent::Key(KeyEvent::new(control, pressed))
    }

    fn extension_events() -> Vec<ControllerEvent> {
        let kinds = [
            ExtensionKind::Nunchuk,
            ExtensionKind::Classic,
            ExtensionKind::BalanceBoard,
            ExtensionKind::Pro,
            ExtensionKind::Guitar,
            ExtensionKind::Drums,
        ];
        kinds
            .iter()
            .flat_map(|&kind| {
                [
                    ControllerEvent::Extension {
                        kind,
                        input: ExtensionInput::Move(AxisSample::from_triples(&[
                            AxisTriple::new(300, -200, 100),
                            AxisTriple::new(50, 60, 70),
                        ])),
                    },
                    ControllerEvent::Extension {
                        kind,
                        input: ExtensionInput::Key(KeyEvent::new(Control::A, true)),
                    },
                ]
            })
            .collect()
    }

    // ==================== Key Routing Tests ====================

    #[test]
    fn test_scroll_up_is_one_wheel_notch() {
        let mut router = Router::new(Mode::Normal);
        let routed = router.route(&key(Control::Up, true), &mut FakeCalibration::default());
        assert_eq!(routed.action, Some(PointerAction::Wheel { delta: 1 }));
        assert!(routed.diagnostic.is_none());
    }

    #[test]
    fn test_scroll_down_is_negative_wheel() {
        let mut router = Router::new(Mode::Nfs);
        let routed = router.route(&key(Control::Down, true), &mut FakeCalibration::default());
        assert_eq!(routed.action, Some(PointerAction::Wheel { delta: -1 }));
    }

    #[test]
    fn test_scroll_release_also_scrolls() {
        let mut router = Router::new(Mode::Normal);
        let routed = router.route(&key(Control::Up, false), &mut FakeCalibration::default());
        assert_eq!(routed.action, Some(PointerAction::Wheel { delta: 1 }));
    }

    #[test]
    fn test_primary_button_follows_pressed_state() {
        let mut router = Router::new(Mode::Normal);
        let mut cal = FakeCalibration::default();

        assert_eq!(
            router.route(&key(Control::A, true), &mut cal).action,
            Some(PointerAction::Button { id: BTN_LEFT, pressed: true })
        );
        assert_eq!(
            router.route(&key(Control::A, false), &mut cal).action,
            Some(PointerAction::Button { id: BTN_LEFT, pressed: false })
        );
    }

    #[test]
    fn test_unmapped_keys_are_absorbed() {
        let mut router = Router::new(Mode::Normal);
        let mut cal = FakeCalibration::default();
        for control in [Control::B, Control::Home, Control::Plus, Control::Left, Control::Other(0x2ff)] {
            assert!(router.route(&key(control, true), &mut cal).is_empty(), "{:?}", control);
        }
    }

    #[test]
    fn test_extended_mode_keys_are_display_only() {
        let mut router = Router::new(Mode::Extended);
        let routed = router.route(&key(Control::A, true), &mut FakeCalibration::default());
        assert!(routed.action.is_none());
        assert_eq!(routed.diagnostic, Some(Diagnostic::Key(KeyEvent::new(Control::A, true))));
    }

    // ==================== Accelerometer Routing Tests ====================

    #[test]
    fn test_accel_moves_pointer_in_every_mode() {
        for mode in ALL_MODES {
            let mut router = Router::new(mode);
            let routed = router.route(
                &ControllerEvent::Accel(AxisSample::single(50, -30, 0)),
                &mut FakeCalibration::default(),
            );
            assert_eq!(
                routed.action,
                Some(PointerAction::RelativeMove { dx: 50, dy: -30 }),
                "mode {}",
                mode
            );
        }
    }

    #[test]
    fn test_accel_diagnostic_only_in_extended() {
        let event = ControllerEvent::Accel(AxisSample::single(512, 512, -512));
        let mut cal = FakeCalibration::default();

        assert!(Router::new(Mode::Normal).route(&event, &mut cal).diagnostic.is_none());

        match Router::new(Mode::Extended).route(&event, &mut cal).diagnostic {
            Some(Diagnostic::Accel { x, y, z }) => {
                assert!((x - 10.0).abs() < 1e-9);
                assert!((y - 5.0).abs() < 1e-9);
                assert!((z + 5.0).abs() < 1e-9);
            }
            other => panic!("Expected accel diagnostic, got: {:?}", other),
        }
    }

    #[test]
    fn test_accel_uses_configured_shaper() {
        let mut router = Router::with_shaping(
            Mode::Normal,
            MotionShaper::new(0.1, 10.0, 20),
            AccelCurve::default(),
            IntegratorLimits::default(),
        );
        let routed = router.route(
            &ControllerEvent::Accel(AxisSample::single(15, 40, 0)),
            &mut FakeCalibration::default(),
        );
        assert_eq!(routed.action, Some(PointerAction::RelativeMove { dx: 0, dy: 40 }));
    }

    // ==================== Extension / Motion Plus Tests ====================

    #[test]
    fn test_extensions_never_emit() {
        for mode in ALL_MODES {
            let mut router = Router::new(mode);
            for event in extension_events() {
                let routed = router.route(&event, &mut FakeCalibration::default());
                assert!(routed.action.is_none(), "{:?} emitted in {}", event, mode);
            }
        }
    }

    #[test]
    fn test_extensions_dropped_outside_extended() {
        for mode in [Mode::Normal, Mode::Nfs] {
            let mut router = Router::new(mode);
            for event in extension_events() {
                assert!(router.route(&event, &mut FakeCalibration::default()).is_empty());
            }
        }
    }

    #[test]
    fn test_balance_board_total() {
        let mut router = Router::new(Mode::Extended);
        let event = ControllerEvent::Extension {
            kind: ExtensionKind::BalanceBoard,
            input: ExtensionInput::Move(AxisSample::from_triples(&[
                AxisTriple::new(1000, 0, 0),
                AxisTriple::new(2000, 0, 0),
                AxisTriple::new(3000, 0, 0),
                AxisTriple::new(4000, 0, 0),
            ])),
        };

        let routed = router.route(&event, &mut FakeCalibration::default());
        assert_eq!(
            routed.diagnostic,
            Some(Diagnostic::BalanceBoard { weights: [1000, 2000, 3000, 4000], total: 10_000 })
        );
    }

    #[test]
    fn test_nunchuk_accel_is_shaped() {
        let mut router = Router::new(Mode::Extended);
        let event = ControllerEvent::Extension {
            kind: ExtensionKind::Nunchuk,
            input: ExtensionInput::Move(AxisSample::from_triples(&[
                AxisTriple::new(10, -10, 0),
                AxisTriple::new(512, 0, 0),
            ])),
        };

        match router.route(&event, &mut FakeCalibration::default()).diagnostic {
            Some(Diagnostic::ExtensionMove { accel: Some((x, _, _)), .. }) => {
                assert!((x - 10.0).abs() < 1e-9);
            }
            other => panic!("Expected nunchuk diagnostic, got: {:?}", other),
        }
    }

    #[test]
    fn test_motion_plus_ignored_outside_extended() {
        let mut router = Router::new(Mode::Normal);
        let mut cal = FakeCalibration::default();
        router.request_recalibration();

        let routed = router.route(&ControllerEvent::MotionPlus(AxisSample::single(500, 0, 500)), &mut cal);

        assert!(routed.is_empty());
        assert_eq!(cal.writes, 0);
        assert!(router.recalibration_pending());
    }

    #[test]
    fn test_motion_plus_integrated_in_extended() {
        let mut router = Router::new(Mode::Extended);
        let mut cal = FakeCalibration::default();
        router.request_recalibration();

        let first = router.route(&ControllerEvent::MotionPlus(AxisSample::single(500, 0, 300)), &mut cal);
        let second = router.route(&ControllerEvent::MotionPlus(AxisSample::single(500, 0, 300)), &mut cal);

        match (first.diagnostic, second.diagnostic) {
            (Some(Diagnostic::MotionPlus(a)), Some(Diagnostic::MotionPlus(b))) => {
                assert!(a.recalibrated);
                assert!(!b.recalibrated);
                assert_eq!((b.pos_x, b.pos_y), (10, 6));
            }
            other => panic!("Expected motion plus diagnostics, got: {:?}", other),
        }
        assert_eq!(cal.writes, 1);
        assert!(first.action.is_none());
    }

    #[test]
    fn test_ir_display_only() {
        let event = ControllerEvent::Ir(AxisSample::from_triples(&[AxisTriple::new(100, 200, 0)]));
        let mut cal = FakeCalibration::default();

        assert!(Router::new(Mode::Normal).route(&event, &mut cal).is_empty());
        let routed = Router::new(Mode::Extended).route(&event, &mut cal);
        assert!(routed.action.is_none());
        assert!(matches!(routed.diagnostic, Some(Diagnostic::Ir(_))));
    }

    #[test]
    fn test_diagnostic_display() {
        let text = Diagnostic::BalanceBoard { weights: [1, 2, 3, 4], total: 10 }.to_string();
        assert_eq!(text, "balance board weights=[1, 2, 3, 4] total=10");

        let text = Diagnostic::Key(KeyEvent::new(Control::Home, false)).to_string();
        assert_eq!(text, "key Home released");
    }
}
