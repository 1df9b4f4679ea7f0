//! # Controller Input Mapper Module
//!
//! Translates raw evdev events from the hid-wiimote interfaces into
//! [`ControllerEvent`]s.
//!
//! The kernel driver exposes every part of a remote as its own evdev device.
//! Each device reports only changed axes, followed by `SYN_REPORT`. The
//! mapper keeps the last value of every axis and emits one [`AxisSample`]
//! per report, so one accelerometer report becomes one event.
//!
//! ## Axis Layout (triple index, component)
//!
//! | Interface | evdev Code | Slot |
//! |-----------|------------|------|
//! | Accelerometer | ABS_RX / ABS_RY / ABS_RZ | 0.x / 0.y / 0.z |
//! | Motion Plus | ABS_RX / ABS_RY / ABS_RZ | 0.x / 0.y / 0.z |
//! | IR | ABS_HATnX / ABS_HATnY | n.x / n.y |
//! | Nunchuk | ABS_HAT0X / ABS_HAT0Y | 0.x / 0.y (stick) |
//! | Nunchuk | ABS_RX / ABS_RY / ABS_RZ | 1.x / 1.y / 1.z (accel) |
//! | Classic | ABS_HAT1X/Y, ABS_HAT2X/Y, ABS_HAT3X/Y | 0, 1, 2 (left, right, triggers) |
//! | Balance Board | ABS_HAT0X, ABS_HAT0Y, ABS_HAT1X, ABS_HAT1Y | 0.x, 1.x, 2.x, 3.x |
//! | Pro Controller | ABS_X/Y, ABS_RX/RY | 0, 1 |
//! | Guitar | ABS_X/Y, ABS_HAT1X, ABS_HAT0X | 0 (stick), 1.x (whammy), 2.x (fret bar) |
//! | Drums | ABS_X/Y, ABS_HAT0X..ABS_HAT2Y | 0 (stick), 1..3 (pads) |
//!
//! ## Button Codes (EV_KEY)
//!
//! | Interface | evdev Code | Control |
//! |-----------|------------|---------|
//! | Core | KEY_LEFT/RIGHT/UP/DOWN | Left/Right/Up/Down |
//! | Core | BTN_A (BTN_SOUTH), BTN_B (BTN_EAST) | A, B |
//! | Core | KEY_NEXT, KEY_PREVIOUS, BTN_MODE | Plus, Minus, Home |
//! | Core | BTN_1, BTN_2 | One, Two |
//! | Nunchuk | BTN_C, BTN_Z | C, Z |
//! | Pro | BTN_EAST, BTN_SOUTH, BTN_NORTH, BTN_WEST | A, B, X, Y |
//! | Guitar | BTN_1..BTN_5 | frets (far up .. far low) |
//! | Guitar | BTN_DPAD_UP/DOWN | strum bar |
//!
//! ## Usage
//!
//! ```
//! use evdev::{EventType, InputEvent};
//! use wiimote_pointer::controller::mapper::{EventMapper, Interface};
//! use wiimote_pointer::controller::event::ControllerEvent;
//!
//! let mut mapper = EventMapper::new(Interface::Accel);
//! assert!(mapper.process_event(&InputEvent::new(EventType::ABSOLUTE, 3, 50)).is_none()); // ABS_RX
//! let event = mapper.process_event(&InputEvent::new(EventType::SYNCHRONIZATION, 0, 0));
//! assert!(matches!(event, Some(ControllerEvent::Accel(_))));
//! ```

use evdev::{AbsoluteAxisType, InputEvent, InputEventKind, Key, Synchronization};

use super::event::{
    AxisSample, AxisTriple, Control, ControllerEvent, ExtensionInput, ExtensionKind, KeyEvent,
    MAX_AXIS_TRIPLES,
};

/// Kernel name of the core remote interface
pub const CORE_DEVICE_NAME: &str = "Nintendo Wii Remote";

/// One evdev interface of a remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    Core,
    Accel,
    Ir,
    MotionPlus,
    Extension(ExtensionKind),
}

impl Interface {
    /// Identify an interface from its evdev device name
    ///
    /// # Examples
    ///
    /// ```
    /// use wiimote_pointer::controller::mapper::Interface;
    ///
    /// assert_eq!(Interface::from_device_name("Nintendo Wii Remote"), Some(Interface::Core));
    /// assert_eq!(Interface::from_device_name("Nintendo Wii Remote Accelerometer"), Some(Interface::Accel));
    /// assert_eq!(Interface::from_device_name("Some Mouse"), None);
    /// ```
    #[must_use]
    pub fn from_device_name(name: &str) -> Option<Self> {
        let suffix = name.strip_prefix(CORE_DEVICE_NAME)?.trim();
        let interface = match suffix {
            "" => Self::Core,
            "Accelerometer" => Self::Accel,
            "IR" => Self::Ir,
            "Motion Plus" => Self::MotionPlus,
            "Nunchuk" => Self::Extension(ExtensionKind::Nunchuk),
            "Classic Controller" => Self::Extension(ExtensionKind::Classic),
            "Balance Board" => Self::Extension(ExtensionKind::BalanceBoard),
            "Pro Controller" => Self::Extension(ExtensionKind::Pro),
            "Guitar" => Self::Extension(ExtensionKind::Guitar),
            "Drums" => Self::Extension(ExtensionKind::Drums),
            _ => return None,
        };
        Some(interface)
    }

    /// Number of axis triples this interface reports
    #[must_use]
    pub fn triple_count(&self) -> usize {
        match self {
            Self::Core => 0,
            Self::Accel | Self::MotionPlus => 1,
            Self::Ir => 4,
            Self::Extension(kind) => match kind {
                ExtensionKind::Nunchuk | ExtensionKind::Pro => 2,
                ExtensionKind::Classic | ExtensionKind::Guitar => 3,
                ExtensionKind::BalanceBoard | ExtensionKind::Drums => 4,
            },
        }
    }
}

/// Component of an axis triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    X,
    Y,
    Z,
}

/// Parses raw evdev events of one interface into controller events.
///
/// # Thread Safety
///
/// `EventMapper` is not thread-safe. Use from a single task/thread only.
#[derive(Debug)]
pub struct EventMapper {
    interface: Interface,
    axes: [AxisTriple; MAX_AXIS_TRIPLES],
    pending: bool,
}

impl EventMapper {
    /// Creates a mapper with all axes at zero.
    #[must_use]
    pub fn new(interface: Interface) -> Self {
        Self {
            interface,
            axes: [AxisTriple::default(); MAX_AXIS_TRIPLES],
            pending: false,
        }
    }

    /// The interface this mapper translates.
    #[must_use]
    pub fn interface(&self) -> Interface {
        self.interface
    }

    /// Processes a single evdev input event.
    ///
    /// Returns a controller event for key presses/releases and at the end of
    /// every report that changed at least one axis. Unknown axes and other
    /// event types are ignored.
    pub fn process_event(&mut self, event: &InputEvent) -> Option<ControllerEvent> {
        match event.kind() {
            InputEventKind::AbsAxis(axis) => {
                self.process_axis_event(axis, event.value());
                None
            }
            InputEventKind::Key(key) => self.process_key_event(key, event.value() != 0),
            InputEventKind::Synchronization(Synchronization::SYN_REPORT) => self.finish_report(),
            _ => None,
        }
    }

    /// Resets all axes to zero and drops any partial report.
    pub fn reset(&mut self) {
        self.axes = [AxisTriple::default(); MAX_AXIS_TRIPLES];
        self.pending = false;
    }

    fn process_axis_event(&mut self, axis: AbsoluteAxisType, value: i32) {
        let Some((index, component)) = axis_slot(self.interface, axis) else {
            return;
        };

        let triple = &mut self.axes[index];
        match component {
            Component::X => triple.x = value,
            Component::Y => triple.y = value,
            Component::Z => triple.z = value,
        }
        self.pending = true;
    }

    fn process_key_event(&mut self, key: Key, pressed: bool) -> Option<ControllerEvent> {
        let event = KeyEvent::new(key_control(self.interface, key), pressed);
        match self.interface {
            Interface::Core => Some(ControllerEvent::Key(event)),
            Interface::Extension(kind) => Some(ControllerEvent::Extension {
                kind,
                input: ExtensionInput::Key(event),
            }),
            // Sensor-only interfaces carry no buttons
            Interface::Accel | Interface::Ir | Interface::MotionPlus => None,
        }
    }

    fn finish_report(&mut self) -> Option<ControllerEvent> {
        if !self.pending {
            return None;
        }
        self.pending = false;

        let sample = AxisSample::from_triples(&self.axes[..self.interface.triple_count()]);
        match self.interface {
            Interface::Accel => Some(ControllerEvent::Accel(sample)),
            Interface::Ir => Some(ControllerEvent::Ir(sample)),
            Interface::MotionPlus => Some(ControllerEvent::MotionPlus(sample)),
            Interface::Extension(kind) => Some(ControllerEvent::Extension {
                kind,
                input: ExtensionInput::Move(sample),
            }),
            Interface::Core => None,
        }
    }
}

/// Slot of an absolute axis for the given interface.
fn axis_slot(interface: Interface, axis: AbsoluteAxisType) -> Option<(usize, Component)> {
    use Component::{X, Y, Z};

    let slot = match interface {
        Interface::Core => return None,
        Interface::Accel | Interface::MotionPlus => match axis {
            AbsoluteAxisType::ABS_RX => (0, X),
            AbsoluteAxisType::ABS_RY => (0, Y),
            AbsoluteAxisType::ABS_RZ => (0, Z),
            _ => return None,
        },
        Interface::Ir => match axis {
            AbsoluteAxisType::ABS_HAT0X => (0, X),
            AbsoluteAxisType::ABS_HAT0Y => (0, Y),
            AbsoluteAxisType::ABS_HAT1X => (1, X),
            AbsoluteAxisType::ABS_HAT1Y => (1, Y),
            AbsoluteAxisType::ABS_HAT2X => (2, X),
            AbsoluteAxisType::ABS_HAT2Y => (2, Y),
            AbsoluteAxisType::ABS_HAT3X => (3, X),
            AbsoluteAxisType::ABS_HAT3Y => (3, Y),
            _ => return None,
        },
        Interface::Extension(ExtensionKind::Nunchuk) => match axis {
            AbsoluteAxisType::ABS_HAT0X => (0, X),
            AbsoluteAxisType::ABS_HAT0Y => (0, Y),
            AbsoluteAxisType::ABS_RX => (1, X),
            AbsoluteAxisType::ABS_RY => (1, Y),
            AbsoluteAxisType::ABS_RZ => (1, Z),
            _ => return None,
        },
        Interface::Extension(ExtensionKind::Classic) => match axis {
            AbsoluteAxisType::ABS_HAT1X => (0, X),
            AbsoluteAxisType::ABS_HAT1Y => (0, Y),
            AbsoluteAxisType::ABS_HAT2X => (1, X),
            AbsoluteAxisType::ABS_HAT2Y => (1, Y),
            AbsoluteAxisType::ABS_HAT3X => (2, X),
            AbsoluteAxisType::ABS_HAT3Y => (2, Y),
            _ => return None,
        },
        Interface::Extension(ExtensionKind::BalanceBoard) => match axis {
            AbsoluteAxisType::ABS_HAT0X => (0, X),
            AbsoluteAxisType::ABS_HAT0Y => (1, X),
            AbsoluteAxisType::ABS_HAT1X => (2, X),
            AbsoluteAxisType::ABS_HAT1Y => (3, X),
            _ => return None,
        },
        Interface::Extension(ExtensionKind::Pro) => match axis {
            AbsoluteAxisType::ABS_X => (0, X),
            AbsoluteAxisType::ABS_Y => (0, Y),
            AbsoluteAxisType::ABS_RX => (1, X),
            AbsoluteAxisType::ABS_RY => (1, Y),
            _ => return None,
        },
        Interface::Extension(ExtensionKind::Guitar) => match axis {
            AbsoluteAxisType::ABS_X => (0, X),
            AbsoluteAxisType::ABS_Y => (0, Y),
            AbsoluteAxisType::ABS_HAT1X => (1, X),
            AbsoluteAxisType::ABS_HAT0X => (2, X),
            _ => return None,
        },
        Interface::Extension(ExtensionKind::Drums) => match axis {
            AbsoluteAxisType::ABS_X => (0, X),
            AbsoluteAxisType::ABS_Y => (0, Y),
            AbsoluteAxisType::ABS_HAT0X => (1, X),
            AbsoluteAxisType::ABS_HAT0Y => (1, Y),
            AbsoluteAxisType::ABS_HAT1X => (2, X),
            AbsoluteAxisType::ABS_HAT1Y => (2, Y),
            AbsoluteAxisType::ABS_HAT2X => (3, X),
            AbsoluteAxisType::ABS_HAT2Y => (3, Y),
            _ => return None,
        },
    };
    Some(slot)
}

/// Logical control for a key code on the given interface.
fn key_control(interface: Interface, key: Key) -> Control {
    match interface {
        Interface::Core => match key {
            Key::KEY_LEFT => Control::Left,
            Key::KEY_RIGHT => Control::Right,
            Key::KEY_UP => Control::Up,
            Key::KEY_DOWN => Control::Down,
            Key::BTN_SOUTH => Control::A,
            Key::BTN_EAST => Control::B,
            Key::KEY_NEXT => Control::Plus,
            Key::KEY_PREVIOUS => Control::Minus,
            Key::BTN_MODE => Control::Home,
            Key::BTN_1 => Control::One,
            Key::BTN_2 => Control::Two,
            _ => Control::Other(key.code()),
        },
        Interface::Extension(ExtensionKind::Nunchuk) => match key {
            Key::BTN_C => Control::C,
            Key::BTN_Z => Control::Z,
            _ => Control::Other(key.code()),
        },
        Interface::Extension(ExtensionKind::Classic) => match key {
            Key::BTN_SOUTH => Control::A,
            Key::BTN_EAST => Control::B,
            Key::BTN_NORTH => Control::X,
            Key::BTN_WEST => Control::Y,
            Key::BTN_TL => Control::TL,
            Key::BTN_TR => Control::TR,
            Key::BTN_TL2 => Control::ZL,
            Key::BTN_TR2 => Control::ZR,
            Key::KEY_NEXT => Control::Plus,
            Key::KEY_PREVIOUS => Control::Minus,
            Key::BTN_MODE => Control::Home,
            Key::KEY_LEFT => Control::Left,
            Key::KEY_RIGHT => Control::Right,
            Key::KEY_UP => Control::Up,
            Key::KEY_DOWN => Control::Down,
            _ => Control::Other(key.code()),
        },
        Interface::Extension(ExtensionKind::Pro) => match key {
            Key::BTN_EAST => Control::A,
            Key::BTN_SOUTH => Control::B,
            Key::BTN_NORTH => Control::X,
            Key::BTN_WEST => Control::Y,
            Key::BTN_TL => Control::TL,
            Key::BTN_TR => Control::TR,
            Key::BTN_TL2 => Control::ZL,
            Key::BTN_TR2 => Control::ZR,
            Key::BTN_SELECT => Control::Minus,
            Key::BTN_START => Control::Plus,
            Key::BTN_MODE => Control::Home,
            Key::BTN_THUMBL => Control::ThumbL,
            Key::BTN_THUMBR => Control::ThumbR,
            Key::BTN_DPAD_LEFT => Control::Left,
            Key::BTN_DPAD_RIGHT => Control::Right,
            Key::BTN_DPAD_UP => Control::Up,
            Key::BTN_DPAD_DOWN => Control::Down,
            _ => Control::Other(key.code()),
        },
        Interface::Extension(ExtensionKind::Guitar) => match key {
            Key::BTN_1 => Control::FretFarUp,
            Key::BTN_2 => Control::FretUp,
            Key::BTN_3 => Control::FretMid,
            Key::BTN_4 => Control::FretLow,
            Key::BTN_5 => Control::FretFarLow,
            Key::BTN_DPAD_UP => Control::StrumBarUp,
            Key::BTN_DPAD_DOWN => Control::StrumBarDown,
            Key::BTN_START => Control::Plus,
            Key::BTN_MODE => Control::Home,
            _ => Control::Other(key.code()),
        },
        Interface::Extension(ExtensionKind::Drums) => match key {
            Key::BTN_START => Control::Plus,
            Key::BTN_SELECT => Control::Minus,
            _ => Control::Other(key.code()),
        },
        Interface::Extension(ExtensionKind::BalanceBoard)
        | Interface::Accel
        | Interface::Ir
        | Interface::MotionPlus => Control::Other(key.code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;

    /// Helper to create an axis event for testing.
    fn make_axis_event(axis: AbsoluteAxisType, value: i32) -> InputEvent {
        InputEvent::new(EventType::ABSOLUTE, axis.0, value)
    }

    /// Helper to create a key event for testing.
    fn make_key_event(key: Key, pressed: bool) -> InputEvent {
        InputEvent::new(EventType::KEY, key.code(), if pressed { 1 } else { 0 })
    }

    fn make_syn_event() -> InputEvent {
        InputEvent::new(EventType::SYNCHRONIZATION, Synchronization::SYN_REPORT.0, 0)
    }

    // ==================== Interface Tests ====================

    #[test]
    fn test_interface_names() {
        let cases = [
            ("Nintendo Wii Remote", Interface::Core),
            ("Nintendo Wii Remote Accelerometer", Interface::Accel),
            ("Nintendo Wii Remote IR", Interface::Ir),
            ("Nintendo Wii Remote Motion Plus", Interface::MotionPlus),
            ("Nintendo Wii Remote Nunchuk", Interface::Extension(ExtensionKind::Nunchuk)),
            ("Nintendo Wii Remote Classic Controller", Interface::Extension(ExtensionKind::Classic)),
            ("Nintendo Wii Remote Balance Board", Interface::Extension(ExtensionKind::BalanceBoard)),
            ("Nintendo Wii Remote Pro Controller", Interface::Extension(ExtensionKind::Pro)),
            ("Nintendo Wii Remote Guitar", Interface::Extension(ExtensionKind::Guitar)),
            ("Nintendo Wii Remote Drums", Interface::Extension(ExtensionKind::Drums)),
        ];
        for (name, expected) in cases {
            assert_eq!(Interface::from_device_name(name), Some(expected), "{}", name);
        }
    }

    #[test]
    fn test_unknown_interface_names() {
        assert_eq!(Interface::from_device_name("Nintendo Wii Remote Turntable"), None);
        assert_eq!(Interface::from_device_name("Logitech USB Mouse"), None);
    }

    // ==================== Axis Report Tests ====================

    #[test]
    fn test_accel_report_emits_one_sample() {
        let mut mapper = EventMapper::new(Interface::Accel);

        assert!(mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RX, 50)).is_none());
        assert!(mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RY, -30)).is_none());
        assert!(mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RZ, 100)).is_none());

        let event = mapper.process_event(&make_syn_event());
        assert_eq!(event, Some(ControllerEvent::Accel(AxisSample::single(50, -30, 100))));
    }

    #[test]
    fn test_report_keeps_unchanged_axes() {
        let mut mapper = EventMapper::new(Interface::Accel);
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RX, 10));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RY, 20));
        mapper.process_event(&make_syn_event());

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RX, 11));
        let event = mapper.process_event(&make_syn_event());

        assert_eq!(event, Some(ControllerEvent::Accel(AxisSample::single(11, 20, 0))));
    }

    #[test]
    fn test_empty_report_emits_nothing() {
        let mut mapper = EventMapper::new(Interface::Accel);
        assert!(mapper.process_event(&make_syn_event()).is_none());
    }

    #[test]
    fn test_motion_plus_report() {
        let mut mapper = EventMapper::new(Interface::MotionPlus);
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RX, -400));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RZ, 250));

        let event = mapper.process_event(&make_syn_event());
        assert_eq!(event, Some(ControllerEvent::MotionPlus(AxisSample::single(-400, 0, 250))));
    }

    #[test]
    fn test_nunchuk_stick_and_accel_slots() {
        let mut mapper = EventMapper::new(Interface::Extension(ExtensionKind::Nunchuk));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, 12));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, -7));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RZ, 300));

        match mapper.process_event(&make_syn_event()) {
            Some(ControllerEvent::Extension {
                kind: ExtensionKind::Nunchuk,
                input: ExtensionInput::Move(sample),
            }) => {
                assert_eq!(sample.triples().len(), 2);
                assert_eq!(sample.get(0), AxisTriple::new(12, -7, 0));
                assert_eq!(sample.get(1), AxisTriple::new(0, 0, 300));
            }
            other => panic!("Expected nunchuk move, got: {:?}", other),
        }
    }

    #[test]
    fn test_balance_board_weights() {
        let mut mapper = EventMapper::new(Interface::Extension(ExtensionKind::BalanceBoard));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, 100));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, 200));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT1X, 300));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT1Y, 400));

        match mapper.process_event(&make_syn_event()) {
            Some(ControllerEvent::Extension { input: ExtensionInput::Move(sample), .. }) => {
                let weights: Vec<i32> = sample.triples().iter().map(|t| t.x).collect();
                assert_eq!(weights, vec![100, 200, 300, 400]);
            }
            other => panic!("Expected balance board move, got: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_axis_ignored() {
        let mut mapper = EventMapper::new(Interface::Accel);
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 99));
        assert!(mapper.process_event(&make_syn_event()).is_none());
    }

    #[test]
    fn test_reset_drops_partial_report() {
        let mut mapper = EventMapper::new(Interface::Accel);
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RX, 5));
        mapper.reset();
        assert!(mapper.process_event(&make_syn_event()).is_none());
    }

    // ==================== Key Tests ====================

    #[test]
    fn test_core_keys() {
        let mut mapper = EventMapper::new(Interface::Core);
        let cases = [
            (Key::KEY_UP, Control::Up),
            (Key::KEY_DOWN, Control::Down),
            (Key::BTN_SOUTH, Control::A),
            (Key::BTN_EAST, Control::B),
            (Key::KEY_NEXT, Control::Plus),
            (Key::KEY_PREVIOUS, Control::Minus),
            (Key::BTN_MODE, Control::Home),
            (Key::BTN_1, Control::One),
            (Key::BTN_2, Control::Two),
        ];
        for (key, control) in cases {
            let event = mapper.process_event(&make_key_event(key, true));
            assert_eq!(event, Some(ControllerEvent::Key(KeyEvent::new(control, true))));
        }
    }

    #[test]
    fn test_key_release() {
        let mut mapper = EventMapper::new(Interface::Core);
        let event = mapper.process_event(&make_key_event(Key::BTN_SOUTH, false));
        assert_eq!(event, Some(ControllerEvent::Key(KeyEvent::new(Control::A, false))));
    }

    #[test]
    fn test_unmapped_core_key_is_other() {
        let mut mapper = EventMapper::new(Interface::Core);
        let event = mapper.process_event(&make_key_event(Key::KEY_F1, true));
        assert_eq!(
            event,
            Some(ControllerEvent::Key(KeyEvent::new(Control::Other(Key::KEY_F1.code()), true)))
        );
    }

    #[test]
    fn test_pro_controller_face_buttons_differ_from_core() {
        let mut mapper = EventMapper::new(Interface::Extension(ExtensionKind::Pro));
        let event = mapper.process_event(&make_key_event(Key::BTN_EAST, true));
        assert_eq!(
            event,
            Some(ControllerEvent::Extension {
                kind: ExtensionKind::Pro,
                input: ExtensionInput::Key(KeyEvent::new(Control::A, true)),
            })
        );
    }

    #[test]
    fn test_guitar_frets_and_strum() {
        let mut mapper = EventMapper::new(Interface::Extension(ExtensionKind::Guitar));
        let fret = mapper.process_event(&make_key_event(Key::BTN_1, true));
        let strum = mapper.process_event(&make_key_event(Key::BTN_DPAD_DOWN, true));

        assert!(matches!(
            fret,
            Some(ControllerEvent::Extension { input: ExtensionInput::Key(KeyEvent { control: Control::FretFarUp, .. }), .. })
        ));
        assert!(matches!(
            strum,
            Some(ControllerEvent::Extension { input: ExtensionInput::Key(KeyEvent { control: Control::StrumBarDown, .. }), .. })
        ));
    }

    #[test]
    fn test_sensor_interfaces_ignore_keys() {
        let mut mapper = EventMapper::new(Interface::Accel);
        assert!(mapper.process_event(&make_key_event(Key::BTN_SOUTH, true)).is_none());
    }
}
