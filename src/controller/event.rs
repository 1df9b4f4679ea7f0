//! # Controller Event Types
//!
//! The polymorphic controller event stream as a sum type.
//!
//! Every event carries exactly the payload its kind defines, so a handler
//! can never read axis data off a key event or the other way round.
//!
//! | Kind | Payload |
//! |------|---------|
//! | `Key` | core remote button |
//! | `Accel` | accelerometer triple |
//! | `Ir` | up to four IR source positions |
//! | `MotionPlus` | gyroscope triple |
//! | `Extension` | key or axis input from a pluggable peripheral |

/// Maximum number of axis triples in one sample
pub const MAX_AXIS_TRIPLES: usize = 4;

/// One (x, y, z) axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisTriple {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AxisTriple {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Ordered sequence of up to four axis triples
///
/// # Examples
///
/// ```
/// use wiimote_pointer::controller::event::{AxisSample, AxisTriple};
///
/// let sample = AxisSample::from_triples(&[AxisTriple::new(50, -30, 0)]);
/// assert_eq!(sample.primary(), AxisTriple::new(50, -30, 0));
/// assert_eq!(sample.triples().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSample {
    triples: [AxisTriple; MAX_AXIS_TRIPLES],
    len: usize,
}

impl AxisSample {
    /// Build a sample from the given triples; extra triples beyond four are dropped
    #[must_use]
    pub fn from_triples(triples: &[AxisTriple]) -> Self {
        let len = triples.len().min(MAX_AXIS_TRIPLES);
        let mut sample = Self {
            triples: [AxisTriple::default(); MAX_AXIS_TRIPLES],
            len,
        };
        sample.triples[..len].copy_from_slice(&triples[..len]);
        sample
    }

    /// Single-triple sample
    #[must_use]
    pub fn single(x: i32, y: i32, z: i32) -> Self {
        Self::from_triples(&[AxisTriple::new(x, y, z)])
    }

    /// The triples carried by this sample
    #[must_use]
    pub fn triples(&self) -> &[AxisTriple] {
        &self.triples[..self.len]
    }

    /// Triple at `index`, or zero if the sample carries fewer
    #[must_use]
    pub fn get(&self, index: usize) -> AxisTriple {
        self.triples().get(index).copied().unwrap_or_default()
    }

    /// First triple (zero for an empty sample)
    #[must_use]
    pub fn primary(&self) -> AxisTriple {
        self.get(0)
    }
}

/// Logical control identifier
///
/// Covers the buttons of the remote and its extensions. Codes with no
/// defined meaning are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    A,
    B,
    X,
    Y,
    Home,
    Minus,
    Plus,
    One,
    Two,
    C,
    Z,
    TL,
    TR,
    ZL,
    ZR,
    ThumbL,
    ThumbR,
    FretFarUp,
    FretUp,
    FretMid,
    FretLow,
    FretFarLow,
    StrumBarUp,
    StrumBarDown,
    Other(u16),
}

/// Key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub control: Control,
    pub pressed: bool,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(control: Control, pressed: bool) -> Self {
        Self { control, pressed }
    }
}

/// Pluggable peripheral kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Nunchuk,
    Classic,
    BalanceBoard,
    Pro,
    Guitar,
    Drums,
}

/// Input reported by an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionInput {
    Key(KeyEvent),
    Move(AxisSample),
}

/// One controller event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Core remote button
    Key(KeyEvent),
    /// Primary accelerometer report
    Accel(AxisSample),
    /// IR camera report
    Ir(AxisSample),
    /// Motion-Plus gyroscope report
    MotionPlus(AxisSample),
    /// Extension peripheral input
    Extension {
        kind: ExtensionKind,
        input: ExtensionInput,
    },
}

/// Item pulled from the controller channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerItem {
    /// A controller event to route
    Event(ControllerEvent),
    /// The controller has disappeared
    Gone,
}

/// Notification pulled from the hot-plug channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotplugNotice {
    /// Interfaces of the watched controller changed (plugged or unplugged)
    Watch,
}
