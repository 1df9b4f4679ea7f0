//! # Input Event Record Layout
//!
//! Constants and the fixed-size record written to a Linux input device node.
//!
//! The record mirrors the kernel `struct input_event` on 64-bit targets:
//!
//! ```text
//! offset  size  field
//! 0       8     tv_sec   (i64)
//! 8       8     tv_usec  (i64)
//! 16      2     type     (u16)
//! 18      2     code     (u16)
//! 20      4     value    (i32)
//! ```
//!
//! All fields are native byte order, as the kernel reads them verbatim.

use chrono::{DateTime, Utc};
use evdev::{EventType, Key, RelativeAxisType, Synchronization};

/// Size of one encoded event record in bytes
pub const EVENT_RECORD_SIZE: usize = 24;

/// Synchronization event type
pub const EV_SYN: u16 = EventType::SYNCHRONIZATION.0;

/// Key/button event type
pub const EV_KEY: u16 = EventType::KEY.0;

/// Relative axis event type
pub const EV_REL: u16 = EventType::RELATIVE.0;

/// End-of-report synchronization code
pub const SYN_REPORT: u16 = Synchronization::SYN_REPORT.0;

pub const REL_X: u16 = RelativeAxisType::REL_X.0;
pub const REL_Y: u16 = RelativeAxisType::REL_Y.0;

/// Vertical wheel
pub const REL_WHEEL: u16 = RelativeAxisType::REL_WHEEL.0;

/// Left mouse button, the primary action
pub const BTN_LEFT: u16 = Key::BTN_LEFT.code();

/// Maximum records in one frame (X + Y + SYN)
pub const MAX_FRAME_RECORDS: usize = 3;

/// Timestamp carried by a record (seconds + microseconds since the epoch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RecordTime {
    pub sec: i64,
    pub usec: i64,
}

impl RecordTime {
    /// Samples the wall clock
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Converts a chrono timestamp into record time
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            sec: at.timestamp(),
            usec: i64::from(at.timestamp_subsec_micros()),
        }
    }
}

/// One wire-level input event record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub time: RecordTime,
    pub type_code: u16,
    pub control_code: u16,
    pub value: i32,
}

impl EventRecord {
    /// Creates a record with the given fields
    #[must_use]
    pub fn new(time: RecordTime, type_code: u16, control_code: u16, value: i32) -> Self {
        Self {
            time,
            type_code,
            control_code,
            value,
        }
    }

    /// Creates the end-of-report synchronization record
    #[must_use]
    pub fn syn_report(time: RecordTime) -> Self {
        Self::new(time, EV_SYN, SYN_REPORT, 0)
    }

    /// Returns true for the end-of-report synchronization record
    #[must_use]
    pub fn is_syn_report(&self) -> bool {
        self.type_code == EV_SYN && self.control_code == SYN_REPORT && self.value == 0
    }
}

/// Pointer action to be emitted as one input frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Relative pointer motion
    RelativeMove { dx: i32, dy: i32 },
    /// Vertical wheel notches (positive = up)
    Wheel { delta: i32 },
    /// Button press or release
    Button { id: u16, pressed: bool },
}
