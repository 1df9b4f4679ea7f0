//! # Input Frame Decoder
//!
//! Parses raw input event records back into [`EventRecord`]s and splits a
//! record stream into frames at each `SYN_REPORT`.
//!
//! Nothing on the emission path reads frames back. These functions exist to
//! verify what was written, from tests or from tooling that captures the
//! bytes sent to a device node.

use bytes::Buf;

use super::protocol::*;
use crate::error::{PointerBridgeError, Result};

/// Decode a buffer of consecutive event records
///
/// # Errors
///
/// Returns `Record` error if the buffer length is not a multiple of the record size.
pub fn decode_records(data: &[u8]) -> Result<Vec<EventRecord>> {
    if data.len() % EVENT_RECORD_SIZE != 0 {
        return Err(PointerBridgeError::Record(format!(
            "buffer length {} is not a multiple of {}",
            data.len(),
            EVENT_RECORD_SIZE
        )));
    }

    let mut buf = data;
    let mut records = Vec::with_capacity(data.len() / EVENT_RECORD_SIZE);
    while buf.has_remaining() {
        let sec = buf.get_i64_ne();
        let usec = buf.get_i64_ne();
        let type_code = buf.get_u16_ne();
        let control_code = buf.get_u16_ne();
        let value = buf.get_i32_ne();
        records.push(EventRecord::new(RecordTime { sec, usec }, type_code, control_code, value));
    }

    Ok(records)
}

/// Split a record stream into frames, each terminated by `SYN_REPORT`
///
/// # Errors
///
/// Returns `Record` error if trailing records are not terminated by a
/// synchronization record.
pub fn split_frames(records: &[EventRecord]) -> Result<Vec<Vec<EventRecord>>> {
    let mut frames = Vec::new();
    let mut current = Vec::new();

    for record in records {
        current.push(*record);
        if record.is_syn_report() {
            frames.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        return Err(PointerBridgeError::Record(format!(
            "{} record(s) without trailing SYN_REPORT",
            current.len()
        )));
    }

    Ok(frames)
}

/// Decode a frame back into the pointer action it carries
///
/// Returns `None` if the frame does not match any pointer action layout.
pub fn decode_action(frame: &[EventRecord]) -> Option<PointerAction> {
    match frame {
        [x, y, syn]
            if syn.is_syn_report()
                && (x.type_code, x.control_code) == (EV_REL, REL_X)
                && (y.type_code, y.control_code) == (EV_REL, REL_Y) =>
        {
            Some(PointerAction::RelativeMove { dx: x.value, dy: y.value })
        }
        [wheel, syn] if syn.is_syn_report() && (wheel.type_code, wheel.control_code) == (EV_REL, REL_WHEEL) => {
            Some(PointerAction::Wheel { delta: wheel.value })
        }
        [key, syn] if syn.is_syn_report() && key.type_code == EV_KEY => Some(PointerAction::Button {
            id: key.control_code,
            pressed: key.value != 0,
        }),
        _ => None,
    }
}
