//! # Input Frame Encoder
//!
//! Encodes pointer actions into input frames: one or two data records
//! followed by exactly one `SYN_REPORT` record.

use bytes::{BufMut, BytesMut};

use super::protocol::*;

/// Build the records for a pointer action
///
/// Every record of the frame carries the same timestamp.
///
/// # Examples
///
/// ```
/// use wiimote_pointer::uinput::encoder::frame_records;
/// use wiimote_pointer::uinput::protocol::{PointerAction, RecordTime};
///
/// let records = frame_records(&PointerAction::Wheel { delta: 1 }, RecordTime::default());
/// assert_eq!(records.len(), 2);
/// assert!(records[1].is_syn_report());
/// ```
pub fn frame_records(action: &PointerAction, time: RecordTime) -> Vec<EventRecord> {
    let mut records = Vec::with_capacity(MAX_FRAME_RECORDS);

    match *action {
        PointerAction::RelativeMove { dx, dy } => {
            // X and Y are separate records inside one frame
            records.push(EventRecord::new(time, EV_REL, REL_X, dx));
            records.push(EventRecord::new(time, EV_REL, REL_Y, dy));
        }
        PointerAction::Wheel { delta } => {
            records.push(EventRecord::new(time, EV_REL, REL_WHEEL, delta));
        }
        PointerAction::Button { id, pressed } => {
            records.push(EventRecord::new(time, EV_KEY, id, i32::from(pressed)));
        }
    }

    records.push(EventRecord::syn_report(time));
    records
}

/// Encode a single record (24 bytes)
pub fn encode_record(record: &EventRecord, buf: &mut BytesMut) {
    buf.put_i64_ne(record.time.sec);
    buf.put_i64_ne(record.time.usec);
    buf.put_u16_ne(record.type_code);
    buf.put_u16_ne(record.control_code);
    buf.put_i32_ne(record.value);
}

/// Encode a pointer action into one contiguous frame
///
/// # Returns
///
/// * `BytesMut` - 48 or 72 bytes (2 or 3 records)
///
/// # Examples
///
/// ```
/// use wiimote_pointer::uinput::encoder::encode_frame;
/// use wiimote_pointer::uinput::protocol::{PointerAction, RecordTime, EVENT_RECORD_SIZE};
///
/// let frame = encode_frame(&PointerAction::RelativeMove { dx: 5, dy: -3 }, RecordTime::now());
/// assert_eq!(frame.len(), 3 * EVENT_RECORD_SIZE);
/// ```
pub fn encode_frame(action: &PointerAction, time: RecordTime) -> BytesMut {
    let records = frame_records(action, time);
    let mut buf = BytesMut::with_capacity(records.len() * EVENT_RECORD_SIZE);
    for record in &records {
        encode_record(record, &mut buf);
    }
    buf
}
