//! # Virtual Pointer Module
//!
//! Writes pointer actions to a Linux input device node.
//!
//! This module handles:
//! - Opening the pointer device read/write
//! - Encoding each action as one frame (data records + `SYN_REPORT`)
//! - Writing the frame with a single write call
//! - Releasing the device when the handle goes out of scope

pub mod device_trait;

use std::fs::OpenOptions;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PointerBridgeError, Result};
use crate::uinput::encoder::encode_frame;
use crate::uinput::protocol::{PointerAction, RecordTime, BTN_LEFT};
use device_trait::{FilePointer, PointerIO};

/// Handle to the virtual pointer device
///
/// Exclusively owns the device. The device is closed when the handle is
/// dropped, on every exit path.
pub struct VirtualPointer<P: PointerIO = FilePointer> {
    io: P,
    device_path: String,
    frames_written: u64,
}

impl<P: PointerIO> std::fmt::Debug for VirtualPointer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualPointer")
            .field("device_path", &self.device_path)
            .field("frames_written", &self.frames_written)
            .finish_non_exhaustive()
    }
}

impl VirtualPointer<FilePointer> {
    /// Open the pointer device at `path` for read/write
    ///
    /// # Errors
    ///
    /// Returns `DeviceOpen` if the path cannot be opened. Callers treat this
    /// as fatal: without a pointer sink there is nothing to drive.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wiimote_pointer::pointer::VirtualPointer;
    ///
    /// let mut pointer = VirtualPointer::open("/dev/input/event6")?;
    /// pointer.emit_relative_move(100, 100)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<A: AsRef<Path>>(path: A) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| PointerBridgeError::DeviceOpen {
                path: path.display().to_string(),
                source,
            })?;

        info!("Opened pointer device at {}", path.display());
        Ok(Self::with_io(FilePointer::new(file), path.display().to_string()))
    }
}

impl<P: PointerIO> VirtualPointer<P> {
    /// Wrap an already opened device
    pub fn with_io(io: P, device_path: impl Into<String>) -> Self {
        Self {
            io,
            device_path: device_path.into(),
            frames_written: 0,
        }
    }

    /// Emit one pointer action as a complete frame
    ///
    /// # Errors
    ///
    /// Returns `Emission` on I/O failure and `ShortWrite` if the device took
    /// only part of the frame. Nothing is retried.
    pub fn emit(&mut self, action: PointerAction) -> Result<()> {
        let frame = encode_frame(&action, RecordTime::now());

        let written = self.io.write_frame(&frame).map_err(PointerBridgeError::Emission)?;
        if written != frame.len() {
            return Err(PointerBridgeError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }

        self.frames_written += 1;
        debug!("Emitted {:?} ({} bytes)", action, frame.len());
        Ok(())
    }

    /// Move the pointer by (`dx`, `dy`)
    pub fn emit_relative_move(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.emit(PointerAction::RelativeMove { dx, dy })
    }

    /// Scroll the vertical wheel by `delta` notches
    pub fn emit_wheel(&mut self, delta: i32) -> Result<()> {
        self.emit(PointerAction::Wheel { delta })
    }

    /// Press or release the primary (left) button
    pub fn emit_button(&mut self, pressed: bool) -> Result<()> {
        self.emit(PointerAction::Button { id: BTN_LEFT, pressed })
    }

    /// Path the device was opened from
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Number of frames successfully written
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Release the device
    ///
    /// Equivalent to dropping the handle.
    pub fn close(self) {}
}

impl<P: PointerIO> Drop for VirtualPointer<P> {
    fn drop(&mut self) {
        info!(
            "Closing pointer device {} ({} frames written)",
            self.device_path, self.frames_written
        );
    }
}
