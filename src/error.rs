//! # Error Types
//!
//! Custom error types for Wiimote Pointer using `thiserror`.

use std::io;
use thiserror::Error;

/// Main error type for Wiimote Pointer
#[derive(Debug, Error)]
pub enum PointerBridgeError {
    /// Pointer or controller device could not be opened
    #[error("Cannot open device {path}: {source}")]
    DeviceOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    /// No Wii Remote matched the requested selector
    #[error("Controller not found: {0}")]
    ControllerNotFound(String),

    /// Controller adapter errors (discovery, sysfs layout)
    #[error("Controller error: {0}")]
    Controller(String),

    /// Non-transient read error on the controller event channel
    #[error("Controller read failed: {0}")]
    ControllerRead(#[source] io::Error),

    /// Write to the pointer device failed
    #[error("Pointer emission failed: {0}")]
    Emission(#[source] io::Error),

    /// The pointer device accepted only part of a frame
    #[error("Short write to pointer device: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// Malformed event record data
    #[error("Event record error: {0}")]
    Record(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PointerBridgeError {
    /// Returns true for errors that mean the pointer sink is unusable.
    #[must_use]
    pub fn is_emission(&self) -> bool {
        matches!(self, Self::Emission(_) | Self::ShortWrite { .. })
    }
}

/// Result type alias for Wiimote Pointer
pub type Result<T> = std::result::Result<T, PointerBridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_open_message_names_path() {
        let err = PointerBridgeError::DeviceOpen {
            path: "/dev/input/event6".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/dev/input/event6"));
    }

    #[test]
    fn test_is_emission() {
        assert!(PointerBridgeError::ShortWrite { written: 8, expected: 72 }.is_emission());
        assert!(PointerBridgeError::Emission(io::Error::from(io::ErrorKind::BrokenPipe)).is_emission());
        assert!(!PointerBridgeError::ControllerNotFound("1".into()).is_emission());
    }
}
