//! Trait abstraction for pointer device writes to enable testing

use std::fs::File;
use std::io::{self, Write};

/// Trait for pointer device I/O operations
#[cfg_attr(test, mockall::automock)]
pub trait PointerIO: Send {
    /// Write one complete frame with a single write call
    ///
    /// Returns the number of bytes the device accepted.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<usize>;
}

/// Wrapper around an open input device node that implements PointerIO
pub struct FilePointer {
    file: File,
}

impl FilePointer {
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

impl PointerIO for FilePointer {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<usize> {
        loop {
            match self.file.write(frame) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}
