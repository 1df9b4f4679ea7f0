//! # Controller Module
//!
//! Wii Remote input handling.
//!
//! This module handles:
//! - Remote discovery and connection via sysfs and evdev
//! - Translating per-interface evdev reports into controller events
//! - Shaping accelerometer values and integrating Motion-Plus rates
//! - Watching the remote's interfaces for hot-plug changes

pub mod calibration;
pub mod event;
pub mod hotplug;
pub mod mapper;
pub mod motion_plus;
pub mod wiimote;

use std::io;

use async_trait::async_trait;

use crate::error::Result;
use event::ControllerItem;
use motion_plus::MpCalibration;

/// Battery and LED state of a remote, for status logging only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerStatus {
    /// Battery charge in percent, if the kernel reports one
    pub battery: Option<u8>,
    /// Player LEDs 1 through 4
    pub leds: [Option<bool>; 4],
}

/// Event source driven by the dispatch loop
///
/// `next_item` must be cancel-safe: the dispatch loop races it against the
/// hot-plug channel and drops the losing future.
#[async_trait]
pub trait ControllerChannel: MpCalibration + Send {
    /// Wait for the next item
    ///
    /// `WouldBlock` and `Interrupted` errors are transient. Any other error is
    /// fatal to the dispatch loop.
    async fn next_item(&mut self) -> io::Result<ControllerItem>;

    /// Reopen every interface of the remote after a hot-plug notification
    fn reopen(&mut self) -> Result<()>;

    /// Current battery and LED state
    fn status(&self) -> ControllerStatus {
        ControllerStatus::default()
    }
}
