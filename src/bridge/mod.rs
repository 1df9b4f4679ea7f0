//! # Bridge Module
//!
//! Connects controller events to the virtual pointer.
//!
//! This module handles:
//! - The fixed operating mode
//! - Classifying events into pointer actions and diagnostics
//! - The single-threaded dispatch loop

pub mod dispatch;
pub mod mode;
pub mod router;
