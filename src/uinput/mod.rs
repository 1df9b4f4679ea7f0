//! # Input Event Module
//!
//! Binary encoding of pointer actions for a Linux input device node.
//!
//! This module handles:
//! - The fixed 24-byte `input_event` record layout
//! - Encoding relative motion, wheel and button actions into frames
//! - Terminating every frame with a `SYN_REPORT` record
//! - Decoding records and frames for verification

pub mod protocol;
pub mod encoder;
pub mod decoder;
