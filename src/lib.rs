//! # Wiimote Pointer Library
//!
//! Drive the Linux pointer with a Wii Remote.
//!
//! This library reads a Wii Remote through the hid-wiimote evdev interfaces,
//! shapes accelerometer motion into relative pointer moves and injects them,
//! together with wheel and button actions, into a virtual input device.

pub mod bridge;
pub mod config;
pub mod controller;
pub mod error;
pub mod pointer;
pub mod uinput;
