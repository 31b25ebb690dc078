//! JoyKid firmware library.
//!
//! A sensor peripheral for the MSX joystick port: three analog readings
//! (light, temperature, sound) go out and two output bits come in, one
//! nibble at a time, over the port's plain digital lines.
//!
//! Exposes the protocol core and the drivers for host integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod protocol;
pub mod sensors;
