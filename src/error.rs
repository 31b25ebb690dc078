//! Unified error types for the JoyKid firmware.
//!
//! A single `Error` enum that every subsystem converts into.  All variants
//! are `Copy` so they can be carried in session events and diagnostics
//! without allocation.
//!
//! Session abandonment has no variant here: a controller withdrawing
//! ATTENTION is a normal protocol outcome.

use core::fmt;

use crate::protocol::{LineId, SensorChannel};

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write on a protocol line failed.
    Gpio(LineId),
    /// An analog conversion could not be completed.
    Adc(SensorChannel),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(line) => write!(f, "gpio: {line} access failed"),
            Self::Adc(channel) => write!(f, "adc: {channel} conversion failed"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
