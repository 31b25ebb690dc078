//! Device configuration parameters
//!
//! The peripheral is stateless across power cycles: these values are
//! compile-time defaults, never persisted.  They are serde-serialisable so
//! the active configuration can be dumped alongside diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    // --- Line polarity ---
    /// ATTENTION reads low at the device pin while a session is open
    pub attention_active_low: bool,
    /// FRAME_CLOCK reads low at the device pin while asserted
    pub frame_clock_active_low: bool,

    // --- ADC ---
    /// Sample/hold settle time before each conversion (microseconds)
    pub adc_settle_us: u32,
    /// Width of a raw conversion result; reduced to its top 8 bits
    pub adc_resolution_bits: u8,

    // --- Logging ---
    /// Include the sampled frame in the per-session `debug` line
    pub log_frames: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            // Reference wiring: both controller strobes are active-low
            attention_active_low: true,
            frame_clock_active_low: true,

            // ADC
            adc_settle_us: 20,
            adc_resolution_bits: 12,

            // Logging
            log_frames: true,
        }
    }
}

impl DeviceConfig {
    /// Reject values the drivers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.adc_settle_us == 0 {
            return Err(Error::Config("adc_settle_us must be non-zero"));
        }
        if !(8..=16).contains(&self.adc_resolution_bits) {
            return Err(Error::Config("adc_resolution_bits must be 8..=16"));
        }
        Ok(())
    }
}
