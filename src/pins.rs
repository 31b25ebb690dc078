//! GPIO / peripheral pin assignments for the JoyKid board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! ```text
//!   MSX joystick port (DE-9)          ESP32-S3
//!   1 UP    ── DATA_BUS bit 0   ──── GPIO 4
//!   2 DOWN  ── DATA_BUS bit 1   ──── GPIO 5
//!   3 LEFT  ── DATA_BUS bit 2   ──── GPIO 6
//!   4 RIGHT ── DATA_BUS bit 3   ──── GPIO 7
//!   6 TRG-A ── DATA_READY       ──── GPIO 8
//!   7 TRG-B ── FRAME_CLOCK      ──── GPIO 9
//!   8 PULSE ── ATTENTION        ──── GPIO 10
//! ```

// ---------------------------------------------------------------------------
// Joystick port — controller-driven inputs
// ---------------------------------------------------------------------------

/// Session marker from the computer (pin 8).  Active-low at the device.
pub const ATTENTION_GPIO: i32 = 10;
/// Handover strobe from the computer (pin 7).  Active-low at the device.
pub const FRAME_CLOCK_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Joystick port — peripheral-driven, open-drain
// ---------------------------------------------------------------------------

/// Acknowledge / output-bit line (pin 6).  Released = high.
pub const DATA_READY_GPIO: i32 = 8;
/// Nibble lines, bit 0 first (pins 1-4).  Released = high.
pub const DATA_BUS_GPIOS: [i32; 4] = [4, 5, 6, 7];

// ---------------------------------------------------------------------------
// Digital outputs (push-pull, active high)
// ---------------------------------------------------------------------------

pub const PORT0_GPIO: i32 = 11;
pub const PORT1_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Light-dependent resistor divider.  ADC1 channel 0 (GPIO 1).
pub const LIGHT_ADC_GPIO: i32 = 1;
/// Thermistor divider.  ADC1 channel 1 (GPIO 2).
pub const TEMP_ADC_GPIO: i32 = 2;
/// Electret microphone envelope.  ADC1 channel 2 (GPIO 3).
pub const SOUND_ADC_GPIO: i32 = 3;
