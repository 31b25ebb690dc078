//! Port traits — the boundary between protocol logic and the pins.
//!
//! ```text
//!   Driver ──▶ Port trait ──▶ TransferEngine / SessionController
//! ```
//!
//! Drivers (joystick lines, ADC, output pins, log sink) implement these
//! traits.  The protocol core consumes them via generics, so the state
//! machine never touches hardware directly and runs unchanged against
//! host-side mocks.

use crate::error::Result;
use crate::protocol::{OutputLatch, SensorChannel};

use super::events::SessionEvent;

// ───────────────────────────────────────────────────────────────
// Joystick lines (bidirectional, level-polled)
// ───────────────────────────────────────────────────────────────

/// The four protocol signals, in logical terms.
///
/// Every call acts on the pins immediately; nothing is buffered between
/// the protocol state and the physical level.
pub trait JoystickLines {
    /// `true` while the controller holds a session open.
    fn attention_asserted(&mut self) -> Result<bool>;

    /// `true` while the controller holds FRAME_CLOCK asserted.
    fn frame_clock_asserted(&mut self) -> Result<bool>;

    /// Actively pull DATA_READY low.
    fn drop_data_ready(&mut self) -> Result<()>;

    /// Stop driving DATA_READY; the pull-up (or the controller) sets its level.
    fn release_data_ready(&mut self) -> Result<()>;

    /// Level currently seen on DATA_READY (`true` = high).
    fn data_ready_high(&mut self) -> Result<bool>;

    /// Place the low four bits of `nibble` on DATA_BUS.
    fn write_nibble(&mut self, nibble: u8) -> Result<()>;

    /// Release all four DATA_BUS lines to their idle-high state.
    fn release_data_bus(&mut self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Analog sampling (blocking, bounded latency)
// ───────────────────────────────────────────────────────────────

/// Blocking single-channel conversion.
///
/// Implementations settle the sample/hold before converting (~20 µs on the
/// reference hardware) and never cache: each call is a fresh measurement.
/// Three back-to-back calls, one per channel, must not interfere.
pub trait AnalogSampler {
    fn sample(&mut self, channel: SensorChannel) -> Result<u8>;
}

// ───────────────────────────────────────────────────────────────
// Output pins
// ───────────────────────────────────────────────────────────────

/// The two digital outputs that reflect the last committed latch.
pub trait OutputPort {
    /// Drive both outputs.  Called only at session end.
    fn write_latch(&mut self, latch: OutputLatch) -> Result<()>;

    /// Values most recently written.
    fn latch(&self) -> OutputLatch;
}

// ───────────────────────────────────────────────────────────────
// Event sink
// ───────────────────────────────────────────────────────────────

/// The controller reports each session through this port after cleanup.
pub trait EventSink {
    fn emit(&mut self, event: &SessionEvent);
}
