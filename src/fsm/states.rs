//! The handover table: one row per nibble.
//!
//! Each row says which FRAME_CLOCK level releases the step, which nibble
//! goes on the bus, and what the step does with DATA_READY.  The engine
//! walks the rows in order; there is no other sequencing logic.
//!
//! ```text
//!  step  clock       nibble       DATA_READY
//!  ───── ─────────── ──────────── ──────────────────────
//!   0    asserted    light lo     release ("ready")
//!   1    deasserted  light hi     -
//!   2    asserted    temp lo      read as PORT0
//!   3    deasserted  temp hi      -
//!   4    asserted    sound lo     read as PORT1
//!   5    deasserted  sound hi     -
//! ```

use crate::protocol::{LatchBit, NIBBLES_PER_SESSION, NibbleSlot};

/// What DATA_READY means during a step.
///
/// The line is a single physical resource; only the step decides whether
/// it is written as an acknowledge or read as a controller output bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataReadyRole {
    /// Peripheral releases the line to signal the first nibble is valid.
    Announce,
    /// Controller drives the line; its level is captured into the latch.
    Capture(LatchBit),
    /// Line is left alone.
    Untouched,
}

/// Static descriptor for one nibble handover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandoverStep {
    pub name: &'static str,
    /// FRAME_CLOCK level that releases this step.
    pub clock_asserted: bool,
    pub slot: NibbleSlot,
    pub data_ready: DataReadyRole,
}

pub static HANDOVER_TABLE: [HandoverStep; NIBBLES_PER_SESSION] = [
    // Start of frame
    HandoverStep {
        name: "light-lo",
        clock_asserted: true,
        slot: NibbleSlot::LightLow,
        data_ready: DataReadyRole::Announce,
    },
    HandoverStep {
        name: "light-hi",
        clock_asserted: false,
        slot: NibbleSlot::LightHigh,
        data_ready: DataReadyRole::Untouched,
    },
    HandoverStep {
        name: "temp-lo",
        clock_asserted: true,
        slot: NibbleSlot::TemperatureLow,
        data_ready: DataReadyRole::Capture(LatchBit::Port0),
    },
    HandoverStep {
        name: "temp-hi",
        clock_asserted: false,
        slot: NibbleSlot::TemperatureHigh,
        data_ready: DataReadyRole::Untouched,
    },
    HandoverStep {
        name: "sound-lo",
        clock_asserted: true,
        slot: NibbleSlot::SoundLow,
        data_ready: DataReadyRole::Capture(LatchBit::Port1),
    },
    HandoverStep {
        name: "sound-hi",
        clock_asserted: false,
        slot: NibbleSlot::SoundHigh,
        data_ready: DataReadyRole::Untouched,
    },
];
