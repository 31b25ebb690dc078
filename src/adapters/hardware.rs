//! Hardware adapter — bundles the three drivers behind one value.
//!
//! The session controller takes a single `hw` argument that satisfies
//! [`JoystickLines`], [`AnalogSampler`] and [`OutputPort`] at once; this
//! avoids juggling three mutable borrows while keeping each driver
//! independently testable.

use crate::app::ports::{AnalogSampler, JoystickLines, OutputPort};
use crate::error::Result;
use crate::protocol::{OutputLatch, SensorChannel};

pub struct JoyKidHardware<L, S, O> {
    lines: L,
    sampler: S,
    outputs: O,
}

impl<L, S, O> JoyKidHardware<L, S, O> {
    pub fn new(lines: L, sampler: S, outputs: O) -> Self {
        Self {
            lines,
            sampler,
            outputs,
        }
    }

    pub fn lines(&self) -> &L {
        &self.lines
    }
}

// ── JoystickLines ─────────────────────────────────────────────

impl<L: JoystickLines, S, O> JoystickLines for JoyKidHardware<L, S, O> {
    fn attention_asserted(&mut self) -> Result<bool> {
        self.lines.attention_asserted()
    }

    fn frame_clock_asserted(&mut self) -> Result<bool> {
        self.lines.frame_clock_asserted()
    }

    fn drop_data_ready(&mut self) -> Result<()> {
        self.lines.drop_data_ready()
    }

    fn release_data_ready(&mut self) -> Result<()> {
        self.lines.release_data_ready()
    }

    fn data_ready_high(&mut self) -> Result<bool> {
        self.lines.data_ready_high()
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<()> {
        self.lines.write_nibble(nibble)
    }

    fn release_data_bus(&mut self) -> Result<()> {
        self.lines.release_data_bus()
    }
}

// ── AnalogSampler ─────────────────────────────────────────────

impl<L, S: AnalogSampler, O> AnalogSampler for JoyKidHardware<L, S, O> {
    fn sample(&mut self, channel: SensorChannel) -> Result<u8> {
        self.sampler.sample(channel)
    }
}

// ── OutputPort ────────────────────────────────────────────────

impl<L, S, O: OutputPort> OutputPort for JoyKidHardware<L, S, O> {
    fn write_latch(&mut self, latch: OutputLatch) -> Result<()> {
        self.outputs.write_latch(latch)
    }

    fn latch(&self) -> OutputLatch {
        self.outputs.latch()
    }
}
