//! The two digital output pins that mirror the committed latch.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::OutputPort;
use crate::error::{Error, Result};
use crate::protocol::{LatchBit, LineId, OutputLatch};

pub struct LatchOutputs<P0, P1> {
    port0: P0,
    port1: P1,
    current: OutputLatch,
}

impl<P0: OutputPin, P1: OutputPin> LatchOutputs<P0, P1> {
    /// Take the pins and drive both to their inactive (low) level.
    pub fn new(port0: P0, port1: P1) -> Result<Self> {
        let mut outputs = Self {
            port0,
            port1,
            current: OutputLatch::default(),
        };
        outputs.write_latch(OutputLatch::default())?;
        Ok(outputs)
    }
}

impl<P0: OutputPin, P1: OutputPin> OutputPort for LatchOutputs<P0, P1> {
    fn write_latch(&mut self, latch: OutputLatch) -> Result<()> {
        self.port0
            .set_state(PinState::from(latch.port0))
            .map_err(|_| Error::Gpio(LineId::Output(LatchBit::Port0)))?;
        self.port1
            .set_state(PinState::from(latch.port1))
            .map_err(|_| Error::Gpio(LineId::Output(LatchBit::Port1)))?;
        self.current = latch;
        Ok(())
    }

    fn latch(&self) -> OutputLatch {
        self.current
    }
}
