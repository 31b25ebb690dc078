//! Joystick-port line driver.
//!
//! Maps the logical [`JoystickLines`] operations onto seven digital pins:
//!
//! | Line        | Pin mode             | Released / idle |
//! |-------------|----------------------|-----------------|
//! | ATTENTION   | input, pull-up       | deasserted      |
//! | FRAME_CLOCK | input, pull-up       | deasserted      |
//! | DATA_READY  | open-drain in/out    | high            |
//! | DATA_BUS ×4 | open-drain out       | high (`0x0F`)   |
//!
//! ATTENTION and FRAME_CLOCK polarity comes from [`DeviceConfig`]; the
//! reference wiring has both active-low.  Writing a nibble touches only the
//! four bus pins, never the output latch pins.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::app::ports::JoystickLines;
use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::protocol::{DATA_BUS_IDLE, LineId};

pub struct JoystickPort<A, C, R, D> {
    attention: A,
    frame_clock: C,
    data_ready: R,
    /// Bit 0 first.
    data_bus: [D; 4],
    attention_active_low: bool,
    frame_clock_active_low: bool,
}

impl<A, C, R, D> JoystickPort<A, C, R, D> {
    pub fn new(
        attention: A,
        frame_clock: C,
        data_ready: R,
        data_bus: [D; 4],
        config: &DeviceConfig,
    ) -> Self {
        Self {
            attention,
            frame_clock,
            data_ready,
            data_bus,
            attention_active_low: config.attention_active_low,
            frame_clock_active_low: config.frame_clock_active_low,
        }
    }
}

impl<A, C, R, D> JoystickLines for JoystickPort<A, C, R, D>
where
    A: InputPin,
    C: InputPin,
    R: InputPin + OutputPin,
    D: OutputPin,
{
    fn attention_asserted(&mut self) -> Result<bool> {
        let high = self
            .attention
            .is_high()
            .map_err(|_| Error::Gpio(LineId::Attention))?;
        Ok(high != self.attention_active_low)
    }

    fn frame_clock_asserted(&mut self) -> Result<bool> {
        let high = self
            .frame_clock
            .is_high()
            .map_err(|_| Error::Gpio(LineId::FrameClock))?;
        Ok(high != self.frame_clock_active_low)
    }

    fn drop_data_ready(&mut self) -> Result<()> {
        self.data_ready
            .set_low()
            .map_err(|_| Error::Gpio(LineId::DataReady))
    }

    fn release_data_ready(&mut self) -> Result<()> {
        self.data_ready
            .set_high()
            .map_err(|_| Error::Gpio(LineId::DataReady))
    }

    fn data_ready_high(&mut self) -> Result<bool> {
        self.data_ready
            .is_high()
            .map_err(|_| Error::Gpio(LineId::DataReady))
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<()> {
        for (bit, pin) in self.data_bus.iter_mut().enumerate() {
            let state = PinState::from(nibble & (1 << bit) != 0);
            pin.set_state(state)
                .map_err(|_| Error::Gpio(LineId::DataBus(bit as u8)))?;
        }
        Ok(())
    }

    fn release_data_bus(&mut self) -> Result<()> {
        self.write_nibble(DATA_BUS_IDLE)
    }
}
