//! Raw GPIO number exposed through the `embedded-hal` digital traits.
//!
//! The pin's direction is fixed by [`hw_init`](super::hw_init); this type
//! only reads and writes levels.  Open-drain lines are read back from the
//! pad, so a released line reports whatever the other side drives.

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::hw_init::{self, HwError};

#[derive(Debug)]
pub struct GpioPin {
    gpio: i32,
}

impl GpioPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for GpioPin {
    type Error = HwError;
}

impl InputPin for GpioPin {
    fn is_high(&mut self) -> Result<bool, HwError> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, HwError> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}

impl OutputPin for GpioPin {
    fn set_low(&mut self) -> Result<(), HwError> {
        hw_init::gpio_write(self.gpio, false)
    }

    fn set_high(&mut self) -> Result<(), HwError> {
        hw_init::gpio_write(self.gpio, true)
    }
}
