//! Settled single-shot ADC sampler.
//!
//! Each [`AnalogSampler::sample`] call waits out the sample/hold settle
//! time, runs one blocking conversion, and reduces the result to its eight
//! most significant bits.  Worst case per channel is the settle time plus
//! one conversion; three channels take roughly 130 µs on the device.
//!
//! The delay provider is any `embedded-hal` [`DelayNs`], so tests can pass
//! a recording no-op delay and keep the ordering guarantees.

use embedded_hal::delay::DelayNs;

use super::hw_init;
use crate::app::ports::AnalogSampler;
use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::protocol::SensorChannel;

pub struct SettledAdc<D> {
    delay: D,
    settle_us: u32,
    resolution_bits: u8,
}

impl<D: DelayNs> SettledAdc<D> {
    pub fn new(delay: D, config: &DeviceConfig) -> Self {
        Self {
            delay,
            settle_us: config.adc_settle_us,
            resolution_bits: config.adc_resolution_bits,
        }
    }
}

impl<D: DelayNs> AnalogSampler for SettledAdc<D> {
    fn sample(&mut self, channel: SensorChannel) -> Result<u8> {
        self.delay.delay_us(self.settle_us);
        let raw = hw_init::adc1_read(adc1_channel(channel)).map_err(|e| {
            log::debug!("adc: {} on {}", e, channel);
            Error::Adc(channel)
        })?;
        Ok(reduce_to_u8(raw, self.resolution_bits))
    }
}

const fn adc1_channel(channel: SensorChannel) -> u32 {
    match channel {
        SensorChannel::Light => hw_init::ADC1_CH_LIGHT,
        SensorChannel::Temperature => hw_init::ADC1_CH_TEMP,
        SensorChannel::Sound => hw_init::ADC1_CH_SOUND,
    }
}

/// Keep the top eight bits of a `bits`-wide result (clamped to full scale).
pub fn reduce_to_u8(raw: u16, bits: u8) -> u8 {
    let bits = bits.clamp(8, 16);
    let full_scale = (1u32 << bits) - 1;
    (u32::from(raw).min(full_scale) >> (bits - 8)) as u8
}
