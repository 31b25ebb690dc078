//! Sensor subsystem — turns three channel conversions into a [`SensorFrame`].
//!
//! Sampling happens exactly once per session, before the first nibble is
//! placed on the bus.  Nothing is cached between sessions.

use crate::app::ports::AnalogSampler;
use crate::error::Result;
use crate::protocol::{SensorChannel, SensorFrame};

/// Sample light, temperature, and sound in that order.
///
/// Costs three settle + convert cycles (~130 µs on the reference hardware).
pub fn sample_frame(sampler: &mut impl AnalogSampler) -> Result<SensorFrame> {
    let light = sampler.sample(SensorChannel::Light)?;
    let temperature = sampler.sample(SensorChannel::Temperature)?;
    let sound = sampler.sample(SensorChannel::Sound)?;
    Ok(SensorFrame {
        light,
        temperature,
        sound,
    })
}
