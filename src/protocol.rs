//! Data model of the JoyKid joystick-port protocol.
//!
//! ```text
//!        ____________________________________________
//!  ATT  /                                            \_______
//!  ______________        ____      ____      ____________
//!  CLK           \_sof__/    \____/    \____/
//!  _______         __________                     _______
//!  RDY    \_ack___/ release  | PORT0   | PORT1   |
//!
//!  BUS --------------| L.lo | L.hi | T.lo | T.hi | S.lo | S.hi |-------
//! ```
//!
//! Levels are logical (asserted / released).  Physical polarity of the
//! controller-driven lines is handled by the joystick driver.

use core::fmt;

/// Number of nibbles exchanged by a completed session.
pub const NIBBLES_PER_SESSION: usize = 6;

/// DATA_BUS pattern while no session is open (all four lines released).
pub const DATA_BUS_IDLE: u8 = 0x0F;

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// Physical joystick-port signals used by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineId {
    /// Controller-driven session marker (MSX pin 8).
    Attention,
    /// Controller-driven handover strobe (MSX pin 7).
    FrameClock,
    /// Open-drain acknowledge / output-bit line (MSX pin 6).
    DataReady,
    /// One of the four data lines (MSX pins 1-4), bit 0..=3.
    DataBus(u8),
    /// One of the two committed output pins.
    Output(LatchBit),
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attention => write!(f, "ATTENTION"),
            Self::FrameClock => write!(f, "FRAME_CLOCK"),
            Self::DataReady => write!(f, "DATA_READY"),
            Self::DataBus(bit) => write!(f, "DATA_BUS[{bit}]"),
            Self::Output(bit) => write!(f, "{bit}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// The three fixed analog channels, in transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SensorChannel {
    Light = 0,
    Temperature = 1,
    Sound = 2,
}

impl SensorChannel {
    /// Sampling and transmission order.
    pub const ALL: [Self; 3] = [Self::Light, Self::Temperature, Self::Sound];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Temperature => write!(f, "temperature"),
            Self::Sound => write!(f, "sound"),
        }
    }
}

/// One reading of every sensor, taken once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorFrame {
    pub light: u8,
    pub temperature: u8,
    pub sound: u8,
}

impl SensorFrame {
    pub const fn new(light: u8, temperature: u8, sound: u8) -> Self {
        Self {
            light,
            temperature,
            sound,
        }
    }

    pub const fn reading(&self, channel: SensorChannel) -> u8 {
        match channel {
            SensorChannel::Light => self.light,
            SensorChannel::Temperature => self.temperature,
            SensorChannel::Sound => self.sound,
        }
    }

    /// Value placed on DATA_BUS for `slot` (low 4 bits only).
    pub const fn nibble(&self, slot: NibbleSlot) -> u8 {
        let value = self.reading(slot.channel());
        if slot.is_high() { value >> 4 } else { value & 0x0F }
    }

    /// The six nibbles of a session in wire order.
    pub fn nibbles(&self) -> [u8; NIBBLES_PER_SESSION] {
        NibbleSlot::ORDER.map(|slot| self.nibble(slot))
    }
}

/// Position of a nibble in the session sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NibbleSlot {
    LightLow,
    LightHigh,
    TemperatureLow,
    TemperatureHigh,
    SoundLow,
    SoundHigh,
}

impl NibbleSlot {
    pub const ORDER: [Self; NIBBLES_PER_SESSION] = [
        Self::LightLow,
        Self::LightHigh,
        Self::TemperatureLow,
        Self::TemperatureHigh,
        Self::SoundLow,
        Self::SoundHigh,
    ];

    pub const fn channel(self) -> SensorChannel {
        match self {
            Self::LightLow | Self::LightHigh => SensorChannel::Light,
            Self::TemperatureLow | Self::TemperatureHigh => SensorChannel::Temperature,
            Self::SoundLow | Self::SoundHigh => SensorChannel::Sound,
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::LightHigh | Self::TemperatureHigh | Self::SoundHigh)
    }
}

// ---------------------------------------------------------------------------
// Output latch
// ---------------------------------------------------------------------------

/// Selects one of the two digital outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchBit {
    Port0,
    Port1,
}

impl fmt::Display for LatchBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port0 => write!(f, "PORT0"),
            Self::Port1 => write!(f, "PORT1"),
        }
    }
}

/// Two output bits captured from DATA_READY during a session.
///
/// Held privately by the transfer engine until the session ends; only a
/// completed session hands it to the controller for commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputLatch {
    pub port0: bool,
    pub port1: bool,
}

impl OutputLatch {
    pub const fn new(port0: bool, port1: bool) -> Self {
        Self { port0, port1 }
    }

    pub const fn get(&self, bit: LatchBit) -> bool {
        match bit {
            LatchBit::Port0 => self.port0,
            LatchBit::Port1 => self.port1,
        }
    }

    pub fn set(&mut self, bit: LatchBit, level: bool) {
        match bit {
            LatchBit::Port0 => self.port0 = level,
            LatchBit::Port1 => self.port1 = level,
        }
    }

    /// Drive both physical outputs to this latch's values.
    pub fn commit_to(self, port: &mut impl crate::app::ports::OutputPort) -> crate::error::Result<()> {
        port.write_latch(self)
    }
}
