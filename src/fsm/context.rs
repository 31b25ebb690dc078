//! Per-session state owned by one [`TransferEngine`](super::TransferEngine).
//!
//! Nothing here outlives the session: a new engine starts from a fresh
//! context, so readings and captured bits never leak across sessions.

use crate::protocol::{OutputLatch, SensorFrame};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferContext {
    /// Readings taken at session start; read six times as nibbles.
    pub frame: SensorFrame,
    /// Bits captured from DATA_READY.  Uncommitted until the session ends.
    pub captured: OutputLatch,
    /// Nibbles placed on DATA_BUS so far.
    pub nibbles_sent: u8,
}

impl TransferContext {
    pub fn new() -> Self {
        Self::default()
    }
}
