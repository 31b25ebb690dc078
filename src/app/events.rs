//! Outbound session events.
//!
//! The [`SessionController`](super::service::SessionController) emits these
//! through the [`EventSink`](super::ports::EventSink) port once a session
//! has been cleaned up.  Adapters decide what to do with them.

use crate::error::Error;
use crate::protocol::{OutputLatch, SensorFrame};

/// Structured events emitted by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Lines released and ATTENTION observed idle; ready for the first session.
    Ready,

    /// All six nibbles were handed over and the latch was committed.
    Completed {
        session: u32,
        frame: SensorFrame,
        latch: OutputLatch,
    },

    /// The controller withdrew ATTENTION early; outputs left untouched.
    Abandoned { session: u32, nibbles_sent: u8 },

    /// A line or ADC access failed; the session was dropped without commit.
    Fault { session: u32, error: Error },
}
