//! Session controller — gates entry into the protocol.
//!
//! [`SessionController`] waits for ATTENTION, hands the session to a fresh
//! [`TransferEngine`], commits the output latch of a completed session, and
//! always leaves DATA_READY and DATA_BUS released afterwards.  All I/O flows
//! through port traits injected at call sites.
//!
//! ```text
//!  JoystickLines ──▶ ┌─────────────────────┐ ──▶ EventSink
//!  AnalogSampler ──▶ │  SessionController  │
//!     OutputPort ◀── │   TransferEngine    │
//!                    └─────────────────────┘
//! ```

use log::{info, warn};

use crate::diagnostics::{RecordKind, SessionRecord, SessionStats};
use crate::error::{Error, Result};
use crate::fsm::{TransferEngine, TransferOutcome};
use crate::protocol::{OutputLatch, SensorFrame};

use super::events::SessionEvent;
use super::ports::{AnalogSampler, EventSink, JoystickLines, OutputPort};

/// What one call to [`SessionController::run_session`] achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Latch committed to the outputs.
    Completed {
        frame: SensorFrame,
        latch: OutputLatch,
    },
    /// ATTENTION dropped early; outputs unchanged.
    Abandoned { nibbles_sent: u8 },
    /// A line or ADC access failed.  Outputs are unchanged unless the
    /// failure happened while releasing the lines after a commit.
    Fault { error: Error, nibbles_sent: u8 },
}

/// Owns nothing but bookkeeping; the hardware is passed in per call.
#[derive(Debug, Default)]
pub struct SessionController {
    sessions: u32,
    stats: SessionStats,
    /// Last session faulted; the controller may still hold ATTENTION.
    resync: bool,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions started so far.
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Release our lines and wait out any session already in progress.
    ///
    /// Call once at power-on so the device never joins a transfer midway.
    pub fn sync_to_idle(
        &mut self,
        lines: &mut impl JoystickLines,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        Self::release_lines(lines)?;
        Self::wait_for_release(lines)?;
        sink.emit(&SessionEvent::Ready);
        Ok(())
    }

    /// Busy-poll until ATTENTION is asserted.  No timeout.
    ///
    /// After a faulted session the controller may still be clocking its
    /// frame, so ATTENTION must first be seen released; a new session is
    /// never joined midway.
    pub fn await_session_start(&mut self, lines: &mut impl JoystickLines) -> Result<()> {
        if self.resync {
            Self::wait_for_release(lines)?;
            self.resync = false;
        }
        while !lines.attention_asserted()? {}
        Ok(())
    }

    /// `true` while a fault is pending and the next start waits for idle.
    pub fn resyncing(&self) -> bool {
        self.resync
    }

    /// Run one session to its end and restore the idle line state.
    ///
    /// The latch is committed only when all six nibbles were handed over and
    /// ATTENTION was then released.  DATA_READY and DATA_BUS are released on
    /// every path, including abandonment and faults.
    pub fn run_session(
        &mut self,
        hw: &mut (impl JoystickLines + AnalogSampler + OutputPort),
        sink: &mut impl EventSink,
    ) -> SessionOutcome {
        self.sessions = self.sessions.wrapping_add(1);
        let session = self.sessions;

        let mut engine = TransferEngine::new();
        let transfer = match engine.run(hw) {
            Ok(TransferOutcome::Completed { frame, latch }) => latch
                .commit_to(hw)
                .map(|()| SessionOutcome::Completed { frame, latch }),
            Ok(TransferOutcome::Abandoned { nibbles_sent }) => {
                Ok(SessionOutcome::Abandoned { nibbles_sent })
            }
            Err(error) => Err(error),
        };
        let cleanup = Self::release_lines(hw);

        let nibbles_sent = engine.nibbles_sent();
        let outcome = match transfer.and_then(|outcome| cleanup.map(|()| outcome)) {
            Ok(outcome) => outcome,
            Err(error) => SessionOutcome::Fault {
                error,
                nibbles_sent,
            },
        };

        self.resync = matches!(outcome, SessionOutcome::Fault { .. });
        self.report(session, outcome, sink);
        outcome
    }

    /// The device main loop: sync once, then serve sessions back to back.
    pub fn serve_forever(
        &mut self,
        hw: &mut (impl JoystickLines + AnalogSampler + OutputPort),
        sink: &mut impl EventSink,
    ) -> ! {
        while let Err(e) = self.sync_to_idle(hw, sink) {
            warn!("Idle sync failed: {}", e);
        }
        info!("Serving sessions");

        loop {
            if let Err(e) = self.await_session_start(hw) {
                warn!("ATTENTION poll failed: {}", e);
                continue;
            }
            self.run_session(hw, sink);
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn wait_for_release(lines: &mut impl JoystickLines) -> Result<()> {
        while lines.attention_asserted()? {}
        Ok(())
    }

    /// Attempt both releases even if the first fails.
    fn release_lines(lines: &mut impl JoystickLines) -> Result<()> {
        let ready = lines.release_data_ready();
        let bus = lines.release_data_bus();
        ready.and(bus)
    }

    fn report(&mut self, session: u32, outcome: SessionOutcome, sink: &mut impl EventSink) {
        let (kind, nibbles_sent, event) = match outcome {
            SessionOutcome::Completed { frame, latch } => (
                RecordKind::Completed,
                crate::protocol::NIBBLES_PER_SESSION as u8,
                SessionEvent::Completed {
                    session,
                    frame,
                    latch,
                },
            ),
            SessionOutcome::Abandoned { nibbles_sent } => (
                RecordKind::Abandoned,
                nibbles_sent,
                SessionEvent::Abandoned {
                    session,
                    nibbles_sent,
                },
            ),
            SessionOutcome::Fault {
                error,
                nibbles_sent,
            } => (
                RecordKind::Fault(error),
                nibbles_sent,
                SessionEvent::Fault { session, error },
            ),
        };

        self.stats.record(SessionRecord {
            session,
            kind,
            nibbles_sent,
        });
        sink.emit(&event);
    }
}
