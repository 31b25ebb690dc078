//! Transfer engine — the six-nibble handover state machine.
//!
//! ```text
//! ┌──────────┐ sample ×3, drop RDY ┌──────────────┐ 6 rows ┌──────────────┐
//! │ Sampling │ ──────────────────▶ │ Handover(n)  │ ─────▶ │ AwaitRelease │
//! └──────────┘                     └──────────────┘        └──────────────┘
//!                                        │ ATT released          │ ATT released
//!                                        ▼                       ▼
//!                                    Abandoned               Completed
//! ```
//!
//! Each call to [`TransferEngine::tick`] evaluates the guard of the current
//! state exactly once and never blocks.  A waiting state is a two-way
//! branch: ATTENTION released → abandon, otherwise the FRAME_CLOCK guard
//! either holds (act and advance) or does not (stay).  ATTENTION is always
//! checked first, so an abort wins over protocol progress.
//!
//! [`TransferEngine::run`] is the blocking form used on the device: it
//! spins on `tick` with no timeout.  A controller that stops toggling
//! FRAME_CLOCK without releasing ATTENTION keeps it spinning.

pub mod context;
pub mod states;

use context::TransferContext;
use states::{DataReadyRole, HANDOVER_TABLE, HandoverStep};

use crate::app::ports::{AnalogSampler, JoystickLines};
use crate::error::Result;
use crate::protocol::{NIBBLES_PER_SESSION, OutputLatch, SensorFrame};
use crate::sensors;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// All six nibbles placed and ATTENTION released.  The latch is ready
    /// to be committed.
    Completed {
        frame: SensorFrame,
        latch: OutputLatch,
    },
    /// ATTENTION released before the sixth nibble was placed.  Captured
    /// bits are discarded.
    Abandoned { nibbles_sent: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Session just opened; sensors not yet read.
    Sampling,
    /// Waiting for the FRAME_CLOCK level of `HANDOVER_TABLE[n]`.
    Handover(usize),
    /// Last nibble is on the bus; waiting for ATTENTION to drop.
    AwaitRelease,
    Finished(TransferOutcome),
}

/// Result of a single [`TransferEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Pending,
    Done(TransferOutcome),
}

/// Guard evaluation for a waiting state.
enum Guard {
    Abort,
    Wait,
    Go,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// One session's worth of protocol state.
///
/// Create a fresh engine for every session; it owns the sampled frame and
/// the captured latch bits and hands them out only through the outcome.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    state: TransferState,
    ctx: TransferContext,
    ticks: u64,
}

impl TransferEngine {
    pub fn new() -> Self {
        Self {
            state: TransferState::Sampling,
            ctx: TransferContext::new(),
            ticks: 0,
        }
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn nibbles_sent(&self) -> u8 {
        self.ctx.nibbles_sent
    }

    /// Number of `tick` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The step currently waiting for its clock edge, if any.
    pub fn pending_step(&self) -> Option<&'static HandoverStep> {
        match self.state {
            TransferState::Handover(n) => HANDOVER_TABLE.get(n),
            _ => None,
        }
    }

    /// Evaluate the current state once.
    ///
    /// On `Err` the engine stays where it was; the caller abandons the
    /// session without committing anything.
    pub fn tick(&mut self, hw: &mut (impl JoystickLines + AnalogSampler)) -> Result<Progress> {
        self.ticks += 1;

        match self.state {
            TransferState::Sampling => {
                self.ctx.frame = sensors::sample_frame(hw)?;
                hw.drop_data_ready()?;
                self.state = TransferState::Handover(0);
            }

            TransferState::Handover(n) => {
                let step = &HANDOVER_TABLE[n];
                match Self::guard(hw, step.clock_asserted)? {
                    Guard::Abort => self.abandon(),
                    Guard::Wait => {}
                    Guard::Go => self.hand_over(hw, n, step)?,
                }
            }

            TransferState::AwaitRelease => {
                if !hw.attention_asserted()? {
                    self.state = TransferState::Finished(TransferOutcome::Completed {
                        frame: self.ctx.frame,
                        latch: self.ctx.captured,
                    });
                }
            }

            TransferState::Finished(_) => {}
        }

        Ok(match self.state {
            TransferState::Finished(outcome) => Progress::Done(outcome),
            _ => Progress::Pending,
        })
    }

    /// Spin on [`tick`](Self::tick) until the session ends.
    pub fn run(&mut self, hw: &mut (impl JoystickLines + AnalogSampler)) -> Result<TransferOutcome> {
        loop {
            if let Progress::Done(outcome) = self.tick(hw)? {
                return Ok(outcome);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn guard(lines: &mut impl JoystickLines, clock_asserted: bool) -> Result<Guard> {
        if !lines.attention_asserted()? {
            return Ok(Guard::Abort);
        }
        if lines.frame_clock_asserted()? == clock_asserted {
            Ok(Guard::Go)
        } else {
            Ok(Guard::Wait)
        }
    }

    fn hand_over(
        &mut self,
        lines: &mut impl JoystickLines,
        n: usize,
        step: &HandoverStep,
    ) -> Result<()> {
        lines.write_nibble(self.ctx.frame.nibble(step.slot))?;

        match step.data_ready {
            DataReadyRole::Announce => lines.release_data_ready()?,
            DataReadyRole::Capture(bit) => {
                let level = lines.data_ready_high()?;
                self.ctx.captured.set(bit, level);
            }
            DataReadyRole::Untouched => {}
        }

        self.ctx.nibbles_sent += 1;
        self.state = if n + 1 < NIBBLES_PER_SESSION {
            TransferState::Handover(n + 1)
        } else {
            TransferState::AwaitRelease
        };
        Ok(())
    }

    fn abandon(&mut self) {
        self.state = TransferState::Finished(TransferOutcome::Abandoned {
            nibbles_sent: self.ctx.nibbles_sent,
        });
    }
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new()
    }
}
