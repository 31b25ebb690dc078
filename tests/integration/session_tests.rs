//! End-to-end session tests: `SessionController` against the scripted
//! MSX controller.

use joykid::app::events::SessionEvent;
use joykid::app::ports::OutputPort;
use joykid::app::service::{SessionController, SessionOutcome};
use joykid::diagnostics::RecordKind;
use joykid::error::Error;
use joykid::protocol::{DATA_BUS_IDLE, LineId, OutputLatch, SensorChannel, SensorFrame};

use crate::mock_hw::{MsxController, Op, RecordingSink, Script};

const FRAME: SensorFrame = SensorFrame::new(0x3C, 0x0F, 0xFF);

fn serve_one(
    msx: &mut MsxController,
    ctl: &mut SessionController,
    sink: &mut RecordingSink,
) -> SessionOutcome {
    ctl.await_session_start(msx).unwrap();
    ctl.run_session(msx, sink)
}

fn assert_idle(msx: &MsxController) {
    assert_eq!(msx.bus(), DATA_BUS_IDLE, "DATA_BUS must float after a session");
    assert!(msx.ready_level(), "DATA_READY must be released after a session");
}

// ── Completed sessions ────────────────────────────────────────

#[test]
fn full_session_hands_over_six_nibbles_and_commits() {
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, true, false));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    let outcome = serve_one(&mut msx, &mut ctl, &mut sink);

    let latch = OutputLatch::new(true, false);
    assert_eq!(
        outcome,
        SessionOutcome::Completed {
            frame: FRAME,
            latch
        }
    );
    assert_eq!(msx.writes(), vec![0xC, 0x3, 0xF, 0x0, 0xF, 0xF]);
    assert_eq!(msx.latch(), latch);
    assert_idle(&msx);
    assert_eq!(
        sink.events,
        vec![SessionEvent::Completed {
            session: 1,
            frame: FRAME,
            latch
        }]
    );
}

#[test]
fn wire_order_of_a_completed_session() {
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, false, true));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    serve_one(&mut msx, &mut ctl, &mut sink);

    assert_eq!(
        msx.ops,
        vec![
            Op::Sample(SensorChannel::Light),
            Op::Sample(SensorChannel::Temperature),
            Op::Sample(SensorChannel::Sound),
            Op::DropReady,
            Op::Write(0xC),
            Op::ReleaseReady,
            Op::Write(0x3),
            Op::Write(0xF),
            Op::Write(0x0),
            Op::Write(0xF),
            Op::Write(0xF),
            Op::Commit(OutputLatch::new(false, true)),
            Op::ReleaseReady,
            Op::ReleaseBus,
        ]
    );
}

#[test]
fn each_latch_window_is_independent() {
    for (port0, port1) in [(false, false), (false, true), (true, false), (true, true)] {
        let mut msx = MsxController::new();
        msx.queue(Script::new(FRAME, port0, port1));
        let mut ctl = SessionController::new();
        let mut sink = RecordingSink::default();

        serve_one(&mut msx, &mut ctl, &mut sink);
        assert_eq!(msx.latch(), OutputLatch::new(port0, port1));
    }
}

// ── Abandoned sessions ────────────────────────────────────────

#[test]
fn abort_after_third_nibble_leaves_outputs_unchanged() {
    let before = OutputLatch::new(false, true);
    let mut msx = MsxController::new().with_outputs(before);
    msx.queue(Script::new(FRAME, true, false).abort_after(3));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    let outcome = serve_one(&mut msx, &mut ctl, &mut sink);

    assert_eq!(outcome, SessionOutcome::Abandoned { nibbles_sent: 3 });
    assert_eq!(msx.writes(), vec![0xC, 0x3, 0xF]);
    assert_eq!(msx.commits(), 0);
    assert_eq!(msx.latch(), before);
    assert_idle(&msx);
}

#[test]
fn abort_before_start_of_frame_writes_nothing() {
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, true, true).abort_after(0));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    let outcome = serve_one(&mut msx, &mut ctl, &mut sink);

    assert_eq!(outcome, SessionOutcome::Abandoned { nibbles_sent: 0 });
    assert!(msx.writes().is_empty());
    assert_eq!(msx.samples(), 3);
    assert_idle(&msx);
}

#[test]
fn abort_after_last_nibble_still_commits() {
    // Six nibbles out and ATTENTION released: that is the normal end.
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, true, true).abort_after(6));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    let outcome = serve_one(&mut msx, &mut ctl, &mut sink);
    assert!(matches!(outcome, SessionOutcome::Completed { .. }));
    assert_eq!(msx.commits(), 1);
}

// ── Back-to-back sessions ─────────────────────────────────────

#[test]
fn every_session_samples_afresh() {
    let second = SensorFrame::new(0x81, 0x7E, 0x00);
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, true, false))
        .queue(Script::new(second, false, true).idle_polls(40));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    let first = serve_one(&mut msx, &mut ctl, &mut sink);
    assert_idle(&msx);
    let next = serve_one(&mut msx, &mut ctl, &mut sink);
    assert_idle(&msx);

    assert!(matches!(first, SessionOutcome::Completed { frame, .. } if frame == FRAME));
    assert!(matches!(next, SessionOutcome::Completed { frame, .. } if frame == second));
    assert_eq!(msx.samples(), 6);
    assert_eq!(
        msx.writes(),
        vec![0xC, 0x3, 0xF, 0x0, 0xF, 0xF, 0x1, 0x8, 0xE, 0x7, 0x0, 0x0]
    );
    assert_eq!(msx.latch(), OutputLatch::new(false, true));
    assert_eq!(ctl.sessions(), 2);
}

#[test]
fn sampling_precedes_every_write() {
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, true, true))
        .queue(Script::new(FRAME, false, false).abort_after(2))
        .queue(Script::new(FRAME, true, false));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();
    for _ in 0..3 {
        serve_one(&mut msx, &mut ctl, &mut sink);
    }

    // Within each session the three samples come before the first write.
    for session in msx.ops.split(|op| *op == Op::ReleaseBus) {
        if session.is_empty() {
            continue;
        }
        let last_sample = session.iter().rposition(|op| matches!(op, Op::Sample(_)));
        let first_write = session.iter().position(|op| matches!(op, Op::Write(_)));
        assert_eq!(last_sample, Some(2));
        if let Some(w) = first_write {
            assert!(w > 2);
        }
    }
}

#[test]
fn stats_follow_session_outcomes() {
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, true, false))
        .queue(Script::new(FRAME, false, false).abort_after(4))
        .queue(Script::new(FRAME, false, true));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();
    for _ in 0..3 {
        serve_one(&mut msx, &mut ctl, &mut sink);
    }

    let stats = ctl.stats();
    assert_eq!(stats.completed(), 2);
    assert_eq!(stats.abandoned(), 1);
    assert_eq!(stats.faulted(), 0);
    let kinds: Vec<_> = stats.recent().map(|r| (r.session, r.kind, r.nibbles_sent)).collect();
    assert_eq!(
        kinds,
        vec![
            (1, RecordKind::Completed, 6),
            (2, RecordKind::Abandoned, 4),
            (3, RecordKind::Completed, 6),
        ]
    );
    assert_eq!(sink.events.len(), 3);
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn fault_mid_frame_waits_for_attention_release() {
    let second = SensorFrame::new(0x81, 0x7E, 0x00);
    let before = OutputLatch::new(true, true);
    let mut msx = MsxController::new().with_outputs(before);
    msx.queue(Script::new(FRAME, true, false).clock_fault_after(2))
        .queue(Script::new(second, false, true));
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    let outcome = serve_one(&mut msx, &mut ctl, &mut sink);
    assert_eq!(
        outcome,
        SessionOutcome::Fault {
            error: Error::Gpio(LineId::FrameClock),
            nibbles_sent: 2
        }
    );
    assert!(msx.attention(), "controller is still inside its frame");
    assert_eq!(msx.latch(), before);
    assert_idle(&msx);

    let next = serve_one(&mut msx, &mut ctl, &mut sink);
    assert!(matches!(next, SessionOutcome::Completed { frame, .. } if frame == second));

    // Nothing goes on the bus between the fault and the controller
    // releasing ATTENTION.
    let gave_up = msx.ops.iter().position(|op| *op == Op::GaveUp).unwrap();
    let after_fault = msx.ops.iter().rposition(|op| *op == Op::Write(0x3)).unwrap();
    assert!(
        msx.ops[after_fault + 1..gave_up]
            .iter()
            .all(|op| !matches!(op, Op::Write(_) | Op::Sample(_) | Op::DropReady))
    );
    assert_eq!(
        msx.writes(),
        vec![0xC, 0x3, 0x1, 0x8, 0xE, 0x7, 0x0, 0x0]
    );
    assert_eq!(msx.latch(), OutputLatch::new(false, true));
    assert!(!ctl.resyncing());
}

// ── Power-on ──────────────────────────────────────────────────

#[test]
fn power_on_waits_out_a_session_in_progress() {
    let mut msx = MsxController::mid_session(12);
    let mut ctl = SessionController::new();
    let mut sink = RecordingSink::default();

    ctl.sync_to_idle(&mut msx, &mut sink).unwrap();
    assert!(!msx.attention());
    assert_idle(&msx);
    assert!(msx.writes().is_empty(), "must not join a transfer midway");
    assert_eq!(sink.events, vec![SessionEvent::Ready]);

    msx.queue(Script::new(FRAME, true, true));
    let outcome = serve_one(&mut msx, &mut ctl, &mut sink);
    assert!(matches!(outcome, SessionOutcome::Completed { .. }));
    assert_eq!(msx.writes(), vec![0xC, 0x3, 0xF, 0x0, 0xF, 0xF]);
}

#[test]
fn idle_polls_leave_the_lines_alone() {
    let mut msx = MsxController::new();
    msx.queue(Script::new(FRAME, false, false).idle_polls(100));
    let mut ctl = SessionController::new();

    ctl.await_session_start(&mut msx).unwrap();
    assert!(msx.attention());
    assert!(msx.ops.is_empty());
}
