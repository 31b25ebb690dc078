//! Fuzz target: `TransferEngine::tick`
//!
//! Each input byte is one poll of the controller-driven lines
//! (bit 0 = ATTENTION, bit 1 = FRAME_CLOCK, bit 2 = controller pulls
//! DATA_READY low).  When the input runs out ATTENTION drops, so every
//! run terminates.  Checks that the engine never sends more than six
//! nibbles, never repeats or skips one, and only completes after all six.
//!
//! cargo fuzz run fuzz_transfer_engine

#![no_main]

use joykid::app::ports::{AnalogSampler, JoystickLines};
use joykid::error::Result;
use joykid::fsm::{Progress, TransferEngine, TransferOutcome};
use joykid::protocol::{NIBBLES_PER_SESSION, SensorChannel, SensorFrame};
use libfuzzer_sys::fuzz_target;

const FRAME: SensorFrame = SensorFrame::new(0xA5, 0x3C, 0x96);

struct Replay<'a> {
    polls: core::slice::Iter<'a, u8>,
    levels: u8,
    ready_dropped: bool,
    writes: Vec<u8>,
}

impl JoystickLines for Replay<'_> {
    fn attention_asserted(&mut self) -> Result<bool> {
        self.levels = self.polls.next().copied().unwrap_or(0);
        Ok(self.levels & 0b001 != 0)
    }
    fn frame_clock_asserted(&mut self) -> Result<bool> {
        Ok(self.levels & 0b010 != 0)
    }
    fn drop_data_ready(&mut self) -> Result<()> {
        self.ready_dropped = true;
        Ok(())
    }
    fn release_data_ready(&mut self) -> Result<()> {
        self.ready_dropped = false;
        Ok(())
    }
    fn data_ready_high(&mut self) -> Result<bool> {
        Ok(!self.ready_dropped && self.levels & 0b100 == 0)
    }
    fn write_nibble(&mut self, nibble: u8) -> Result<()> {
        self.writes.push(nibble);
        Ok(())
    }
    fn release_data_bus(&mut self) -> Result<()> {
        Ok(())
    }
}

impl AnalogSampler for Replay<'_> {
    fn sample(&mut self, channel: SensorChannel) -> Result<u8> {
        Ok(FRAME.reading(channel))
    }
}

fuzz_target!(|data: &[u8]| {
    let mut lines = Replay {
        polls: data.iter(),
        levels: 0,
        ready_dropped: false,
        writes: Vec::new(),
    };
    let mut engine = TransferEngine::new();

    let outcome = loop {
        match engine.tick(&mut lines) {
            Ok(Progress::Done(outcome)) => break outcome,
            Ok(Progress::Pending) => {}
            Err(e) => panic!("replay lines never fail: {e}"),
        }
        assert!(engine.ticks() <= data.len() as u64 + 2, "engine must stop once ATTENTION drops");
    };

    let sent = usize::from(engine.nibbles_sent());
    assert!(sent <= NIBBLES_PER_SESSION);
    assert_eq!(lines.writes.len(), sent, "one bus write per nibble");
    assert_eq!(&lines.writes[..], &FRAME.nibbles()[..sent]);

    match outcome {
        TransferOutcome::Completed { frame, .. } => {
            assert_eq!(sent, NIBBLES_PER_SESSION);
            assert_eq!(frame, FRAME);
        }
        TransferOutcome::Abandoned { nibbles_sent } => {
            assert_eq!(usize::from(nibbles_sent), sent);
        }
    }
});
