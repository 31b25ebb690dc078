//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing session events to the `log` facade
//! (ESP-IDF logger → UART / USB-CDC on the device).  Events arrive only
//! after a session's lines are released, so logging never stretches a
//! handover window.
//!
//! A controller may open the next session straight after the last one
//! ends and a UART line takes milliseconds, so per-session lines log at
//! `debug` (silent at the default `info` level).  Only faults log above
//! `info`.

use log::{debug, info, warn};

use crate::app::events::SessionEvent;
use crate::app::ports::EventSink;
use crate::config::DeviceConfig;

pub struct LogEventSink {
    log_frames: bool,
}

impl LogEventSink {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            log_frames: config.log_frames,
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Ready => {
                info!("READY | lines released, waiting for ATTENTION");
            }
            SessionEvent::Completed {
                session,
                frame,
                latch,
            } => {
                if self.log_frames {
                    debug!(
                        "SESSION #{} | light={:#04x} temp={:#04x} sound={:#04x} | port0={} port1={}",
                        session,
                        frame.light,
                        frame.temperature,
                        frame.sound,
                        u8::from(latch.port0),
                        u8::from(latch.port1),
                    );
                } else {
                    debug!("SESSION #{} | completed", session);
                }
            }
            SessionEvent::Abandoned {
                session,
                nibbles_sent,
            } => {
                debug!(
                    "SESSION #{} | abandoned after {} nibble(s), outputs unchanged",
                    session, nibbles_sent
                );
            }
            SessionEvent::Fault { session, error } => {
                warn!("SESSION #{} | fault: {}", session, error);
            }
        }
    }
}
