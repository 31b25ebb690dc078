//! Application core — protocol orchestration, zero direct I/O.
//!
//! This module contains the session rules for the JoyKid peripheral:
//! waiting for ATTENTION, running the transfer engine, committing or
//! discarding the output latch, and restoring the idle line state.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real pins.

pub mod events;
pub mod ports;
pub mod service;
