//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the protocol against a
//! scripted MSX controller.  All tests run on the host (x86_64) with no
//! real hardware required.

mod hardware_tests;
mod session_tests;
