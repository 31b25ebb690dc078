//! Adapters — compose drivers behind the port traits the core consumes.
//!
//! | Adapter    | Implements                               | Connects to          |
//! |------------|------------------------------------------|----------------------|
//! | `hardware` | JoystickLines, AnalogSampler, OutputPort | joystick, ADC, latch |
//! | `log_sink` | EventSink                                | `log` facade         |

pub mod hardware;
pub mod log_sink;
