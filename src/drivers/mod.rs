//! Pin and ADC drivers, hardware initialisation.
//!
//! | Driver     | Implements      | Connects to                         |
//! |------------|-----------------|-------------------------------------|
//! | `joystick` | JoystickLines   | any `embedded-hal` digital pins     |
//! | `adc`      | AnalogSampler   | ADC1 oneshot + settle delay         |
//! | `outputs`  | OutputPort      | two push-pull output pins           |
//! | `gpio`     | embedded-hal    | raw ESP-IDF GPIO / host simulation  |

pub mod adc;
pub mod gpio;
pub mod hw_init;
pub mod joystick;
pub mod outputs;
