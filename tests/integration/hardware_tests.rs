//! The bundled hardware adapter on simulated pins: the controller mock
//! drives the joystick lines while the ADC and output latch run through
//! the real drivers.

use embedded_hal::delay::DelayNs;
use joykid::adapters::hardware::JoyKidHardware;
use joykid::adapters::log_sink::LogEventSink;
use joykid::app::ports::OutputPort;
use joykid::app::service::{SessionController, SessionOutcome};
use joykid::config::DeviceConfig;
use joykid::drivers::adc::SettledAdc;
use joykid::drivers::gpio::GpioPin;
use joykid::drivers::hw_init::{self, sim_level, sim_set_adc};
use joykid::drivers::outputs::LatchOutputs;
use joykid::protocol::{OutputLatch, SensorFrame};

use crate::mock_hw::{MsxController, Script};

const PORT0: i32 = 60;
const PORT1: i32 = 61;

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[test]
fn adc_readings_reach_the_bus_and_latch_reaches_the_pins() {
    let config = DeviceConfig::default();
    sim_set_adc(hw_init::ADC1_CH_LIGHT, 0x3C0);
    sim_set_adc(hw_init::ADC1_CH_TEMP, 0x0F7);
    sim_set_adc(hw_init::ADC1_CH_SOUND, 0xFFF);

    let outputs = LatchOutputs::new(GpioPin::new(PORT0), GpioPin::new(PORT1)).unwrap();
    assert!(!sim_level(PORT0) && !sim_level(PORT1), "outputs start low");

    let mut msx = MsxController::new();
    // Frame in the script is ignored: the real ADC driver samples.
    msx.queue(Script::new(SensorFrame::default(), true, false));
    let mut hw = JoyKidHardware::new(msx, SettledAdc::new(NoDelay, &config), outputs);
    let mut sink = LogEventSink::new(&config);
    let mut ctl = SessionController::new();

    ctl.await_session_start(&mut hw).unwrap();
    let outcome = ctl.run_session(&mut hw, &mut sink);

    assert_eq!(
        outcome,
        SessionOutcome::Completed {
            frame: SensorFrame::new(0x3C, 0x0F, 0xFF),
            latch: OutputLatch::new(true, false),
        }
    );
    assert_eq!(hw.lines().writes(), vec![0xC, 0x3, 0xF, 0x0, 0xF, 0xF]);
    assert!(sim_level(PORT0));
    assert!(!sim_level(PORT1));
    assert_eq!(hw.latch(), OutputLatch::new(true, false));
}
