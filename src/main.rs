//! JoyKid Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Drivers (outer ring)                 │
//! │  JoystickPort      SettledAdc       LatchOutputs         │
//! │  (JoystickLines)   (AnalogSampler)  (OutputPort)         │
//! │                    LogEventSink (EventSink)              │
//! │  ──────────────── Port Trait Boundary ────────────────   │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ SessionController ─▶ TransferEngine (pure logic)   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The session loop busy-polls forever on the main task.  Build with
//! `CONFIG_ESP_TASK_WDT_CHECK_IDLE_TASK_CPU0` disabled so the idle-task
//! watchdog does not fire while it spins.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::Ets;
use log::{error, info};

use joykid::adapters::hardware::JoyKidHardware;
use joykid::adapters::log_sink::LogEventSink;
use joykid::app::service::SessionController;
use joykid::config::DeviceConfig;
use joykid::drivers::adc::SettledAdc;
use joykid::drivers::gpio::GpioPin;
use joykid::drivers::hw_init;
use joykid::drivers::joystick::JoystickPort;
use joykid::drivers::outputs::LatchOutputs;
use joykid::error::Error;
use joykid::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("JoyKid v{} — sensor kid for the joystick port", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (compile-time defaults, never persisted) ──
    let config = DeviceConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()
        .map_err(|e| {
            error!("hw_init: {}", e);
            Error::Init("peripheral init")
        })
        .context("bring-up")?;

    let lines = JoystickPort::new(
        GpioPin::new(pins::ATTENTION_GPIO),
        GpioPin::new(pins::FRAME_CLOCK_GPIO),
        GpioPin::new(pins::DATA_READY_GPIO),
        pins::DATA_BUS_GPIOS.map(GpioPin::new),
        &config,
    );
    let sampler = SettledAdc::new(Ets, &config);
    let outputs = LatchOutputs::new(
        GpioPin::new(pins::PORT0_GPIO),
        GpioPin::new(pins::PORT1_GPIO),
    )?;

    let mut hw = JoyKidHardware::new(lines, sampler, outputs);
    let mut sink = LogEventSink::new(&config);

    // ── 4. Session loop (never returns) ───────────────────────
    let mut controller = SessionController::new();
    controller.serve_forever(&mut hw, &mut sink)
}
