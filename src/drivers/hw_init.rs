//! One-shot hardware peripheral initialization and raw pin access.
//!
//! Configures ADC channels and GPIO directions using raw ESP-IDF sys calls.
//! Called once from `main()` before the session loop starts.
//!
//! On host/test builds every function falls back to an in-memory
//! simulation: GPIO levels live in one atomic bitfield (all lines read high
//! until something drives them, like the pull-ups on the real board) and
//! ADC results in per-channel atomics that tests inject.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors from raw peripheral access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwError {
    AdcInitFailed(i32),
    AdcReadFailed(i32),
    GpioConfigFailed(i32),
    GpioWriteFailed(i32),
}

impl core::fmt::Display for HwError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::AdcReadFailed(rc) => write!(f, "ADC1 read failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::GpioWriteFailed(rc) => write!(f, "GPIO write failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwError {}

impl embedded_hal::digital::Error for HwError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

pub const ADC1_CH_LIGHT: u32 = 0;
pub const ADC1_CH_TEMP: u32 = 1;
pub const ADC1_CH_SOUND: u32 = 2;

/// ADC1 channel wired to an analog pad (ESP32-S3: channel n is GPIO n+1).
pub const fn adc1_channel_for_gpio(gpio: i32) -> Option<u32> {
    match gpio {
        1..=10 => Some((gpio - 1) as u32),
        _ => None,
    }
}

/// Each sensor channel constant matches the pad it is wired to in `pins`.
const _: () = {
    assert!(matches!(adc1_channel_for_gpio(pins::LIGHT_ADC_GPIO), Some(ADC1_CH_LIGHT)));
    assert!(matches!(adc1_channel_for_gpio(pins::TEMP_ADC_GPIO), Some(ADC1_CH_TEMP)));
    assert!(matches!(adc1_channel_for_gpio(pins::SOUND_ADC_GPIO), Some(ADC1_CH_SOUND)));
};

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwError> {
    // SAFETY: Called once from main() before the session loop; single-threaded.
    unsafe {
        init_adc()?;
        init_joystick_inputs()?;
        init_joystick_open_drain()?;
        init_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// session loop.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_LIGHT, ADC1_CH_TEMP, ADC1_CH_SOUND] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwError::AdcInitFailed(ret)); }
    }

    info!(
        "hw_init: ADC1 configured (light=GPIO{}, temp=GPIO{}, sound=GPIO{})",
        pins::LIGHT_ADC_GPIO,
        pins::TEMP_ADC_GPIO,
        pins::SOUND_ADC_GPIO
    );
    Ok(())
}

/// Blocking 12-bit conversion on an ADC1 channel.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, HwError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract; single-threaded session-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(HwError::AdcReadFailed(ret));
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> Result<u16, HwError> {
    use core::sync::atomic::Ordering;
    sim::ADC
        .get(channel as usize)
        .map(|v| v.load(Ordering::Relaxed))
        .ok_or(HwError::AdcReadFailed(-1))
}

// ── GPIO: controller-driven inputs ────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_joystick_inputs() -> Result<(), HwError> {
    for &pin in &[pins::ATTENTION_GPIO, pins::FRAME_CLOCK_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: ATTENTION / FRAME_CLOCK inputs configured");
    Ok(())
}

// ── GPIO: peripheral-driven open-drain lines ─────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_joystick_open_drain() -> Result<(), HwError> {
    let mut od_pins = [pins::DATA_READY_GPIO; 5];
    od_pins[1..].copy_from_slice(&pins::DATA_BUS_GPIOS);

    for &pin in &od_pins {
        // Released before the driver is enabled, so the line never glitches low.
        unsafe { gpio_set_level(pin, 1) };
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: DATA_READY / DATA_BUS open-drain, released");
    Ok(())
}

// ── GPIO: output latch pins ───────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_outputs() -> Result<(), HwError> {
    for &pin in &[pins::PORT0_GPIO, pins::PORT1_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: PORT0 / PORT1 outputs configured (low)");
    Ok(())
}

// ── Raw level access ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on a pin
    // configured with input enabled; safe to call from the session loop.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim_level(pin)
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), HwError> {
    // SAFETY: gpio_set_level writes to a pin configured during init;
    // session-loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 {
        return Err(HwError::GpioWriteFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), HwError> {
    if !(0..64).contains(&pin) {
        return Err(HwError::GpioWriteFailed(-1));
    }
    sim_set_level(pin, high);
    Ok(())
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU16, AtomicU64};

    /// One bit per GPIO; set = high.  Everything starts pulled up.
    pub(super) static LEVELS: AtomicU64 = AtomicU64::new(u64::MAX);

    pub(super) static ADC: [AtomicU16; 10] = [const { AtomicU16::new(0) }; 10];
}

/// Force a simulated pin level (the "other side" of the wire in tests).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    let mask = 1u64 << (pin as u32 & 63);
    if high {
        sim::LEVELS.fetch_or(mask, Ordering::SeqCst);
    } else {
        sim::LEVELS.fetch_and(!mask, Ordering::SeqCst);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_level(pin: i32) -> bool {
    use core::sync::atomic::Ordering;
    sim::LEVELS.load(Ordering::SeqCst) & (1u64 << (pin as u32 & 63)) != 0
}

/// Inject the next raw conversion result for an ADC1 channel.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    use core::sync::atomic::Ordering;
    if let Some(slot) = sim::ADC.get(channel as usize) {
        slot.store(raw, Ordering::Relaxed);
    }
}
