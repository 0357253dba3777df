//! One-shot hardware peripheral initialization.
//!
//! Configures the LM35 ADC channel and its calibration scheme, the GPIO
//! directions, and the cooling-fan LEDC timer/channel using raw ESP-IDF
//! sys calls. Called once from `main()` before the workers are spawned.
//!
//! The register helpers below (`adc1_read`, `gpio_write`, `ledc_set_duty`,
//! ...) each have exactly one calling worker, so no locking is needed.
//! On host targets they read/write simulation atomics instead.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::{ActuatorError, SensorError};

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

/// ADC counts → millivolts scheme selected at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationScheme {
    /// eFuse-backed curve fitting (ESP32-S3/C3/C6/H2).
    CurveFitting,
    /// eFuse-backed line fitting (ESP32/S2/C2).
    LineFitting,
    /// Host simulation: ideal 12-bit ADC over 0..3300 mV.
    Linear,
}

#[cfg(target_os = "espidf")]
use log::{info, warn};

#[cfg_attr(not(target_os = "espidf"), allow(unused_imports))]
use crate::pins;

/// Configure every peripheral and return the ADC calibration scheme that
/// could be set up (`None` = LM35 readings will be reported degraded).
#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<Option<CalibrationScheme>, HwInitError> {
    // SAFETY: Called once from main() before any worker is spawned.
    let scheme = unsafe {
        init_adc()?;
        let scheme = init_adc_calibration();
        init_gpio()?;
        init_ledc()?;
        scheme
    };
    info!("hw_init: all peripherals configured");
    Ok(scheme)
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<Option<CalibrationScheme>, HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(Some(CalibrationScheme::Linear))
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
static mut ADC1_CALI: adc_cali_handle_t = core::ptr::null_mut();

/// SAFETY: Written only by `init_adc()` before the workers start; read
/// only from the temperature worker afterwards.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn adc1_cali() -> adc_cali_handle_t {
    unsafe { ADC1_CALI }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), pins::LM35_ADC1_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=LM35, 12 dB)", pins::LM35_ADC1_CHANNEL);
    Ok(())
}

/// Try curve fitting first, then line fitting. A missing scheme is not
/// fatal; the temperature worker reports every reading as degraded.
#[cfg(target_os = "espidf")]
unsafe fn init_adc_calibration() -> Option<CalibrationScheme> {
    let scheme = if unsafe { try_curve_fitting() } {
        Some(CalibrationScheme::CurveFitting)
    } else if unsafe { try_line_fitting() } {
        Some(CalibrationScheme::LineFitting)
    } else {
        None
    };
    match scheme {
        Some(s) => info!("hw_init: ADC calibration scheme {:?}", s),
        None => warn!("hw_init: no ADC calibration scheme, LM35 readings unavailable"),
    }
    scheme
}

#[cfg(all(target_os = "espidf", any(esp32s3, esp32c3, esp32c6, esp32h2)))]
unsafe fn try_curve_fitting() -> bool {
    let cfg = adc_cali_curve_fitting_config_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        chan: pins::LM35_ADC1_CHANNEL,
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    // SAFETY: ADC1_CALI is only written during boot.
    (unsafe { adc_cali_create_scheme_curve_fitting(&cfg, &raw mut ADC1_CALI) }) == ESP_OK as i32
}

#[cfg(all(target_os = "espidf", not(any(esp32s3, esp32c3, esp32c6, esp32h2))))]
unsafe fn try_curve_fitting() -> bool {
    false
}

#[cfg(all(target_os = "espidf", any(esp32, esp32s2, esp32c2)))]
unsafe fn try_line_fitting() -> bool {
    let cfg = adc_cali_line_fitting_config_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
        ..Default::default()
    };
    // SAFETY: ADC1_CALI is only written during boot.
    (unsafe { adc_cali_create_scheme_line_fitting(&cfg, &raw mut ADC1_CALI) }) == ESP_OK as i32
}

#[cfg(all(target_os = "espidf", not(any(esp32, esp32s2, esp32c2))))]
unsafe fn try_line_fitting() -> bool {
    false
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, temperature worker only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Result<u16, SensorError> {
    Ok(sim::ADC_RAW.load(core::sync::atomic::Ordering::Relaxed))
}

/// Convert raw counts to millivolts with the boot-time scheme.
#[cfg(target_os = "espidf")]
pub fn adc1_raw_to_mv(raw: u16) -> Result<u32, SensorError> {
    // SAFETY: adc1_cali() contract, temperature worker only.
    let handle = unsafe { adc1_cali() };
    if handle.is_null() {
        return Err(SensorError::CalibrationUnavailable);
    }
    let mut mv: i32 = 0;
    let ret = unsafe { adc_cali_raw_to_voltage(handle, i32::from(raw), &mut mv) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(mv.max(0) as u32)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_raw_to_mv(raw: u16) -> Result<u32, SensorError> {
    const FULL_SCALE_MV: u32 = 3300;
    const ADC_MAX: u32 = 4095;
    Ok(u32::from(raw.min(ADC_MAX as u16)) * FULL_SCALE_MV / ADC_MAX)
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    let output_pins = [
        pins::ACTUATOR_GPIO,
        pins::PRESENCE_GPIO,
        pins::TRIGGER_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    let echo_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::ECHO_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&echo_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: GPIO configured (actuator, presence, trigger low; echo input)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: register read on an already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::gpio_level(pin)
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    // SAFETY: each output pin is written by exactly one worker.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 {
        return Err(ActuatorError::GpioWriteFailed);
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    sim::set_gpio_level(pin, high);
    Ok(())
}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_COOLING: u32 = 0;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: cooling fan (500 Hz, 13-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_13_BIT,
        freq_hz: pins::COOLING_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_COOLING,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        gpio_num: pins::COOLING_PWM_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    info!(
        "hw_init: LEDC configured (cooling=CH0 on GPIO{}, {} Hz, {}-bit)",
        pins::COOLING_PWM_GPIO,
        pins::COOLING_PWM_FREQ_HZ,
        pins::COOLING_PWM_RESOLUTION_BITS
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set_duty(channel: u32, duty: u32) -> Result<(), ActuatorError> {
    // SAFETY: channel configured in init_ledc(); only the cooling worker
    // writes it.
    unsafe {
        if esp_idf_svc::sys::ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty) != ESP_OK as i32 {
            return Err(ActuatorError::PwmWriteFailed);
        }
        if esp_idf_svc::sys::ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel) != ESP_OK as i32 {
            return Err(ActuatorError::PwmWriteFailed);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_duty(_channel: u32, duty: u32) -> Result<(), ActuatorError> {
    sim::LEDC_DUTY.store(duty, core::sync::atomic::Ordering::Relaxed);
    Ok(())
}

// ── Host simulation state ─────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicU16, AtomicU32, AtomicU64, Ordering};

    /// Raw LM35 counts returned by `adc1_read` (≈ 25 °C).
    pub(super) static ADC_RAW: AtomicU16 = AtomicU16::new(310);
    pub(super) static LEDC_DUTY: AtomicU32 = AtomicU32::new(0);
    static GPIO_LEVELS: AtomicU64 = AtomicU64::new(0);

    pub fn set_adc_raw(raw: u16) {
        ADC_RAW.store(raw, Ordering::Relaxed);
    }

    pub fn ledc_duty() -> u32 {
        LEDC_DUTY.load(Ordering::Relaxed)
    }

    pub fn gpio_level(pin: i32) -> bool {
        GPIO_LEVELS.load(Ordering::Relaxed) & (1u64 << pin) != 0
    }

    pub fn set_gpio_level(pin: i32, high: bool) {
        let bit = 1u64 << pin;
        if high {
            GPIO_LEVELS.fetch_or(bit, Ordering::Relaxed);
        } else {
            GPIO_LEVELS.fetch_and(!bit, Ordering::Relaxed);
        }
    }
}
