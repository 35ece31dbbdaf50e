//! ESP-IDF board: GPIO driver, LEDC PWM and an I2C Si7021.
//!
//! Console pin numbers go through [`ESP32S3_PINS`]. Console pins with no
//! GPIO behind them are refused with [`HalError::Unsupported`] and logged;
//! nothing outside the map is ever touched.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::i2c::I2cDriver;
use esp_idf_svc::sys::{self, esp, EspError};

use super::{HalError, Hardware, Level, Si7021};
use crate::config::{PinMap, BOARD, ESP32S3_PINS};

/// PWM carrier frequency
pub const PWM_FREQ_HZ: u32 = 1000;

const LEDC_MODE: sys::ledc_mode_t = sys::ledc_mode_t_LEDC_LOW_SPEED_MODE;
const LEDC_TIMER: sys::ledc_timer_t = sys::ledc_timer_t_LEDC_TIMER_0;

/// Board backed by ESP-IDF drivers
pub struct EspBoard<'d> {
    sensor: Si7021<I2cDriver<'d>, FreeRtos>,
    pins: PinMap,
    /// Bit n set: LEDC channel for console channel n is attached
    pwm_attached: u32,
}

impl<'d> EspBoard<'d> {
    /// Set up the shared LEDC timer. The sensor is probed later, by
    /// `sensor_begin`.
    pub fn new(i2c: I2cDriver<'d>) -> Result<Self, EspError> {
        let timer = sys::ledc_timer_config_t {
            speed_mode: LEDC_MODE,
            duty_resolution: sys::ledc_timer_bit_t_LEDC_TIMER_8_BIT,
            timer_num: LEDC_TIMER,
            freq_hz: PWM_FREQ_HZ,
            clk_cfg: sys::soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        esp!(unsafe { sys::ledc_timer_config(&timer) })?;

        Ok(Self {
            sensor: Si7021::new(i2c, FreeRtos),
            pins: ESP32S3_PINS,
            pwm_attached: 0,
        })
    }

    /// LEDC channel serving console channel `channel`
    fn ledc_channel(channel: u8) -> Option<sys::ledc_channel_t> {
        BOARD
            .pwm_channels
            .contains(&channel)
            .then(|| (channel - BOARD.pwm_channels.start()) as sys::ledc_channel_t)
    }

    /// GPIO behind console pin `pin`
    fn gpio(&self, pin: u8) -> Result<sys::gpio_num_t, HalError> {
        self.pins
            .gpio(pin)
            .map(|gpio| gpio as sys::gpio_num_t)
            .ok_or(HalError::Unsupported)
    }

    fn attach_pwm(
        &mut self,
        channel: u8,
        gpio: sys::gpio_num_t,
        ledc: sys::ledc_channel_t,
    ) -> Result<(), EspError> {
        if self.pwm_attached & (1 << channel) != 0 {
            return Ok(());
        }

        let config = sys::ledc_channel_config_t {
            gpio_num: gpio,
            speed_mode: LEDC_MODE,
            channel: ledc,
            intr_type: sys::ledc_intr_type_t_LEDC_INTR_DISABLE,
            timer_sel: LEDC_TIMER,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        esp!(unsafe { sys::ledc_channel_config(&config) })?;
        self.pwm_attached |= 1 << channel;
        Ok(())
    }
}

fn check(op: &str, pin: u8, result: Result<(), EspError>) {
    if let Err(e) = result {
        log::warn!("{} on pin {} failed: {}", op, pin, e);
    }
}

fn unmapped(op: &str, pin: u8, e: HalError) {
    log::warn!("{} on pin {}: {}", op, pin, e);
}

impl Hardware for EspBoard<'_> {
    fn configure_output(&mut self, pin: u8) {
        let gpio = match self.gpio(pin) {
            Ok(gpio) => gpio,
            Err(e) => return unmapped("configure", pin, e),
        };
        check("reset", pin, esp!(unsafe { sys::gpio_reset_pin(gpio) }));
        // Input stays enabled so the level can be read back
        check(
            "set direction",
            pin,
            esp!(unsafe { sys::gpio_set_direction(gpio, sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT) }),
        );
    }

    fn write_digital(&mut self, pin: u8, level: Level) {
        let gpio = match self.gpio(pin) {
            Ok(gpio) => gpio,
            Err(e) => return unmapped("write", pin, e),
        };
        check(
            "write",
            pin,
            esp!(unsafe { sys::gpio_set_level(gpio, level.as_u8() as u32) }),
        );
    }

    fn read_digital(&mut self, pin: u8) -> Level {
        match self.gpio(pin) {
            Ok(gpio) => Level::from(unsafe { sys::gpio_get_level(gpio) } != 0),
            Err(e) => {
                unmapped("read", pin, e);
                Level::Low
            }
        }
    }

    fn write_analog(&mut self, channel: u8, duty: u8) {
        let Some(ledc) = Self::ledc_channel(channel) else {
            return unmapped("pwm write", channel, HalError::Unsupported);
        };
        let gpio = match self.gpio(channel) {
            Ok(gpio) => gpio,
            Err(e) => return unmapped("pwm write", channel, e),
        };
        let result = self.attach_pwm(channel, gpio, ledc).and_then(|()| {
            esp!(unsafe { sys::ledc_set_duty(LEDC_MODE, ledc, duty as u32) })?;
            esp!(unsafe { sys::ledc_update_duty(LEDC_MODE, ledc) })
        });
        check("pwm write", channel, result);
    }

    /// No ADC on these pins: reads back the applied duty instead.
    fn read_analog(&mut self, channel: u8) -> u16 {
        match Self::ledc_channel(channel) {
            Some(ledc) if self.pwm_attached & (1 << channel) != 0 => {
                unsafe { sys::ledc_get_duty(LEDC_MODE, ledc) as u16 }
            }
            _ => 0,
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }

    fn sensor_begin(&mut self) -> Result<(), HalError> {
        self.sensor.begin()?;
        match self.sensor.model() {
            Ok(model) => log::info!("sensor: {:?}", model),
            Err(e) => log::warn!("sensor id unreadable: {}", e),
        }
        Ok(())
    }

    fn read_temperature(&mut self) -> Result<f32, HalError> {
        self.sensor.temperature()
    }

    fn read_humidity(&mut self) -> Result<f32, HalError> {
        self.sensor.humidity()
    }
}
