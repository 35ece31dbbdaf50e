//! In-memory board for host builds.
//!
//! Pins hold whatever was last written, the ADC returns preset values,
//! and delays only advance a virtual clock.

use super::{HalError, Hardware, Level};

/// Number of addressable pins/channels
pub const SIM_PINS: usize = 64;

/// Simulated environment sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSensor {
    pub temperature: f32,
    pub humidity: f32,
}

/// Host-side board model
pub struct SimBoard {
    outputs: [bool; SIM_PINS],
    digital: [Level; SIM_PINS],
    duty: [u8; SIM_PINS],
    adc: [u16; SIM_PINS],
    sensor: Option<SimSensor>,
    sensor_ready: bool,
    elapsed_ms: u64,
}

impl SimBoard {
    /// Board with a sensor attached
    pub const fn new(sensor: Option<SimSensor>) -> Self {
        Self {
            outputs: [false; SIM_PINS],
            digital: [Level::Low; SIM_PINS],
            duty: [0; SIM_PINS],
            adc: [0; SIM_PINS],
            sensor,
            sensor_ready: false,
            elapsed_ms: 0,
        }
    }

    /// Preset the value returned by `read_analog`
    pub fn set_adc(&mut self, channel: u8, value: u16) {
        if let Some(slot) = self.adc.get_mut(channel as usize) {
            *slot = value;
        }
    }

    /// Drive an input pin from outside
    pub fn set_input(&mut self, pin: u8, level: Level) {
        if let Some(slot) = self.digital.get_mut(pin as usize) {
            *slot = level;
        }
    }

    /// Last PWM duty written to `channel`
    pub fn duty(&self, channel: u8) -> u8 {
        self.duty.get(channel as usize).copied().unwrap_or(0)
    }

    pub fn is_output(&self, pin: u8) -> bool {
        self.outputs.get(pin as usize).copied().unwrap_or(false)
    }

    /// Virtual time spent in `delay_ms`
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new(Some(SimSensor {
            temperature: 21.5,
            humidity: 45.0,
        }))
    }
}

impl Hardware for SimBoard {
    fn configure_output(&mut self, pin: u8) {
        if let Some(slot) = self.outputs.get_mut(pin as usize) {
            *slot = true;
        }
    }

    fn write_digital(&mut self, pin: u8, level: Level) {
        if let Some(slot) = self.digital.get_mut(pin as usize) {
            *slot = level;
        }
    }

    fn read_digital(&mut self, pin: u8) -> Level {
        self.digital.get(pin as usize).copied().unwrap_or(Level::Low)
    }

    fn write_analog(&mut self, channel: u8, duty: u8) {
        if let Some(slot) = self.duty.get_mut(channel as usize) {
            *slot = duty;
        }
    }

    fn read_analog(&mut self, channel: u8) -> u16 {
        self.adc.get(channel as usize).copied().unwrap_or(0)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += ms as u64;
    }

    fn sensor_begin(&mut self) -> Result<(), HalError> {
        self.sensor_ready = self.sensor.is_some();
        if self.sensor_ready {
            Ok(())
        } else {
            Err(HalError::NotDetected)
        }
    }

    fn read_temperature(&mut self) -> Result<f32, HalError> {
        match self.sensor {
            Some(s) if self.sensor_ready => Ok(s.temperature),
            _ => Err(HalError::NotDetected),
        }
    }

    fn read_humidity(&mut self) -> Result<f32, HalError> {
        match self.sensor {
            Some(s) if self.sensor_ready => Ok(s.humidity),
            _ => Err(HalError::NotDetected),
        }
    }
}
