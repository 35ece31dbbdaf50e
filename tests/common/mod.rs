//! Shared test doubles: a board that records every call and an output
//! buffer.

#![allow(dead_code)]

use uctrl_console::hal::HalError;
use uctrl_console::{Hardware, Level};

/// One call made on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    ConfigureOutput(u8),
    WriteDigital(u8, Level),
    ReadDigital(u8),
    WriteAnalog(u8, u8),
    ReadAnalog(u8),
    Delay(u32),
    SensorBegin,
    ReadTemperature,
    ReadHumidity,
}

/// Board double: answers from preset values, logs every call
pub struct RecordingBoard {
    pub events: Vec<Event>,
    pub levels: [Level; 64],
    pub adc: [u16; 64],
    pub sensor: Option<(f32, f32)>,
    sensor_ready: bool,
}

impl RecordingBoard {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            levels: [Level::Low; 64],
            adc: [0; 64],
            sensor: Some((23.25, 41.5)),
            sensor_ready: false,
        }
    }

    pub fn without_sensor() -> Self {
        Self {
            sensor: None,
            ..Self::new()
        }
    }

    pub fn writes(&self) -> Vec<Event> {
        self.events
            .iter()
            .copied()
            .filter(|e| matches!(e, Event::WriteDigital(..) | Event::WriteAnalog(..)))
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Hardware for RecordingBoard {
    fn configure_output(&mut self, pin: u8) {
        self.events.push(Event::ConfigureOutput(pin));
    }

    fn write_digital(&mut self, pin: u8, level: Level) {
        self.events.push(Event::WriteDigital(pin, level));
        self.levels[pin as usize] = level;
    }

    fn read_digital(&mut self, pin: u8) -> Level {
        self.events.push(Event::ReadDigital(pin));
        self.levels[pin as usize]
    }

    fn write_analog(&mut self, channel: u8, duty: u8) {
        self.events.push(Event::WriteAnalog(channel, duty));
    }

    fn read_analog(&mut self, channel: u8) -> u16 {
        self.events.push(Event::ReadAnalog(channel));
        self.adc[channel as usize]
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::Delay(ms));
    }

    fn sensor_begin(&mut self) -> Result<(), HalError> {
        self.events.push(Event::SensorBegin);
        self.sensor_ready = self.sensor.is_some();
        self.sensor.map(|_| ()).ok_or(HalError::NotDetected)
    }

    fn read_temperature(&mut self) -> Result<f32, HalError> {
        self.events.push(Event::ReadTemperature);
        match self.sensor {
            Some((t, _)) if self.sensor_ready => Ok(t),
            _ => Err(HalError::NotDetected),
        }
    }

    fn read_humidity(&mut self) -> Result<f32, HalError> {
        self.events.push(Event::ReadHumidity);
        match self.sensor {
            Some((_, rh)) if self.sensor_ready => Ok(rh),
            _ => Err(HalError::NotDetected),
        }
    }
}

/// Test output buffer
#[derive(Default)]
pub struct TestOutput {
    pub text: String,
}

impl TestOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, s: &str) -> bool {
        self.text.contains(s)
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}
