//! Hardware Abstraction Layer for uctrl-console.
//!
//! Commands talk to the board only through [`Hardware`].
//! Business logic stays in the console, HAL is just I/O.

pub mod si7021;
pub mod sim;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use si7021::{Si7021, SI7021_ADDR};
pub use sim::SimBoard;

/// Digital pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Numeric value as printed on the console
    pub fn as_u8(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Hardware error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HalError {
    /// Device did not answer or identified as something else
    #[error("device not detected")]
    NotDetected,
    /// Bus transfer failed
    #[error("bus error")]
    Bus,
    /// Measurement checksum mismatch
    #[error("checksum mismatch")]
    Checksum,
    /// Operation not available on this board
    #[error("not supported")]
    Unsupported,
}

/// Timed blink effect: `cycles` times high, wait, low, wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    pub pin: u8,
    pub cycles: u32,
    pub half_period_ms: u32,
}

impl Blink {
    /// Blink `pin` at `hz`, each on and off phase lasting `1000 / hz` ms
    /// (rounded). Returns `None` for 0 Hz.
    pub fn at_hz(pin: u8, hz: u16, cycles: u32) -> Option<Self> {
        if hz == 0 {
            return None;
        }
        let hz = hz as u32;
        Some(Self {
            pin,
            cycles,
            half_period_ms: (1000 + hz / 2) / hz,
        })
    }

    /// Total duration of the effect in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.cycles.saturating_mul(self.half_period_ms.saturating_mul(2))
    }
}

/// Board capabilities consumed by commands.
///
/// All calls are synchronous. Pin and channel numbers are the logical
/// numbers typed on the console; implementations map them to hardware.
pub trait Hardware {
    /// Configure a pin as digital output
    fn configure_output(&mut self, pin: u8);

    fn write_digital(&mut self, pin: u8, level: Level);

    fn read_digital(&mut self, pin: u8) -> Level;

    /// Set PWM duty cycle (0-255)
    fn write_analog(&mut self, channel: u8, duty: u8);

    fn read_analog(&mut self, channel: u8) -> u16;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Probe and initialize the environment sensor
    fn sensor_begin(&mut self) -> Result<(), HalError>;

    /// Temperature in degrees Celsius
    fn read_temperature(&mut self) -> Result<f32, HalError>;

    /// Relative humidity in percent
    fn read_humidity(&mut self) -> Result<f32, HalError>;

    /// Run a blink effect to completion.
    ///
    /// Blocks for [`Blink::duration_ms`]. Override to run it elsewhere.
    fn play(&mut self, effect: &Blink) {
        for _ in 0..effect.cycles {
            self.write_digital(effect.pin, Level::High);
            self.delay_ms(effect.half_period_ms);
            self.write_digital(effect.pin, Level::Low);
            self.delay_ms(effect.half_period_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blink_half_period() {
        assert_eq!(Blink::at_hz(13, 1, 10).unwrap().half_period_ms, 1000);
        assert_eq!(Blink::at_hz(13, 2, 10).unwrap().half_period_ms, 500);
        assert_eq!(Blink::at_hz(13, 3, 10).unwrap().half_period_ms, 333);
        assert_eq!(Blink::at_hz(13, 1000, 10).unwrap().half_period_ms, 1);
    }

    #[test]
    fn test_blink_zero_hz() {
        assert_eq!(Blink::at_hz(13, 0, 10), None);
    }

    #[test]
    fn test_blink_duration() {
        let blink = Blink::at_hz(13, 2, 10).unwrap();
        assert_eq!(blink.duration_ms(), 10_000);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::High), "1");
        assert_eq!(format!("{}", Level::Low), "0");
        assert_eq!(Level::from(true), Level::High);
    }
}
