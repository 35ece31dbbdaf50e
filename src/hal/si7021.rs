//! Si7021 humidity/temperature sensor driver
//!
//! I2C control, no-hold-master measurements.
//! Reference: Si7021-A20 datasheet

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::HalError;

/// Si7021 I2C address (fixed)
pub const SI7021_ADDR: u8 = 0x40;

/// Si7021 command codes
#[allow(dead_code)]
mod cmds {
    pub const MEASURE_RH_HOLD: u8 = 0xE5;
    pub const MEASURE_RH_NOHOLD: u8 = 0xF5;
    pub const MEASURE_TEMP_HOLD: u8 = 0xE3;
    pub const MEASURE_TEMP_NOHOLD: u8 = 0xF3;
    pub const READ_PREV_TEMP: u8 = 0xE0;
    pub const RESET: u8 = 0xFE;
    pub const WRITE_USER_REG: u8 = 0xE6;
    pub const READ_USER_REG: u8 = 0xE7;
    pub const ID1: [u8; 2] = [0xFA, 0x0F];
    pub const ID2: [u8; 2] = [0xFC, 0xC9];
}

/// User register 1 value after reset
const USER_REG_RESET: u8 = 0x3A;

/// Settle time after soft reset
const RESET_DELAY_MS: u32 = 50;

/// Worst-case conversion time (12-bit RH + 14-bit temperature)
const CONVERSION_DELAY_MS: u32 = 25;

/// Device variant, from the electronic serial number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Si7013,
    Si7020,
    Si7021,
    Htu21d,
    Unknown(u8),
}

impl Model {
    fn from_snb3(id: u8) -> Self {
        match id {
            0x0D => Model::Si7013,
            0x14 => Model::Si7020,
            0x15 => Model::Si7021,
            0x32 => Model::Htu21d,
            other => Model::Unknown(other),
        }
    }
}

/// Si7021 driver
///
/// Owns the bus handle and a delay source for conversion waits.
pub struct Si7021<I2C, D> {
    i2c: I2C,
    delay: D,
    present: bool,
}

impl<I2C: I2c, D: DelayNs> Si7021<I2C, D> {
    /// Create driver (no bus traffic)
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            present: false,
        }
    }

    /// Reset the sensor and check it answers with the reset register value.
    pub fn begin(&mut self) -> Result<(), HalError> {
        self.present = false;

        self.i2c
            .write(SI7021_ADDR, &[cmds::RESET])
            .map_err(|_| HalError::NotDetected)?;
        self.delay.delay_ms(RESET_DELAY_MS);

        let reg = self
            .read_register(cmds::READ_USER_REG)
            .map_err(|_| HalError::NotDetected)?;
        if reg != USER_REG_RESET {
            return Err(HalError::NotDetected);
        }

        self.present = true;
        Ok(())
    }

    /// Whether the last [`begin`](Self::begin) succeeded
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Relative humidity in percent, clamped to 0-100
    pub fn humidity(&mut self) -> Result<f32, HalError> {
        let raw = self.measure(cmds::MEASURE_RH_NOHOLD)?;
        let rh = (125.0 * raw as f32) / 65536.0 - 6.0;
        Ok(rh.clamp(0.0, 100.0))
    }

    /// Temperature in degrees Celsius
    pub fn temperature(&mut self) -> Result<f32, HalError> {
        let raw = self.measure(cmds::MEASURE_TEMP_NOHOLD)?;
        Ok((175.72 * raw as f32) / 65536.0 - 46.85)
    }

    /// Read the 64-bit electronic serial number
    pub fn serial_number(&mut self) -> Result<u64, HalError> {
        let mut a = [0u8; 8];
        self.i2c
            .write_read(SI7021_ADDR, &cmds::ID1, &mut a)
            .map_err(|_| HalError::Bus)?;

        let mut b = [0u8; 6];
        self.i2c
            .write_read(SI7021_ADDR, &cmds::ID2, &mut b)
            .map_err(|_| HalError::Bus)?;

        // SNA bytes sit at even offsets, each followed by its CRC
        let sna = u32::from_be_bytes([a[0], a[2], a[4], a[6]]);
        let snb = u32::from_be_bytes([b[0], b[1], b[3], b[4]]);

        Ok(((sna as u64) << 32) | snb as u64)
    }

    /// Identify the device variant
    pub fn model(&mut self) -> Result<Model, HalError> {
        let serial = self.serial_number()?;
        Ok(Model::from_snb3((serial >> 24) as u8))
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, HalError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(SI7021_ADDR, &[reg], &mut buf)
            .map_err(|_| HalError::Bus)?;
        Ok(buf[0])
    }

    fn measure(&mut self, cmd: u8) -> Result<u16, HalError> {
        if !self.present {
            return Err(HalError::NotDetected);
        }

        self.i2c
            .write(SI7021_ADDR, &[cmd])
            .map_err(|_| HalError::Bus)?;
        self.delay.delay_ms(CONVERSION_DELAY_MS);

        let mut buf = [0u8; 3];
        self.i2c
            .read(SI7021_ADDR, &mut buf)
            .map_err(|_| HalError::Bus)?;

        if crc8(&buf[..2]) != buf[2] {
            return Err(HalError::Checksum);
        }

        Ok(u16::from_be_bytes([buf[0], buf[1]]))
    }
}

/// CRC-8, polynomial x^8 + x^5 + x^4 + 1, init 0x00
fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}
