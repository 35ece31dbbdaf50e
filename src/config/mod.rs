//! Module: config
//!
//! Purpose: Static board and console configuration.
//!
//! Architecture:
//! - BOARD: peripheral ranges and fixed pin assignments
//! - CONSOLE: front-end behaviour (echo, prompt, banner)
//! - Buffer sizes shared by the line buffer and the tokenizer
//!
//! Everything here is compile-time constant. Nothing is persisted.

use core::ops::RangeInclusive;

/// Maximum input line length in bytes
pub const LINE_SIZE: usize = 128;

/// Maximum number of tokens per line (command name included)
pub const MAX_ARGS: usize = 8;

/// Maximum token length in bytes
pub const ARG_SIZE: usize = 64;

/// Peripheral layout of the board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Digital pins reachable through `gpio`
    pub gpio_pins: RangeInclusive<u8>,
    /// PWM-capable channels reachable through `pwm`
    pub pwm_channels: RangeInclusive<u8>,
    /// Valid PWM duty cycle values
    pub pwm_duty: RangeInclusive<u8>,
    /// Onboard LED pin
    pub led_pin: u8,
    /// Number of on/off cycles performed by `led blink`
    pub blink_cycles: u32,
    /// Accepted blink frequencies in Hz
    pub blink_hz: RangeInclusive<u16>,
}

/// Console front-end settings.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    /// Echo typed characters back to the terminal
    pub echo: bool,
    /// Print a prompt after each completed line
    pub prompt: bool,
    /// Print the version banner at boot
    pub banner: bool,
}

impl ConsoleConfig {
    /// Interactive terminal: echo, prompt and banner on.
    pub const INTERACTIVE: Self = Self {
        echo: true,
        prompt: true,
        banner: true,
    };

    /// Machine-driven link: only command output is written, so a host
    /// reading one line after a request gets the reply and not an echo.
    pub const SCRIPTED: Self = Self {
        echo: false,
        prompt: false,
        banner: false,
    };
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        CONSOLE
    }
}

/// The board this firmware targets.
pub const BOARD: BoardConfig = BoardConfig {
    gpio_pins: 22..=53,
    pwm_channels: 2..=7,
    pwm_duty: 0..=255,
    led_pin: 13,
    blink_cycles: 10,
    blink_hz: 1..=1000,
};

/// Default console behaviour.
pub const CONSOLE: ConsoleConfig = ConsoleConfig::SCRIPTED;

/// Console pin number to chip GPIO number.
///
/// Console pins without an entry are not wired on the device.
#[derive(Debug, Clone, Copy)]
pub struct PinMap {
    entries: &'static [(u8, u8)],
}

impl PinMap {
    pub const fn new(entries: &'static [(u8, u8)]) -> Self {
        Self { entries }
    }

    /// GPIO wired to console pin `pin`
    pub fn gpio(&self, pin: u8) -> Option<u8> {
        self.entries
            .iter()
            .find(|(logical, _)| *logical == pin)
            .map(|(_, gpio)| *gpio)
    }

    /// `(console pin, gpio)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> {
        let entries: &'static [(u8, u8)] = self.entries;
        entries.iter().copied()
    }
}

/// ESP32-S3 GPIOs the console must never touch: strapping pins, the
/// sensor I2C bus, USB, the UART0 console and the flash/PSRAM bus.
pub const ESP32S3_RESERVED: &[u8] = &[
    0, 3, 8, 9, 19, 20, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 43, 44, 45, 46,
];

/// Wiring of the console pins on an ESP32-S3 board. Console gpio pins
/// 37-53 have no free GPIO left.
pub const ESP32S3_PINS: PinMap = PinMap::new(&[
    // led
    (13, 2),
    // pwm
    (2, 4),
    (3, 5),
    (4, 6),
    (5, 7),
    (6, 15),
    (7, 16),
    // gpio
    (22, 1),
    (23, 10),
    (24, 11),
    (25, 12),
    (26, 13),
    (27, 14),
    (28, 17),
    (29, 18),
    (30, 21),
    (31, 38),
    (32, 39),
    (33, 40),
    (34, 41),
    (35, 42),
    (36, 47),
    (37, 48),
]);

/// Log level on the device. Logs share UART0 with the console, so only
/// errors get through.
pub const DEVICE_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Error;
