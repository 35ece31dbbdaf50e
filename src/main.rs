//! uctrl - serial command console
//!
//! On the device: reads UART0, drives the board through ESP-IDF.
//! On a host: reads stdin, drives an in-memory board.
//!
//! Both run the same loop: boot the console, feed it bytes until a
//! command returns `Flow::Exit`.

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> std::io::Result<()> {
    host::run()
}

#[cfg(target_os = "espidf")]
mod firmware {
    use core::fmt;

    use esp_idf_svc::hal::delay::BLOCK;
    use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::{self, esp, EspError};

    use uctrl_console::config::DEVICE_LOG_LEVEL;
    use uctrl_console::hal::esp::EspBoard;
    use uctrl_console::{Console, Flow, CONSOLE, REGISTRY};

    const CONSOLE_UART: sys::uart_port_t = 0;
    const UART_RX_BUFFER: i32 = 256;
    const I2C_BAUDRATE: Hertz = Hertz(100_000);

    /// Console output on UART0
    struct UartOut;

    impl fmt::Write for UartOut {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let written =
                unsafe { sys::uart_write_bytes(CONSOLE_UART, s.as_ptr().cast(), s.len()) };
            if written < 0 {
                Err(fmt::Error)
            } else {
                Ok(())
            }
        }
    }

    pub fn run() -> Result<(), EspError> {
        // Initialize ESP-IDF
        sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        // UART0 carries the console too
        log::set_max_level(DEVICE_LOG_LEVEL);

        let peripherals = Peripherals::take()?;
        let i2c = I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio8, // SDA
            peripherals.pins.gpio9, // SCL
            &I2cConfig::new().baudrate(I2C_BAUDRATE),
        )?;
        let mut board = EspBoard::new(i2c)?;

        esp!(unsafe {
            sys::uart_driver_install(
                CONSOLE_UART,
                UART_RX_BUFFER,
                0,
                0,
                core::ptr::null_mut(),
                0,
            )
        })?;

        let mut out = UartOut;
        let mut console = Console::new(&REGISTRY, CONSOLE);
        let failed = console.boot(&mut board, &mut out);
        if failed > 0 {
            log::warn!("{} command(s) failed to initialize", failed);
        }

        let mut byte = [0u8; 1];
        loop {
            let n = unsafe {
                sys::uart_read_bytes(CONSOLE_UART, byte.as_mut_ptr().cast(), 1, BLOCK)
            };
            if n <= 0 {
                continue;
            }
            if let Some(Ok(Flow::Exit)) = console.process_byte(byte[0], &mut board, &mut out) {
                break;
            }
        }

        log::info!("console exited, reset to restart");
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::fmt;
    use std::io::{self, BufWriter, IsTerminal, Read, Write};
    use std::thread;
    use std::time::Duration;

    use uctrl_console::config::ConsoleConfig;
    use uctrl_console::hal::HalError;
    use uctrl_console::{Console, Flow, Hardware, Level, SimBoard, REGISTRY};

    /// Simulated board whose delays take real time
    struct HostBoard(SimBoard);

    impl Hardware for HostBoard {
        fn configure_output(&mut self, pin: u8) {
            self.0.configure_output(pin)
        }

        fn write_digital(&mut self, pin: u8, level: Level) {
            log::trace!("pin {} <- {}", pin, level);
            self.0.write_digital(pin, level)
        }

        fn read_digital(&mut self, pin: u8) -> Level {
            self.0.read_digital(pin)
        }

        fn write_analog(&mut self, channel: u8, duty: u8) {
            log::trace!("pwm {} <- {}", channel, duty);
            self.0.write_analog(channel, duty)
        }

        fn read_analog(&mut self, channel: u8) -> u16 {
            self.0.read_analog(channel)
        }

        fn delay_ms(&mut self, ms: u32) {
            thread::sleep(Duration::from_millis(ms as u64));
            self.0.delay_ms(ms)
        }

        fn sensor_begin(&mut self) -> Result<(), HalError> {
            self.0.sensor_begin()
        }

        fn read_temperature(&mut self) -> Result<f32, HalError> {
            self.0.read_temperature()
        }

        fn read_humidity(&mut self) -> Result<f32, HalError> {
            self.0.read_humidity()
        }
    }

    /// Console output on stdout, flushed per line by the caller
    struct StdoutOut<W: Write>(W);

    impl<W: Write> fmt::Write for StdoutOut<W> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
        }
    }

    pub fn run() -> io::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

        // The terminal already echoes what is typed
        let tty = io::stdin().is_terminal();
        let config = ConsoleConfig {
            echo: false,
            prompt: tty,
            banner: tty,
        };

        let mut board = HostBoard(SimBoard::default());
        let mut out = StdoutOut(BufWriter::new(io::stdout().lock()));
        let mut console = Console::new(&REGISTRY, config);

        console.boot(&mut board, &mut out);
        out.0.flush()?;

        for byte in io::stdin().lock().bytes() {
            let result = console.process_byte(byte?, &mut board, &mut out);
            out.0.flush()?;

            if let Some(Err(e)) = &result {
                log::debug!("command failed: {}", e);
            }
            if let Some(Ok(Flow::Exit)) = result {
                break;
            }
        }

        // Input ended mid-line: run what was typed
        if !console.is_halted() && !console.pending_line().is_empty() {
            console.process_byte(b'\n', &mut board, &mut out);
            out.0.flush()?;
        }

        Ok(())
    }
}
