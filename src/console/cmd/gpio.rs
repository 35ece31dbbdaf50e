//! `gpio <pin> [0|1]`: write or read a digital pin

use core::fmt::Write;

use super::parse_in_range;
use crate::config::BOARD;
use crate::console::commands::{Command, CommandResult, Context, Flow, Registry};
use crate::console::parser::ArgumentVector;
use crate::console::ConsoleError;
use crate::hal::Level;

pub struct Gpio;

impl Command for Gpio {
    fn name(&self) -> &'static str {
        "gpio"
    }

    fn init(&self, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
        for pin in BOARD.gpio_pins.clone() {
            ctx.hw.configure_output(pin);
        }
        Ok(())
    }

    fn exec(&self, args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult {
        let pin = parse_in_range(args.arg(1), &BOARD.gpio_pins)?;

        match args.arg(2) {
            "0" => ctx.hw.write_digital(pin, Level::Low),
            "1" => ctx.hw.write_digital(pin, Level::High),
            "" => {
                let level = ctx.hw.read_digital(pin);
                let _ = writeln!(ctx.out, "{}", level);
            }
            _ => return Err(ConsoleError::InvalidCommand),
        }

        Ok(Flow::Continue)
    }

    fn help(&self, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let _ = writeln!(
            out,
            "Read or write the gpio. Valid GPIO number ranges from {} to {}.",
            BOARD.gpio_pins.start(),
            BOARD.gpio_pins.end()
        );
        let _ = writeln!(out, "To read gpio No.{}:", BOARD.gpio_pins.start());
        let _ = writeln!(out, "  gpio {}", BOARD.gpio_pins.start());
        let _ = writeln!(out, "To write 1 to gpio No.{}:", BOARD.gpio_pins.end());
        let _ = writeln!(out, "  gpio {} 1", BOARD.gpio_pins.end());
        Ok(())
    }
}
