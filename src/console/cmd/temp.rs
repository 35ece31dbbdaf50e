//! `temp temp|humi`: read the Si7021 sensor

use core::fmt::Write;

use crate::console::commands::{Command, CommandResult, Context, Flow, Registry};
use crate::console::parser::ArgumentVector;
use crate::console::ConsoleError;

pub struct Temp;

impl Command for Temp {
    fn name(&self) -> &'static str {
        "temp"
    }

    /// A missing sensor is reported here; the console keeps running and
    /// later reads fail with a hardware error.
    fn init(&self, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
        if let Err(e) = ctx.hw.sensor_begin() {
            let _ = writeln!(ctx.out, "Did not find Si7021 sensor!");
            return Err(e.into());
        }
        Ok(())
    }

    fn exec(&self, args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult {
        let value = match args.arg(1) {
            "temp" => ctx.hw.read_temperature()?,
            "humi" => ctx.hw.read_humidity()?,
            other => {
                let _ = writeln!(ctx.out, "Invalid temp command: {}", other);
                return Err(ConsoleError::InvalidCommand);
            }
        };

        let _ = writeln!(ctx.out, "{:.2}", value);
        Ok(Flow::Continue)
    }

    fn help(&self, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let _ = writeln!(out, "Temperature sensor Si7021. Examples:");
        let _ = writeln!(out, "Read temperature in degree celsius:");
        let _ = writeln!(out, "  temp temp");
        let _ = writeln!(out, "Read humidity");
        let _ = writeln!(out, "  temp humi");
        Ok(())
    }
}
