//! `led on|off|blink <hz>`: drive the onboard LED

use core::fmt::Write;

use super::parse_in_range;
use crate::config::BOARD;
use crate::console::commands::{Command, CommandResult, Context, Flow, Registry};
use crate::console::parser::ArgumentVector;
use crate::console::ConsoleError;
use crate::hal::{Blink, Level};

pub struct Led;

impl Led {
    fn blink(&self, hz_token: &str, ctx: &mut Context<'_>) -> CommandResult {
        let hz = parse_in_range(hz_token, &BOARD.blink_hz)?;
        let effect = Blink::at_hz(BOARD.led_pin, hz, BOARD.blink_cycles).ok_or(
            ConsoleError::OutOfRange {
                value: hz as i32,
                min: *BOARD.blink_hz.start() as i32,
                max: *BOARD.blink_hz.end() as i32,
            },
        )?;

        let _ = writeln!(
            ctx.out,
            "Blinking the LED {} times at {} Hz.",
            effect.cycles, hz
        );
        ctx.hw.play(&effect);

        Ok(Flow::Continue)
    }
}

impl Command for Led {
    fn name(&self) -> &'static str {
        "led"
    }

    fn init(&self, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
        ctx.hw.configure_output(BOARD.led_pin);
        Ok(())
    }

    fn exec(&self, args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult {
        match args.arg(1) {
            "on" => {
                let _ = writeln!(ctx.out, "Turning on the LED.");
                ctx.hw.write_digital(BOARD.led_pin, Level::High);
            }
            "off" => {
                let _ = writeln!(ctx.out, "Turning off the LED.");
                ctx.hw.write_digital(BOARD.led_pin, Level::Low);
            }
            "blink" => return self.blink(args.arg(2), ctx),
            _ => {
                let _ = writeln!(
                    ctx.out,
                    "Type \"help led\" to see how to use the LED command."
                );
                return Err(ConsoleError::InvalidCommand);
            }
        }

        Ok(Flow::Continue)
    }

    fn help(&self, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let _ = writeln!(
            out,
            "Control the on-board LED, either on, off or blinking {} times:",
            BOARD.blink_cycles
        );
        let _ = writeln!(out, "  led on");
        let _ = writeln!(out, "  led off");
        let _ = writeln!(out, "  led blink hz");
        let _ = writeln!(
            out,
            "    where \"hz\" is the blink frequency in Hz ({} to {}).",
            BOARD.blink_hz.start(),
            BOARD.blink_hz.end()
        );
        Ok(())
    }
}
