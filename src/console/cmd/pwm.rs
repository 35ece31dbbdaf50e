//! `pwm <channel> [duty]`: set a duty cycle or read the channel back

use core::fmt::Write;

use super::parse_in_range;
use crate::config::BOARD;
use crate::console::commands::{Command, CommandResult, Context, Flow, Registry};
use crate::console::parser::ArgumentVector;
use crate::console::ConsoleError;

pub struct Pwm;

impl Command for Pwm {
    fn name(&self) -> &'static str {
        "pwm"
    }

    fn init(&self, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
        for channel in BOARD.pwm_channels.clone() {
            ctx.hw.configure_output(channel);
        }
        Ok(())
    }

    fn exec(&self, args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult {
        let channel = parse_in_range(args.arg(1), &BOARD.pwm_channels)?;

        let duty = args.arg(2);
        if duty.is_empty() {
            let value = ctx.hw.read_analog(channel);
            let _ = writeln!(ctx.out, "{}", value);
            return Ok(Flow::Continue);
        }

        let duty = parse_in_range(duty, &BOARD.pwm_duty)?;
        ctx.hw.write_analog(channel, duty);

        Ok(Flow::Continue)
    }

    fn help(&self, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let (first, last) = (BOARD.pwm_channels.start(), BOARD.pwm_channels.end());
        let _ = writeln!(out, "generate pwm, default frequency at 1000Hz.");
        let _ = writeln!(out, "Valid PWM pin number ranges from {} to {}.", first, last);
        let _ = writeln!(
            out,
            "Valid value of duty cycle ranges from {} to {}.",
            BOARD.pwm_duty.start(),
            BOARD.pwm_duty.end()
        );
        let _ = writeln!(out, "To read back pwm No.{}:", first);
        let _ = writeln!(out, "  pwm {}", first);
        let _ = writeln!(out, "To set pwm No.{} to 50% duty cycle:", first);
        let _ = writeln!(out, "  pwm {} 127", first);
        let _ = writeln!(out, "To set pwm No.{} to 100% duty cycle:", last);
        let _ = writeln!(out, "  pwm {} 255", last);
        Ok(())
    }
}
