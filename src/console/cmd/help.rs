//! `help [command]`: list commands or show one command's usage

use core::fmt::Write;

use crate::console::commands::{Command, CommandResult, Context, Flow, Registry};
use crate::console::parser::ArgumentVector;
use crate::console::ConsoleError;

/// First line of the listing. Host tools probe for it to check the
/// console is alive, so it must not change.
pub const LISTING_HEADER: &str = "The following commands are available:";

pub struct Help;

impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn exec(&self, args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult {
        // Unknown or missing topic falls back to the listing
        match ctx.registry.find(args.arg(1)) {
            Some(cmd) => cmd.help(ctx.registry, ctx.out)?,
            None => self.help(ctx.registry, ctx.out)?,
        }
        Ok(Flow::Continue)
    }

    fn help(&self, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let _ = writeln!(out, "{}", LISTING_HEADER);
        for name in registry.names() {
            let _ = writeln!(out, "    {}", name);
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "You can for instance type \"help led\" for more info on the LED command."
        );
        Ok(())
    }
}
