//! `exit`: stop the interpreter

use core::fmt::Write;

use crate::console::commands::{Command, CommandResult, Context, Flow, Registry};
use crate::console::parser::ArgumentVector;
use crate::console::ConsoleError;

pub struct Exit;

impl Command for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn exec(&self, _args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult {
        let _ = writeln!(ctx.out, "Exiting CLI.");
        Ok(Flow::Exit)
    }

    fn help(&self, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let _ = writeln!(
            out,
            "This will exit the CLI. To restart the CLI, restart the program."
        );
        Ok(())
    }
}
