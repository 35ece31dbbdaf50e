//! Command trait and registry

use core::fmt::Write;

use super::cmd::{Exit, Gpio, Help, Led, Pwm, Temp};
use super::parser::ArgumentVector;
use super::ConsoleError;
use crate::hal::Hardware;

/// What the console does after a successful command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading lines
    Continue,
    /// Stop servicing commands
    Exit,
}

/// Result of a command's `exec`
pub type CommandResult = Result<Flow, ConsoleError>;

/// Everything a command may touch while it runs
pub struct Context<'a> {
    pub hw: &'a mut dyn Hardware,
    pub out: &'a mut dyn Write,
    pub registry: &'a Registry,
}

/// A console command
///
/// Implementations are stateless unit structs living in a static table.
pub trait Command: Sync {
    /// Name typed on the console (case-sensitive)
    fn name(&self) -> &'static str;

    /// One-time setup at boot
    fn init(&self, _ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
        Ok(())
    }

    /// Run the command. `args.arg(0)` is the command name.
    ///
    /// Must validate every argument before touching hardware.
    fn exec(&self, args: &ArgumentVector, ctx: &mut Context<'_>) -> CommandResult;

    /// Write usage text, nothing else
    fn help(&self, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError>;
}

/// Immutable, ordered command table
pub struct Registry {
    commands: &'static [&'static dyn Command],
}

impl Registry {
    pub const fn new(commands: &'static [&'static dyn Command]) -> Self {
        Self { commands }
    }

    /// Exact, case-sensitive lookup
    pub fn find(&self, name: &str) -> Option<&'static dyn Command> {
        self.commands.iter().copied().find(|c| c.name() == name)
    }

    /// Commands in table order
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Command> + Clone {
        let commands: &'static [&'static dyn Command] = self.commands;
        commands.iter().copied()
    }

    /// Command names in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + Clone {
        self.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run every command's `init` in table order.
    ///
    /// Failures are reported and logged but do not stop the others.
    /// Returns the number of failed inits.
    pub fn init_all(&self, hw: &mut dyn Hardware, out: &mut dyn Write) -> usize {
        let mut failed = 0;

        for cmd in self.iter() {
            let mut ctx = Context {
                hw: &mut *hw,
                out: &mut *out,
                registry: self,
            };
            if let Err(e) = cmd.init(&mut ctx) {
                log::warn!("init {} failed: {}", cmd.name(), e);
                let _ = writeln!(out, "{}: init failed: {}", cmd.name(), e);
                failed += 1;
            }
        }

        failed
    }
}

/// All available commands
pub static COMMANDS: &[&dyn Command] = &[&Gpio, &Led, &Pwm, &Temp, &Help, &Exit];

/// The console's registry
pub static REGISTRY: Registry = Registry::new(COMMANDS);
