//! Dispatcher: boot the registry, then run one command per line.
//!
//! ```text
//!            boot (init all, once)
//!                    │
//!                    ▼
//!   line ──▶ AwaitingLine ──tokenize──▶ find ──▶ exec
//!                ▲                               │
//!                └──────── Flow::Continue ◀──────┤
//!                                                │ Flow::Exit
//!                          Halted ◀──────────────┘
//! ```

use core::fmt::Write;

use super::commands::{CommandResult, Context, Flow, Registry};
use super::parser::tokenize;
use super::ConsoleError;
use crate::hal::Hardware;

/// Dispatcher state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting for the next complete line
    AwaitingLine,
    /// `exit` ran; no further command is serviced
    Halted,
}

/// Status of a dispatch: 0 on success, the error's status otherwise
pub fn status_code(result: &CommandResult) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status(),
    }
}

pub struct Dispatcher<'r> {
    registry: &'r Registry,
    state: DispatchState,
    booted: bool,
}

impl<'r> Dispatcher<'r> {
    pub const fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            state: DispatchState::AwaitingLine,
            booted: false,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == DispatchState::Halted
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// Run every command's `init`. Only the first call does anything.
    ///
    /// Returns the number of commands whose init failed.
    pub fn boot(&mut self, hw: &mut dyn Hardware, out: &mut dyn Write) -> usize {
        if self.booted {
            return 0;
        }
        self.booted = true;

        let failed = self.registry.init_all(hw, out);
        log::info!(
            "console ready: {} commands, {} init failures",
            self.registry.len(),
            failed
        );
        failed
    }

    /// Tokenize `line`, look up its command and run it.
    ///
    /// An empty line does nothing. After `exit` every call returns
    /// `Ok(Flow::Exit)` without running anything.
    pub fn dispatch(
        &mut self,
        line: &str,
        hw: &mut dyn Hardware,
        out: &mut dyn Write,
    ) -> CommandResult {
        if self.is_halted() {
            return Ok(Flow::Exit);
        }
        if !self.booted {
            self.boot(hw, out);
        }

        let args = tokenize(line);
        if args.is_empty() {
            return Ok(Flow::Continue);
        }

        let cmd = self
            .registry
            .find(args.command())
            .ok_or(ConsoleError::UnknownCommand);

        let result = cmd.and_then(|cmd| {
            let mut ctx = Context {
                hw,
                out,
                registry: self.registry,
            };
            cmd.exec(&args, &mut ctx)
        });

        log::debug!("{} -> status {}", args.command(), status_code(&result));

        if result == Ok(Flow::Exit) {
            log::info!("exit requested, console halted");
            self.state = DispatchState::Halted;
        }

        result
    }
}
