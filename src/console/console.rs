//! Main console struct: byte-level front end over the dispatcher

use core::fmt::Write;

use super::{CommandResult, Completer, ConsoleError, Dispatcher, LineBuffer, Registry};
use crate::config::ConsoleConfig;
use crate::hal::Hardware;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Prompt printed before each line when enabled
pub const PROMPT: &str = "uctrl> ";

/// Console state machine
pub struct Console<'r> {
    line: LineBuffer,
    completer: Completer,
    dispatcher: Dispatcher<'r>,
    config: ConsoleConfig,
    /// Escape sequence state
    escape_state: EscapeState,
    /// Previous byte was CR: an LF right after it ends the same line
    after_cr: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    Escape,  // Got ESC
    Bracket, // Got ESC [
}

impl<'r> Console<'r> {
    /// Create new console
    pub const fn new(registry: &'r Registry, config: ConsoleConfig) -> Self {
        Self {
            line: LineBuffer::new(),
            completer: Completer::new(),
            dispatcher: Dispatcher::new(registry),
            config,
            escape_state: EscapeState::Normal,
            after_cr: false,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<'r> {
        &self.dispatcher
    }

    /// Whether `exit` has run
    pub fn is_halted(&self) -> bool {
        self.dispatcher.is_halted()
    }

    /// Print the banner, run command init and show the first prompt.
    ///
    /// Returns the number of commands whose init failed.
    pub fn boot(&mut self, hw: &mut dyn Hardware, out: &mut dyn Write) -> usize {
        if self.config.banner {
            let _ = writeln!(out, "{}", VERSION);
            let _ = writeln!(out, "Type 'help' for commands.");
        }
        let failed = self.dispatcher.boot(hw, out);
        self.print_prompt(out);
        failed
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) when a non-empty line was dispatched, None if
    /// more input is needed. Input after `exit` is ignored.
    pub fn process_byte(
        &mut self,
        byte: u8,
        hw: &mut dyn Hardware,
        out: &mut dyn Write,
    ) -> Option<CommandResult> {
        if self.is_halted() {
            return None;
        }

        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');
        if after_cr && byte == b'\n' {
            return None;
        }

        match self.escape_state {
            EscapeState::Normal => self.process_normal(byte, hw, out),
            EscapeState::Escape => {
                if byte == b'[' {
                    self.escape_state = EscapeState::Bracket;
                } else {
                    self.escape_state = EscapeState::Normal;
                }
                None
            }
            EscapeState::Bracket => {
                // Swallow parameter bytes up to the final byte (arrows etc.)
                if (0x40..=0x7E).contains(&byte) {
                    self.escape_state = EscapeState::Normal;
                }
                None
            }
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        hw: &mut dyn Hardware,
        out: &mut dyn Write,
    ) -> Option<CommandResult> {
        match byte {
            // Enter
            b'\r' | b'\n' => {
                if self.config.echo {
                    let _ = writeln!(out);
                }
                self.completer.reset();

                if self.line.as_str().trim().is_empty() {
                    self.line.clear();
                    self.print_prompt(out);
                    return None;
                }

                let result = self.dispatcher.dispatch(self.line.as_str(), hw, out);
                if let Err(e) = &result {
                    report(e, out);
                }
                self.line.clear();
                self.print_prompt(out);
                Some(result)
            }

            // Backspace
            0x7F | 0x08 => {
                if self.line.backspace() && self.config.echo {
                    // Echo: backspace, space, backspace
                    let _ = write!(out, "\x08 \x08");
                }
                self.completer.reset();
                None
            }

            // Tab
            b'\t' => {
                self.handle_tab(out);
                None
            }

            // Escape
            0x1B => {
                self.escape_state = EscapeState::Escape;
                None
            }

            // Ctrl+C
            0x03 => {
                if self.config.echo {
                    let _ = writeln!(out, "^C");
                }
                self.line.clear();
                self.completer.reset();
                self.print_prompt(out);
                None
            }

            // Ctrl+U (clear line)
            0x15 => {
                self.erase_displayed(out);
                self.line.clear();
                self.completer.reset();
                None
            }

            // Printable character
            0x20..=0x7E => {
                if self.line.push(byte) {
                    if self.config.echo {
                        let _ = write!(out, "{}", byte as char);
                    }
                } else if self.config.echo {
                    // Line full: ring the bell
                    let _ = write!(out, "\x07");
                }
                self.completer.reset();
                None
            }

            _ => None,
        }
    }

    /// Complete the command name (first word only)
    fn handle_tab(&mut self, out: &mut dyn Write) {
        let input = self.line.as_str();
        if input.contains(' ') {
            return;
        }

        let names = self.dispatcher.registry().names();
        let Some(completed) = self.completer.complete(input, names) else {
            return;
        };

        self.erase_displayed(out);
        self.line.clear();
        for c in completed.bytes() {
            self.line.push(c);
        }
        if self.config.echo {
            let _ = write!(out, "{}", completed);
        }
    }

    fn erase_displayed(&self, out: &mut dyn Write) {
        if !self.config.echo {
            return;
        }
        for _ in 0..self.line.len() {
            let _ = write!(out, "\x08 \x08");
        }
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        if self.config.prompt && !self.is_halted() {
            let _ = write!(out, "{}", PROMPT);
        }
    }

    /// Current, not yet submitted input
    pub fn pending_line(&self) -> &str {
        self.line.as_str()
    }
}

/// Write an error the way the console shows it: `E05: value 99 out of range (22-53)`
pub fn report(err: &ConsoleError, out: &mut dyn Write) {
    let _ = writeln!(out, "{}: {}", err.code(), err);
}
