//! Serial console: tokenizer, command registry, dispatcher and the
//! byte-level front end.
//!
//! Zero heap allocation - fixed-size buffers only.

pub mod cmd;
pub mod commands;
pub mod completion;
#[allow(clippy::module_inception)]
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod line_buffer;
pub mod parser;

pub use commands::{Command, CommandResult, Context, Flow, Registry, COMMANDS, REGISTRY};
pub use completion::Completer;
pub use console::{report, Console, PROMPT, VERSION};
pub use dispatcher::{status_code, DispatchState, Dispatcher};
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use parser::{tokenize, ArgumentVector};
