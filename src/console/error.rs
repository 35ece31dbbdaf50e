//! Console error types

use crate::hal::HalError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// E01: Unknown command
    #[error("command not found, type \"help\" for a list of commands")]
    UnknownCommand,
    /// E02: Unknown subcommand or trailing token
    #[error("invalid command")]
    InvalidCommand,
    /// E03: Token is not a number
    #[error("conversion error")]
    InvalidValue,
    /// E04: Missing required argument
    #[error("missing argument")]
    MissingArg,
    /// E05: Value out of allowed range
    #[error("value {value} out of range ({min}-{max})")]
    OutOfRange { value: i32, min: i32, max: i32 },
    /// E06: Peripheral failure
    #[error("hardware error: {0}")]
    Hardware(#[from] HalError),
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidCommand => "E02",
            Self::InvalidValue => "E03",
            Self::MissingArg => "E04",
            Self::OutOfRange { .. } => "E05",
            Self::Hardware(_) => "E06",
        }
    }

    /// Non-zero status reported for a failed dispatch
    pub fn status(&self) -> i32 {
        match self {
            Self::UnknownCommand => 1,
            Self::InvalidCommand => 2,
            Self::InvalidValue => 3,
            Self::MissingArg => 4,
            Self::OutOfRange { .. } => 5,
            Self::Hardware(_) => 6,
        }
    }
}
