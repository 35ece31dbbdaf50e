//! Built-in commands and the argument rules they share.
//!
//! - a number that does not parse is `InvalidValue`, an empty token is
//!   `MissingArg`; `"0"` is a valid zero
//! - out-of-range values are rejected before any hardware access
//! - an empty trailing token selects read mode

mod exit;
mod gpio;
mod help;
mod led;
mod pwm;
mod temp;

pub use exit::Exit;
pub use gpio::Gpio;
pub use help::{Help, LISTING_HEADER};
pub use led::Led;
pub use pwm::Pwm;
pub use temp::Temp;

use core::ops::RangeInclusive;

use super::ConsoleError;

/// Parse a decimal integer token
pub fn parse_int(token: &str) -> Result<i32, ConsoleError> {
    if token.is_empty() {
        return Err(ConsoleError::MissingArg);
    }
    token.parse().map_err(|_| ConsoleError::InvalidValue)
}

/// Parse a token and check it against a closed range
pub fn parse_in_range<T>(token: &str, range: &RangeInclusive<T>) -> Result<T, ConsoleError>
where
    T: Copy + Into<i32> + TryFrom<i32>,
{
    let value = parse_int(token)?;
    let min: i32 = (*range.start()).into();
    let max: i32 = (*range.end()).into();

    if !(min..=max).contains(&value) {
        return Err(ConsoleError::OutOfRange { value, min, max });
    }

    T::try_from(value).map_err(|_| ConsoleError::OutOfRange { value, min, max })
}
