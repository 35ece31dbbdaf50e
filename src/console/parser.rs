//! Command line tokenizer
//!
//! Split on whitespace into at most [`MAX_ARGS`] owned tokens of at most
//! [`ARG_SIZE`] bytes. Missing slots read as `""`.

use heapless::{String, Vec};

use crate::config::{ARG_SIZE, MAX_ARGS};

/// One token
pub type Token = String<ARG_SIZE>;

/// Tokens of one input line, command name first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector {
    tokens: Vec<Token, MAX_ARGS>,
}

impl ArgumentVector {
    /// Create empty vector
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// The command name (first token), `""` for an empty line
    pub fn command(&self) -> &str {
        self.arg(0)
    }

    /// Token by index (0 is the command name), `""` if absent
    pub fn arg(&self, idx: usize) -> &str {
        self.tokens.get(idx).map(|t| t.as_str()).unwrap_or("")
    }

    /// Number of tokens present
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Present tokens in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }
}

/// Tokenize a command line
///
/// Tokens past [`MAX_ARGS`] are dropped; tokens longer than [`ARG_SIZE`]
/// bytes are cut at the last character boundary that fits.
pub fn tokenize(line: &str) -> ArgumentVector {
    let mut args = ArgumentVector::new();

    for word in line.split_ascii_whitespace() {
        let mut token = Token::new();
        // Cannot fail: the slice fits the capacity
        let _ = token.push_str(truncate(word, ARG_SIZE));

        if args.tokens.push(token).is_err() {
            break;
        }
    }

    args
}

/// Longest prefix of `s` no longer than `max` bytes, on a char boundary
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is two bytes; cutting at 2 would split it
        assert_eq!(truncate("aé", 2), "a");
        assert_eq!(truncate("aé", 3), "aé");
    }
}
