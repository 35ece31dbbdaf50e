//! Tab completion of command names, cycling on repeated tabs

use heapless::String;

use crate::config::ARG_SIZE;

/// Tab completion state
pub struct Completer {
    /// Prefix the user typed before the first tab
    prefix: String<ARG_SIZE>,
    /// Index among matches of the candidate shown last
    match_idx: usize,
    /// Last candidate offered, to recognise a repeated tab
    offered: Option<&'static str>,
}

impl Completer {
    /// Create new completer
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
            match_idx: 0,
            offered: None,
        }
    }

    /// Complete `input`, cycling through matches on repeated calls
    ///
    /// A repeated call is one whose `input` equals the candidate returned
    /// last; the typed prefix is then reused so the next match comes up.
    pub fn complete<I>(&mut self, input: &str, candidates: I) -> Option<&'static str>
    where
        I: Iterator<Item = &'static str> + Clone,
    {
        let cycling = self.offered == Some(input);

        if cycling {
            self.match_idx += 1;
        } else {
            self.prefix.clear();
            if self.prefix.push_str(input).is_err() {
                self.reset();
                return None;
            }
            self.match_idx = 0;
        }

        let prefix = self.prefix.as_str();
        let count = candidates.clone().filter(|c| c.starts_with(prefix)).count();
        if count == 0 {
            self.reset();
            return None;
        }

        // Wrap around
        self.match_idx %= count;

        let found = candidates
            .filter(|c| c.starts_with(prefix))
            .nth(self.match_idx);
        self.offered = found;
        found
    }

    /// Reset completion state (call when user types non-tab)
    pub fn reset(&mut self) {
        self.offered = None;
        self.match_idx = 0;
    }
}

impl Default for Completer {
    fn default() -> Self {
        Self::new()
    }
}
