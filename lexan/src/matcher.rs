use regex::Regex;

use crate::error::LexanError;

/// A single anchored regular expression, matched at an arbitrary byte offset
/// rather than only at the start of a buffer. Anchoring with `\A` would pin
/// matches to offset zero, so patterns given to [`Pattern::new`] are
/// compiled unanchored and matched via [`Regex::find_at`], which still only
/// accepts a match that begins exactly at the requested offset.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, LexanError> {
        if pattern.is_empty() {
            return Err(LexanError::EmptyPattern(pattern.to_string()));
        }
        Ok(Self {
            source: pattern.to_string(),
            regex: Regex::new(pattern)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the matched slice if `self` matches starting exactly at
    /// `position`, `None` otherwise (including when `position` is not a
    /// char boundary or is past the end of `text`).
    pub fn find_at<'t>(&self, text: &'t str, position: usize) -> Option<&'t str> {
        if position > text.len() || !text.is_char_boundary(position) {
            return None;
        }
        let m = self.regex.find_at(text, position)?;
        if m.start() == position {
            Some(m.as_str())
        } else {
            None
        }
    }
}

/// A named set of patterns matched together, keeping the longest match (or
/// all the longest matches, on a tie) at a given position. Handles are
/// caller-supplied labels (terminal names); duplicates are rejected at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct RegexMatcher<H: Clone> {
    entries: Vec<(H, Pattern)>,
}

impl<H: Clone + PartialEq> RegexMatcher<H> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(&mut self, handle: H, pattern: &str) -> Result<(), LexanError>
    where
        H: std::fmt::Debug,
    {
        if self.entries.iter().any(|(h, _)| h == &handle) {
            return Err(LexanError::DuplicateHandle(format!("{handle:?}")));
        }
        if self.entries.iter().any(|(_, p)| p.source() == pattern) {
            return Err(LexanError::DuplicatePattern(pattern.to_string()));
        }
        self.entries.push((handle, Pattern::new(pattern)?));
        Ok(())
    }

    /// Returns every handle whose pattern produces the longest match at
    /// `position`, together with the length of that match. Empty if nothing
    /// matches.
    pub fn longest_matches(&self, text: &str, position: usize) -> (Vec<H>, usize) {
        let mut longest = 0;
        let mut winners = Vec::new();
        for (handle, pattern) in &self.entries {
            if let Some(m) = pattern.find_at(text, position) {
                let len = m.len();
                if len > longest {
                    longest = len;
                    winners.clear();
                    winners.push(handle.clone());
                } else if len == longest && len > 0 {
                    winners.push(handle.clone());
                }
            }
        }
        (winners, longest)
    }
}
