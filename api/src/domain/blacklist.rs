//! Static blacklist of forbidden tokens
//!
//! Loaded once at startup and shared read-only. Matching is exact and
//! case-sensitive on whitespace-delimited tokens: no substrings, no
//! normalization.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    tokens: HashSet<String>,
}

impl Blacklist {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// True if any whitespace-delimited token of `text` is blacklisted
    pub fn contains_blacklisted(&self, text: &str) -> bool {
        text.split_whitespace()
            .any(|token| self.tokens.contains(token))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
