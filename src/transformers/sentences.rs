//! Sentence splitting.
//!
//! When enabled, a normalized line is cut on every literal `.`.
//! Consecutive periods yield empty pieces, which the length filter then drops.
use itertools::Either;

#[derive(Debug, Default, Clone, Copy)]
pub struct SentenceSplitter {
    enabled: bool,
}

impl SentenceSplitter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Raw pieces, untrimmed. Yields the whole line when disabled.
    pub fn split<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> {
        if self.enabled {
            Either::Left(line.split('.'))
        } else {
            Either::Right(std::iter::once(line))
        }
    }

    /// Candidate records of a normalized line: pieces without surrounding whitespace.
    pub fn candidates<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> {
        self.split(line).map(str::trim)
    }
}
