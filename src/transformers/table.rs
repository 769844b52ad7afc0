//! Character translation table.
//!
//! Maps every character of a closed alphabet to a single space.
//! This is a plain per-character substitution, so the character count of a line
//! is left unchanged.
use super::Transform;

/// Markup and punctuation replaced by default.
pub const DEFAULT_ALPHABET: &str = "{}[]<>=&\"()|/\\*'#:;,";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    ascii: [bool; 128],
    // non-ascii members, if any.
    other: Vec<char>,
}

impl TranslationTable {
    /// Build a table removing every character of `alphabet`.
    pub fn new(alphabet: &str) -> Self {
        let mut ascii = [false; 128];
        let mut other = Vec::new();
        for c in alphabet.chars() {
            if c.is_ascii() {
                ascii[c as usize] = true;
            } else if !other.contains(&c) {
                other.push(c);
            }
        }

        Self { ascii, other }
    }

    /// `true` if `c` is replaced by the table.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            self.ascii[c as usize]
        } else {
            self.other.contains(&c)
        }
    }

    pub fn translate(&self, line: &str) -> String {
        line.chars()
            .map(|c| if self.contains(c) { ' ' } else { c })
            .collect()
    }
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}

impl Transform for TranslationTable {
    fn transform_own(&self, line: String) -> String {
        if line.chars().any(|c| self.contains(c)) {
            self.translate(&line)
        } else {
            line
        }
    }
}
