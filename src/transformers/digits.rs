//! Standalone digit run removal.
//!
//! Removes every maximal digit run that sits between two word boundaries
//! (years, ids, counts). Digits glued to letters (`42nd`, `mp3`) stay.
//! Both digits and word boundaries are unicode-aware.
use regex::Regex;

use super::Transform;
use crate::error::Error;

const DIGITS_PATTERN: &str = r"\b\d+\b";

#[derive(Debug, Clone)]
pub struct StripDigits {
    pattern: Regex,
}

impl StripDigits {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            pattern: Regex::new(DIGITS_PATTERN)?,
        })
    }
}

impl Transform for StripDigits {
    fn transform_own(&self, line: String) -> String {
        if self.pattern.is_match(&line) {
            self.pattern.replace_all(&line, "").into_owned()
        } else {
            line
        }
    }
}
