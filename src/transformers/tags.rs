//! Shallow tag stripping.
//!
//! Every shortest `<...>` span is replaced by a space.
//! There is no notion of nesting or quoting, and a `<` without a closing `>`
//! is kept as is.
use regex::Regex;

use super::Transform;
use crate::error::Error;

const TAG_PATTERN: &str = r"<.*?>";

#[derive(Debug, Clone)]
pub struct StripTags {
    pattern: Regex,
}

impl StripTags {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            pattern: Regex::new(TAG_PATTERN)?,
        })
    }
}

impl Transform for StripTags {
    fn transform_own(&self, line: String) -> String {
        if !line.contains('<') {
            return line;
        }
        self.pattern.replace_all(&line, " ").into_owned()
    }
}
