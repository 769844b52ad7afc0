use itertools::Itertools;

use super::Transform;

/// Whitespace collapser: tokenize on whitespace, rejoin with single spaces.
///
/// The ASCII information separators (U+001C to U+001F) count as whitespace too.
#[derive(Debug, Default, Clone, Copy)]
pub struct Collapse;

impl Transform for Collapse {
    fn transform_own(&self, line: String) -> String {
        line.split(is_separator)
            .filter(|token| !token.is_empty())
            .join(" ")
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
