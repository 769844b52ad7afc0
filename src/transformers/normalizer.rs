//! Line normalizer.
//!
//! Chains the line transformers in their fixed order, as selected by a [Config].
use super::{Collapse, StripDigits, StripTags, Transform};
use crate::config::Config;
use crate::error::Error;

pub struct Normalizer {
    steps: Vec<Box<dyn Transform>>,
}

impl Normalizer {
    /// Build the chain of steps for `config`.
    ///
    /// Patterns are compiled here, once per run.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut steps: Vec<Box<dyn Transform>> = Vec::with_capacity(4);
        steps.push(Box::new(StripTags::new()?));
        if config.strip_digits {
            steps.push(Box::new(StripDigits::new()?));
        }
        steps.push(Box::new(config.table.clone()));
        steps.push(Box::new(Collapse));

        Ok(Self { steps })
    }

    /// Number of chained steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn normalize(&self, line: String) -> String {
        self.steps
            .iter()
            .fold(line, |line, step| step.transform_own(line))
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("steps", &self.steps.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::TranslationTable;

    fn normalize(config: &Config, line: &str) -> String {
        Normalizer::new(config).unwrap().normalize(line.to_string())
    }

    #[test]
    fn steps() {
        let n = Normalizer::new(&Config::default()).unwrap();
        assert_eq!(n.len(), 4);
        let n = Normalizer::new(&Config::default().with_strip_digits(false)).unwrap();
        assert_eq!(n.len(), 3);
    }

    #[test]
    fn markup_line() {
        let line = "<p>Hello world, this line is long enough to pass the one hundred character default minimum length threshold for sure yes.</p>\n";
        assert_eq!(
            normalize(&Config::default(), line),
            "Hello world this line is long enough to pass the one hundred character default minimum length threshold for sure yes."
        );
    }

    #[test]
    fn wikitext_line() {
        let line = "  '''Paris''' is the [[capital]] of {{France}} (pop. 2165423, 2019).";
        assert_eq!(
            normalize(&Config::default(), line),
            "Paris is the capital of France pop. ."
        );
    }

    #[test]
    fn keep_digits() {
        let line = "In 1889, the [[Eiffel Tower]] opened.";
        let config = Config::default().with_strip_digits(false);
        assert_eq!(
            normalize(&config, line),
            "In 1889 the Eiffel Tower opened."
        );
        assert_eq!(
            normalize(&Config::default(), line),
            "In the Eiffel Tower opened."
        );
    }

    #[test]
    fn digits_stripped_before_translation() {
        // `|` is still there when digits are removed, so `1|2` loses both runs.
        assert_eq!(normalize(&Config::default(), "a 1|2 b"), "a b");
        // `x` glues to the digits: no boundary, nothing removed.
        assert_eq!(normalize(&Config::default(), "x1 b"), "x1 b");
    }

    #[test]
    fn custom_table() {
        let config = Config::default().with_table(TranslationTable::new("-"));
        assert_eq!(normalize(&config, "a-b (c)"), "a b (c)");
    }

    #[test]
    fn no_alphabet_in_output() {
        let config = Config::default();
        let out = normalize(&config, "{|class=\"wikitable\"\n|-\n! a !! b\n|}");
        assert!(!out.chars().any(|c| config.table.contains(c)));
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
        assert!(!out.contains("  "));
    }
}
