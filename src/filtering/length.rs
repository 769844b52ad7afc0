//! record-level length filtering
use super::Filter;
use crate::config::MIN_LENGTH;

/// Simple length filter.
/// Returns `true` if provided record is strictly longer than [Length::min_size] unicode codepoints.
///
/// [Length::min_size] is 100 by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    min_size: usize,
}

impl Length {
    /// specify a minimum length
    pub fn with_min_size(min_size: usize) -> Self {
        Self { min_size }
    }

    /// Get a reference to the length's min size.
    pub fn min_size(&self) -> &usize {
        &self.min_size
    }
}

impl Filter<&str> for Length {
    fn detect(&self, record: &str) -> bool {
        // byte length is an upper bound of the codepoint count
        record.len() > self.min_size && record.chars().count() > self.min_size
    }
}

impl Default for Length {
    /// Default minimum length for records is 100 Unicode Codepoints
    fn default() -> Self {
        Length {
            min_size: MIN_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, Length};

    #[test]
    fn length_default() {
        let valid: String = ['z'; 101].iter().collect();
        let invalid: String = ['z'; 99].iter().collect();

        let f = Length::default();
        assert_eq!(f.min_size(), &100);
        assert!(f.detect(&valid));
        assert!(!f.detect(&invalid));
    }

    #[test]
    fn length_boundary() {
        let f = Length::with_min_size(10);
        let exact: String = ['a'; 10].iter().collect();
        let longer: String = ['a'; 11].iter().collect();
        assert!(!f.detect(&exact));
        assert!(f.detect(&longer));
    }

    #[test]
    fn counts_codepoints() {
        // 10 codepoints, 20 bytes
        let f = Length::with_min_size(10);
        let s: String = ['é'; 10].iter().collect();
        assert_eq!(s.len(), 20);
        assert!(!f.detect(&s));
    }

    #[test]
    fn zero_min() {
        let f = Length::with_min_size(0);
        assert!(!f.detect(""));
        assert!(f.detect("a"));
    }
}
