use std::cmp::Ordering;
use std::fmt;

use nucleo_matcher::chars;

/// String comparison used by typeahead search.
pub trait Collator: fmt::Debug + Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    fn equals(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Compares strings at base sensitivity: case and accents are ignored, so
/// `"Ä"`, `"a"` and `"A"` are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCollator;

impl BaseCollator {
    fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
        text.chars().map(|c| chars::to_lower_case(chars::normalize(c)))
    }
}

impl Collator for BaseCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        Self::fold(a).cmp(Self::fold(b))
    }
}
