use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_MAX_RECENT_FORMULAS: usize = 10;

/// Number of recent formulas offered as quick-pick chips.
pub const RECENT_CHIP_COUNT: usize = 5;
/// Visible length of a chip before it is shortened.
pub const RECENT_CHIP_CHARS: usize = 20;

/// Bounded, de-duplicated history of accepted formulas, most recent first.
///
/// Serialized as the `recentFormulas` and `maxRecentFormulas` settings keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecentFormulas")]
pub struct RecentFormulas {
    recent_formulas: Vec<String>,
    max_recent_formulas: usize,
}

impl RecentFormulas {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_RECENT_FORMULAS)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        RecentFormulas {
            recent_formulas: Vec::new(),
            max_recent_formulas: capacity.max(1),
        }
    }

    /// Move `formula` to the front of the history.
    ///
    /// Blank formulas are ignored; returns whether the history changed.
    pub fn record(&mut self, formula: &str) -> bool {
        if formula.trim().is_empty() {
            return false;
        }

        self.recent_formulas.retain(|f| f != formula);
        self.recent_formulas.insert(0, formula.to_string());
        self.recent_formulas.truncate(self.max_recent_formulas);
        true
    }

    pub fn list(&self) -> &[String] {
        &self.recent_formulas
    }

    pub fn clear(&mut self) {
        self.recent_formulas.clear();
    }

    pub fn len(&self) -> usize {
        self.recent_formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent_formulas.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_recent_formulas
    }

    /// Change the capacity, dropping the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.max_recent_formulas = capacity.max(1);
        self.recent_formulas.truncate(self.max_recent_formulas);
    }

    /// Short labels for the first `count` formulas.
    pub fn previews(&self, count: usize, max_chars: usize) -> Vec<String> {
        self.recent_formulas
            .iter()
            .take(count)
            .map(|formula| preview(formula, max_chars))
            .collect()
    }
}

impl Default for RecentFormulas {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorten `formula` to `max_chars` grapheme clusters, marking the cut with `...`.
pub fn preview(formula: &str, max_chars: usize) -> String {
    let mut graphemes = formula.grapheme_indices(true);
    match graphemes.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &formula[..cut]),
        None => formula.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecentFormulas {
    #[serde(default)]
    recent_formulas: Vec<String>,
    #[serde(default = "default_max_recent_formulas")]
    max_recent_formulas: usize,
}

fn default_max_recent_formulas() -> usize {
    DEFAULT_MAX_RECENT_FORMULAS
}

impl From<StoredRecentFormulas> for RecentFormulas {
    fn from(stored: StoredRecentFormulas) -> Self {
        let mut recent = RecentFormulas::with_capacity(stored.max_recent_formulas);
        recent.recent_formulas = stored.recent_formulas;
        recent.recent_formulas.truncate(recent.max_recent_formulas);
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_dedups_and_moves_to_front() {
        let mut recent = RecentFormulas::new();
        recent.record("a");
        recent.record("b");
        recent.record("a");
        assert_eq!(recent.list(), ["a", "b"]);
    }

    #[test]
    fn test_dedup_is_exact_match() {
        let mut recent = RecentFormulas::new();
        recent.record("x");
        recent.record("X");
        recent.record("x ");
        assert_eq!(recent.list(), ["x ", "X", "x"]);
    }

    #[test]
    fn test_blank_formulas_are_ignored() {
        let mut recent = RecentFormulas::new();
        recent.record("a");
        assert!(!recent.record(""));
        assert!(!recent.record("   "));
        assert!(!recent.record("\t\n"));
        assert_eq!(recent.list(), ["a"]);
    }

    #[test]
    fn test_max_size() {
        let mut recent = RecentFormulas::with_capacity(3);
        for i in 0..5 {
            recent.record(&format!("f{i}"));
        }
        assert_eq!(recent.list(), ["f4", "f3", "f2"]);
    }

    #[test]
    fn test_default_capacity() {
        let mut recent = RecentFormulas::default();
        for i in 0..15 {
            recent.record(&i.to_string());
        }
        assert_eq!(recent.len(), DEFAULT_MAX_RECENT_FORMULAS);
        assert_eq!(recent.list()[0], "14");
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut recent = RecentFormulas::with_capacity(0);
        recent.record("a");
        recent.record("b");
        assert_eq!(recent.list(), ["b"]);
    }

    #[test]
    fn test_set_capacity_truncates() {
        let mut recent = RecentFormulas::new();
        for f in ["a", "b", "c", "d"] {
            recent.record(f);
        }
        recent.set_capacity(2);
        assert_eq!(recent.list(), ["d", "c"]);
        assert_eq!(recent.capacity(), 2);
    }

    #[test]
    fn test_clear() {
        let mut recent = RecentFormulas::new();
        recent.record("a");
        recent.clear();
        assert!(recent.is_empty());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("x^2", 20), "x^2");
        assert_eq!(preview("abcdefghij", 4), "abcd...");
        assert_eq!(preview("αβγδ", 3), "αβγ...");
        assert_eq!(preview("abcd", 4), "abcd");
    }

    #[test]
    fn test_previews_takes_most_recent() {
        let mut recent = RecentFormulas::new();
        for f in ["1", "2", "3", "4", "5", "6", "\\int_{a}^{b} f(x) \\, dx"] {
            recent.record(f);
        }
        let chips = recent.previews(RECENT_CHIP_COUNT, RECENT_CHIP_CHARS);
        assert_eq!(chips, ["\\int_{a}^{b} f(x) \\,...", "6", "5", "4", "3"]);
    }
}
