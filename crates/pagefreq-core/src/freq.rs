//! Token frequency counting and ordering.

use std::collections::HashMap;

/// A token frequency mapping, per page or whole-document.
pub type Frequency = HashMap<String, u64>;

/// Counts the occurrences of each distinct token in a page's token sequence.
///
/// The input must already be normalized. Unseen tokens are absent from the
/// result, never present with a zero count; an empty sequence yields an empty
/// map.
///
/// # Example
/// ```
/// use pagefreq_core::freq::count_tokens;
///
/// let counts = count_tokens(["ai", "safety", "ai"]);
/// assert_eq!(counts.get("ai"), Some(&2));
/// assert_eq!(counts.get("safety"), Some(&1));
/// assert_eq!(counts.get("risk"), None);
/// ```
pub fn count_tokens<I, S>(tokens: I) -> Frequency
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts = Frequency::new();
    for token in tokens {
        *counts.entry(token.into()).or_insert(0) += 1;
    }
    counts
}

/// Returns the entries of a frequency map ordered descending by count, with
/// ties broken by ascending token.
///
/// This is the one reproducible ordering used by the global record writer and
/// the top-N report.
pub fn sorted_entries(freq: &Frequency) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = freq.iter().map(|(t, &c)| (t.as_str(), c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_count_tokens_basic() {
        let counts = count_tokens(["ai", "safety", "ai"]);

        let mut expected = Frequency::new();
        expected.insert("ai".to_string(), 2);
        expected.insert("safety".to_string(), 1);

        assert_eq!(counts, expected);
    }

    #[test]
    fn test_count_tokens_empty() {
        let counts = count_tokens(Vec::<String>::new());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_sorted_entries_orders_by_count_then_token() {
        let freq = count_tokens(["b", "b", "c", "a", "a", "d", "d", "d"]);
        let entries = sorted_entries(&freq);

        assert_eq!(entries, vec![("d", 3), ("a", 2), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_sorted_entries_tie_break_is_ascending_token() {
        let mut freq = Frequency::new();
        freq.insert("safety".to_string(), 2);
        freq.insert("ai".to_string(), 2);

        let entries = sorted_entries(&freq);
        assert_eq!(entries, vec![("ai", 2), ("safety", 2)]);
    }
}
