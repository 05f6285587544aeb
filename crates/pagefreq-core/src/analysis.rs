//! Comparison analysis between two global frequency records.
//!
//! Groups singular/plural variants, normalizes counts to relative
//! frequencies, and ranks the tokens unique to each record.

use std::collections::HashMap;

use crate::freq::Frequency;

// Plural forms that the trailing-s rule cannot reach.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
];

/// A frequency map with singular/plural variants folded together.
#[derive(Debug, Clone, Default)]
pub struct GroupedFrequency {
    /// Singular form to summed count.
    pub counts: Frequency,
    /// Singular form to the variant spellings folded into it.
    pub variants: HashMap<String, Vec<String>>,
}

/// Fold plural forms into their singular when the singular also occurs.
///
/// A token ending in `s`, longer than 3 characters, whose stem is present in
/// the map is treated as a plural of that stem. Irregular plurals are mapped
/// explicitly regardless of whether the singular occurs.
pub fn group_plurals(freq: &Frequency) -> GroupedFrequency {
    let mut grouped = GroupedFrequency::default();

    for (token, &count) in freq {
        let singular = singular_form(token, freq);
        *grouped.counts.entry(singular.clone()).or_insert(0) += count;
        if singular != *token {
            grouped
                .variants
                .entry(singular)
                .or_default()
                .push(token.clone());
        }
    }

    // Variant lists are insertion-ordered by map iteration; sort for
    // reproducible output.
    for variants in grouped.variants.values_mut() {
        variants.sort();
    }

    grouped
}

fn singular_form(token: &str, freq: &Frequency) -> String {
    if let Some((_, singular)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == token) {
        return (*singular).to_string();
    }
    if token.len() > 3 && token.ends_with('s') {
        let stem = &token[..token.len() - 1];
        if freq.contains_key(stem) {
            return stem.to_string();
        }
    }
    token.to_string()
}

/// Counts normalized by the record's total, as fractions in [0, 1].
///
/// An empty record is treated as total 1 so the division is always defined.
pub fn relative_frequencies(freq: &Frequency) -> HashMap<String, f64> {
    let total = freq.values().sum::<u64>().max(1) as f64;
    freq.iter()
        .map(|(token, &count)| (token.clone(), count as f64 / total))
        .collect()
}

/// One row of a comparison report.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    /// Singular (grouped) token.
    pub token: String,
    /// Relative frequency within its record, as a percentage.
    pub relative_pct: f64,
    /// Variant spellings folded into this token.
    pub grouped: Vec<String>,
}

/// Result of comparing two global records.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Total word count of the first record after grouping.
    pub total_a: u64,
    /// Total word count of the second record after grouping.
    pub total_b: u64,
    /// Top tokens occurring only in the first record, by relative frequency.
    pub unique_to_a: Vec<ComparisonRow>,
    /// Top tokens occurring only in the second record, by relative frequency.
    pub unique_to_b: Vec<ComparisonRow>,
}

/// Compare two global frequency maps.
///
/// Both sides are plural-grouped first, then each side's tokens absent from
/// the other are ranked by relative frequency (descending, ties broken by
/// ascending token) and truncated to `top_n`.
pub fn compare(a: &Frequency, b: &Frequency, top_n: usize) -> Comparison {
    let grouped_a = group_plurals(a);
    let grouped_b = group_plurals(b);

    let total_a = grouped_a.counts.values().sum();
    let total_b = grouped_b.counts.values().sum();

    let norm_a = relative_frequencies(&grouped_a.counts);
    let norm_b = relative_frequencies(&grouped_b.counts);

    let unique_to_a = unique_rows(&grouped_a, &grouped_b.counts, &norm_a, top_n);
    let unique_to_b = unique_rows(&grouped_b, &grouped_a.counts, &norm_b, top_n);

    Comparison {
        total_a,
        total_b,
        unique_to_a,
        unique_to_b,
    }
}

fn unique_rows(
    side: &GroupedFrequency,
    other: &Frequency,
    norm: &HashMap<String, f64>,
    top_n: usize,
) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = side
        .counts
        .keys()
        .filter(|token| !other.contains_key(*token))
        .map(|token| ComparisonRow {
            token: token.clone(),
            relative_pct: norm.get(token).copied().unwrap_or(0.0) * 100.0,
            grouped: side.variants.get(token).cloned().unwrap_or_default(),
        })
        .collect();

    rows.sort_by(|x, y| {
        y.relative_pct
            .total_cmp(&x.relative_pct)
            .then_with(|| x.token.cmp(&y.token))
    });
    rows.truncate(top_n);
    rows
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::freq::count_tokens;

    #[test]
    fn test_group_plurals_folds_trailing_s() {
        let freq = count_tokens(["risk", "risks", "risks", "model"]);
        let grouped = group_plurals(&freq);

        assert_eq!(grouped.counts.get("risk"), Some(&3));
        assert_eq!(grouped.counts.get("risks"), None);
        assert_eq!(grouped.counts.get("model"), Some(&1));
        assert_eq!(grouped.variants.get("risk"), Some(&vec!["risks".to_string()]));
    }

    #[test]
    fn test_group_plurals_keeps_plural_without_singular() {
        // "models" has no "model" entry to fold into.
        let freq = count_tokens(["models", "models"]);
        let grouped = group_plurals(&freq);

        assert_eq!(grouped.counts.get("models"), Some(&2));
        assert!(grouped.variants.is_empty());
    }

    #[test]
    fn test_group_plurals_irregulars() {
        let freq = count_tokens(["children", "child", "mice"]);
        let grouped = group_plurals(&freq);

        assert_eq!(grouped.counts.get("child"), Some(&2));
        assert_eq!(grouped.counts.get("mouse"), Some(&1));
        assert_eq!(grouped.counts.get("children"), None);
        assert_eq!(grouped.counts.get("mice"), None);
    }

    #[test]
    fn test_group_plurals_ignores_short_words() {
        // "gas" is too short for the trailing-s rule.
        let freq = count_tokens(["gas", "ga"]);
        let grouped = group_plurals(&freq);
        assert_eq!(grouped.counts.get("gas"), Some(&1));
    }

    #[test]
    fn test_relative_frequencies_sum_to_one() {
        let freq = count_tokens(["ai", "ai", "safety", "risk"]);
        let norm = relative_frequencies(&freq);

        let sum: f64 = norm.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(norm.get("ai"), Some(&0.5));
    }

    #[test]
    fn test_relative_frequencies_empty_record() {
        let norm = relative_frequencies(&Frequency::new());
        assert!(norm.is_empty());
    }

    #[test]
    fn test_compare_ranks_unique_tokens() {
        let a = count_tokens(["alignment", "alignment", "alignment", "oversight", "ai"]);
        let b = count_tokens(["compute", "ai"]);

        let comparison = compare(&a, &b, 10);

        let tokens_a: Vec<&str> = comparison
            .unique_to_a
            .iter()
            .map(|r| r.token.as_str())
            .collect();
        assert_eq!(tokens_a, vec!["alignment", "oversight"]);

        let tokens_b: Vec<&str> = comparison
            .unique_to_b
            .iter()
            .map(|r| r.token.as_str())
            .collect();
        assert_eq!(tokens_b, vec!["compute"]);

        assert_eq!(comparison.total_a, 5);
        assert_eq!(comparison.total_b, 2);
    }

    #[test]
    fn test_compare_truncates_to_top_n() {
        let a = count_tokens(["one", "two", "three", "four"]);
        let b = Frequency::new();

        let comparison = compare(&a, &b, 2);
        assert_eq!(comparison.unique_to_a.len(), 2);
    }

    #[test]
    fn test_compare_groups_before_diffing() {
        // "risks" in a folds into "risk", which b also has: not unique.
        let a = count_tokens(["risk", "risks"]);
        let b = count_tokens(["risk"]);

        let comparison = compare(&a, &b, 10);
        assert!(comparison.unique_to_a.is_empty());
    }
}
