//! Global aggregation: folding per-page frequencies into one document-wide
//! table.

use tracing::trace;

use crate::error::ParseError;
use crate::freq::Frequency;

/// Folds per-page frequency maps into a single global map.
///
/// Owns one running map for the duration of a single run; no state survives
/// `finish`. Accumulation is token-wise addition, so the result is identical
/// regardless of the order pages are folded in.
#[derive(Debug, Default)]
pub struct Aggregator {
    totals: Frequency,
}

impl Aggregator {
    /// Create an aggregator with an empty running map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one page's counts into the running totals.
    pub fn fold_page(&mut self, freq: &Frequency) {
        for (token, count) in freq {
            *self.totals.entry(token.clone()).or_insert(0) += count;
        }
    }

    /// Consume the aggregator and return the global frequency map.
    pub fn finish(self) -> Frequency {
        self.totals
    }
}

/// Fold an entire per-page record sequence into a global frequency map.
///
/// Propagates the first parse failure; a bad page is never skipped, since
/// that would silently break the sum invariant. An empty sequence yields an
/// empty map.
pub fn aggregate_record<I>(pages: I) -> Result<Frequency, ParseError>
where
    I: IntoIterator<Item = Result<(u32, Frequency), ParseError>>,
{
    let mut aggregator = Aggregator::new();
    for entry in pages {
        let (page, freq) = entry?;
        trace!("folding page {} ({} distinct tokens)", page, freq.len());
        aggregator.fold_page(&freq);
    }
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::freq::count_tokens;

    fn sample_pages() -> Vec<Frequency> {
        vec![
            count_tokens(["ai", "safety", "ai"]),
            count_tokens(["safety"]),
            count_tokens(["risk", "ai"]),
        ]
    }

    #[test]
    fn test_global_counts_equal_sum_of_pages() {
        let pages = sample_pages();

        let mut aggregator = Aggregator::new();
        for page in &pages {
            aggregator.fold_page(page);
        }
        let global = aggregator.finish();

        for token in ["ai", "safety", "risk"] {
            let expected: u64 = pages.iter().map(|p| p.get(token).copied().unwrap_or(0)).sum();
            assert_eq!(global.get(token).copied().unwrap_or(0), expected);
        }
        assert_eq!(global.len(), 3);
    }

    #[test]
    fn test_fold_order_does_not_change_result() {
        let pages = sample_pages();

        let mut forward = Aggregator::new();
        for page in &pages {
            forward.fold_page(page);
        }

        let mut reversed = Aggregator::new();
        for page in pages.iter().rev() {
            reversed.fold_page(page);
        }

        assert_eq!(forward.finish(), reversed.finish());
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let global = aggregate_record(Vec::new()).unwrap();
        assert!(global.is_empty());
    }

    #[test]
    fn test_empty_pages_contribute_nothing() {
        let mut aggregator = Aggregator::new();
        aggregator.fold_page(&Frequency::new());
        aggregator.fold_page(&count_tokens(["ai"]));
        aggregator.fold_page(&Frequency::new());

        assert_eq!(aggregator.finish(), count_tokens(["ai"]));
    }

    #[test]
    fn test_aggregate_record_propagates_parse_failure() {
        let pages = vec![
            Ok((1, count_tokens(["ai"]))),
            Err(ParseError::BadEntry {
                line: 3,
                content: "broken".to_string(),
            }),
        ];

        let err = aggregate_record(pages).unwrap_err();
        assert!(matches!(err, ParseError::BadEntry { line: 3, .. }));
    }
}
