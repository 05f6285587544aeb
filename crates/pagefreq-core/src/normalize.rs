//! Token normalization: lowercasing, punctuation stripping, and stopword
//! filtering.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

/// Default English stopword list, embedded at build time.
const ENGLISH_STOPWORDS: &str = include_str!("stopwords/english.txt");

lazy_static! {
    // Anything that is neither a word character nor whitespace.
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// A set of tokens excluded from counting by policy.
///
/// Membership is tested on already-normalized tokens, by exact value.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// An empty set: nothing is filtered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The embedded default English list.
    pub fn english() -> Self {
        Self::from_newline_separated(ENGLISH_STOPWORDS)
    }

    /// Build a set from explicit words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    /// Load a set from a newline-separated file. Blank lines and lines
    /// starting with `#` are ignored.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut words = HashSet::new();
        for line in std::io::BufReader::new(file).lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(word.to_lowercase());
        }
        Ok(Self { words })
    }

    fn from_newline_separated(text: &str) -> Self {
        Self {
            words: text
                .lines()
                .map(str::trim)
                .filter(|w| !w.is_empty() && !w.starts_with('#'))
                .map(str::to_string)
                .collect(),
        }
    }

    /// Whether the token is a stopword.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Turns raw page text into an ordered sequence of normalized tokens.
///
/// Normalization lowercases the text, strips punctuation, splits on
/// whitespace, and drops stopwords and tokens shorter than the configured
/// minimum. Deterministic: the same text always yields the same sequence.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: StopwordSet,
    min_token_len: usize,
}

impl Normalizer {
    /// Create a normalizer with the given stopword set.
    pub fn new(stopwords: StopwordSet) -> Self {
        Self {
            stopwords,
            min_token_len: 1,
        }
    }

    /// Set the minimum token length; shorter tokens are dropped.
    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len.max(1);
        self
    }

    /// Normalize raw text into an ordered token sequence.
    ///
    /// Punctuation is removed before splitting, so "don't" becomes "dont"
    /// rather than two tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = PUNCTUATION.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|w| w.len() >= self.min_token_len)
            .filter(|w| !self.stopwords.contains(w))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(StopwordSet::english())
    }
}
