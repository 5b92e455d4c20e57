//! Keyword and language relevance filtering.

use super::keywords::DEFAULT_KEYWORDS;

/// Common English function words used as whole-token language markers.
pub const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "is", "in", "to", "of", "for", "a", "with", "that",
];

/// Minimum marker hits for text to count as English.
const MIN_ENGLISH_MARKERS: usize = 2;

/// Decides whether an entry is in scope.
///
/// Combines a case-insensitive keyword substring match with a crude
/// English heuristic over the concatenated title and description. Both
/// checks are intentionally cheap; this is a filter, not a classifier,
/// and false positives/negatives are accepted.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    /// Create a filter with a custom keyword set (matched lowercase).
    #[must_use]
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Accept iff the text both looks English and matches a keyword.
    #[must_use]
    pub fn is_relevant(&self, title: &str, description: &str) -> bool {
        let text = format!("{title} {description}").to_lowercase();
        self.matches_keyword(&text) && is_english(&text)
    }

    /// Substring match, not tokenized: "automate" matches inside
    /// "automated" and inside unrelated compound words.
    fn matches_keyword(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(ToString::to_string))
    }
}

/// Count the markers that occur as whole, space-delimited tokens.
#[must_use]
pub fn english_marker_count(text: &str) -> usize {
    let padded = format!(" {text} ");
    ENGLISH_MARKERS
        .iter()
        .filter(|marker| padded.contains(&format!(" {marker} ")))
        .count()
}

fn is_english(text: &str) -> bool {
    english_marker_count(text) >= MIN_ENGLISH_MARKERS
}
