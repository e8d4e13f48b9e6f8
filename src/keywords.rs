//! Frequency-ranked keyword extraction.
//!
//! Text is lower-cased and split into ASCII word runs (`[a-z0-9_]+`), so
//! accented letters act as separators. Words of three characters or fewer,
//! and words in the supplied [`StopWords`], are ignored.
//! The remaining words are ranked by count, highest first; ties keep the
//! order in which the words were first seen.

use crate::stopwords::StopWords;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9_]+").expect("valid word regex"));

/// Words shorter than or equal to this many characters never qualify.
pub const MIN_WORD_CHARS: usize = 3;

/// Lower-case `text` and return its ASCII word runs in order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count qualifying words, keeping first-encounter order.
pub fn word_frequencies(text: &str, stop_words: &StopWords) -> Vec<(String, usize)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut table: Vec<(String, usize)> = Vec::new();

    for word in tokenize(text) {
        if word.len() <= MIN_WORD_CHARS || stop_words.contains(&word) {
            continue;
        }
        if let Some(&i) = positions.get(&word) {
            table[i].1 += 1;
            continue;
        }
        positions.insert(word.clone(), table.len());
        table.push((word, 1));
    }
    table
}

/// Return up to `limit` of the most frequent qualifying words in `text`.
///
/// # Examples
///
/// ```
/// use news_insights::keywords::extract_keywords;
/// use news_insights::stopwords::StopWords;
///
/// let words = extract_keywords(
///     "breaking breaking news news market market",
///     &StopWords::insights(),
///     2,
/// );
/// assert_eq!(words, vec!["breaking", "news"]);
/// ```
pub fn extract_keywords(text: &str, stop_words: &StopWords, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }
    let mut table = word_frequencies(text, stop_words);
    // sort_by is stable, so equal counts stay in encounter order
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table.into_iter().take(limit).map(|(word, _)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_keeps_first_encounter() {
        let words = extract_keywords(
            "breaking breaking news news market market",
            &StopWords::insights(),
            2,
        );
        assert_eq!(words, vec!["breaking", "news"]);
    }

    #[test]
    fn test_higher_count_wins() {
        let words = extract_keywords(
            "Senate vote. Senate budget. Budget budget talks.",
            &StopWords::insights(),
            3,
        );
        assert_eq!(words, vec!["budget", "senate", "vote"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords("", &StopWords::insights(), 5).is_empty());
    }

    #[test]
    fn test_only_stop_words_and_short_words() {
        assert!(extract_keywords("a an the", &StopWords::insights(), 5).is_empty());
        assert!(extract_keywords("The cat sat on the mat.", &StopWords::insights(), 5).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        assert!(extract_keywords("markets rally strongly", &StopWords::insights(), 0).is_empty());
    }

    #[test]
    fn test_stop_words_excluded_case_insensitively() {
        let words = extract_keywords("ABOUT About about markets", &StopWords::insights(), 5);
        assert_eq!(words, vec!["markets"]);
    }

    #[test]
    fn test_headline_profile_drops_reporting_verbs() {
        let text = "Officials said would said would rally";
        assert_eq!(
            extract_keywords(text, &StopWords::insights(), 2),
            vec!["said", "would"]
        );
        assert_eq!(
            extract_keywords(text, &StopWords::headlines(), 2),
            vec!["officials", "rally"]
        );
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(
            tokenize("U.S.-China trade_deal, done!"),
            vec!["u", "s", "china", "trade_deal", "done"]
        );
    }

    #[test]
    fn test_frequency_table_in_encounter_order() {
        let table = word_frequencies("storm warning storm coast", &StopWords::insights());
        assert_eq!(
            table,
            vec![
                ("storm".to_string(), 2),
                ("warning".to_string(), 1),
                ("coast".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_accented_letters_split_words() {
        assert_eq!(
            tokenize("Café naïve São"),
            vec!["caf", "na", "ve", "s", "o"]
        );
        assert_eq!(
            extract_keywords("Café naïve São Paulo résumé", &StopWords::insights(), 7),
            vec!["paulo"]
        );
        assert!(extract_keywords("été", &StopWords::insights(), 1).is_empty());
    }

    #[test]
    fn test_uppercase_non_ascii_lowercased_before_split() {
        // "ÉLECTIONS" lower-cases to "élections", leaving "lections"
        assert_eq!(
            extract_keywords("ÉLECTIONS élections", &StopWords::insights(), 2),
            vec!["lections"]
        );
    }
}
