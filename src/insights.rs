//! Turning free-form model output into a complete [`InsightRecord`].
//!
//! The model is asked for a JSON object with `summary`, `keyPoints`,
//! `keywords` and `sentiment`, but it may wrap the object in a fenced code
//! block, surround it with prose, or emit something that is not valid JSON at
//! all. [`InsightNormalizer::normalize`] runs an ordered list of extraction
//! strategies and takes the first that yields a [`PartialInsights`]:
//!
//! 1. `fenced_block` - the interior of a ```` ```json ```` fence
//! 2. `bare_object` - the widest `{ ... }` span in the text
//! 3. `direct_parse` - the whole text as JSON
//! 4. `field_scrape` - regex scraping of each field; always succeeds
//!
//! The partial result is then merged against fixed defaults, so every field
//! of the returned record is populated. Missing keywords are filled from the
//! article's own title and description via [`extract_keywords`].

use crate::keywords::extract_keywords;
use crate::stopwords::StopWords;
use crate::utils::{looks_truncated, truncate_for_log};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Used when no summary could be recovered from the model output.
pub const DEFAULT_SUMMARY: &str = "Unable to generate summary.";
/// Used when the model could not be reached at all.
pub const UNAVAILABLE_SUMMARY: &str = "Unable to generate summary at this time.";
/// Sole key point when none could be recovered.
pub const DEFAULT_KEY_POINT: &str = "Error analyzing article content.";
/// Keywords kept per article.
pub const DEFAULT_KEYWORD_LIMIT: usize = 7;

static FENCED_JSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)```").expect("valid fence regex"));
static BARE_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"));
static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)summary["\s:]+([^"]+)"#).expect("valid summary regex"));
static KEY_POINTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)keyPoints["\s:]+\[(.*?)\]"#).expect("valid keyPoints regex"));
static KEYWORDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)keywords["\s:]+\[(.*?)\]"#).expect("valid keywords regex"));
static SENTIMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)sentiment["\s:]+([^"]+)"#).expect("valid sentiment regex"));

/// Overall tone of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Map a model-supplied label onto the closed set.
    ///
    /// Only the leading word is considered, case-insensitively; anything
    /// other than "positive" or "negative" is [`Sentiment::Neutral`].
    pub fn coerce(raw: &str) -> Sentiment {
        let word: String = raw
            .trim_start_matches(|c: char| !c.is_alphabetic())
            .chars()
            .take_while(|c| c.is_alphabetic())
            .collect();
        match word.to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

/// AI-generated insights for one article. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    pub summary: String,
    pub key_points: Vec<String>,
    /// Most relevant first.
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
}

/// Whatever could be pulled out of untrusted model output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialInsights {
    pub summary: Option<String>,
    pub key_points: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub sentiment: Option<String>,
}

type Strategy = fn(&str) -> Option<PartialInsights>;

const STRATEGIES: [(&str, Strategy); 4] = [
    ("fenced_block", from_fenced_block),
    ("bare_object", from_bare_object),
    ("direct_parse", from_direct_parse),
    ("field_scrape", from_field_scrape),
];

fn from_fenced_block(text: &str) -> Option<PartialInsights> {
    let inner = FENCED_JSON_RE.captures(text)?.get(1)?.as_str();
    parse_json_object(inner)
}

fn from_bare_object(text: &str) -> Option<PartialInsights> {
    let span = BARE_OBJECT_RE.find(text)?.as_str();
    parse_json_object(span)
}

fn from_direct_parse(text: &str) -> Option<PartialInsights> {
    parse_json_object(text)
}

fn from_field_scrape(text: &str) -> Option<PartialInsights> {
    Some(PartialInsights {
        summary: capture(&SUMMARY_RE, text).map(|s| s.trim().to_string()),
        key_points: capture(&KEY_POINTS_RE, text).map(split_scraped_list),
        keywords: capture(&KEYWORDS_RE, text).map(split_scraped_list),
        sentiment: capture(&SENTIMENT_RE, text).map(|s| s.trim().to_string()),
    })
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Split a scraped `[...]` interior on commas, dropping quotes and blanks.
fn split_scraped_list(region: &str) -> Vec<String> {
    region
        .split(',')
        .map(|item| item.replace('"', "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_json_object(candidate: &str) -> Option<PartialInsights> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(value) => partial_from_value(&value),
        Err(e) => {
            debug!(
                error = %e,
                truncated = looks_truncated(&e),
                candidate = %truncate_for_log(candidate, 120),
                "Candidate is not valid JSON"
            );
            None
        }
    }
}

fn partial_from_value(value: &Value) -> Option<PartialInsights> {
    let obj = value.as_object()?;
    Some(PartialInsights {
        summary: obj
            .get("summary")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string()),
        key_points: obj.get("keyPoints").and_then(string_list),
        keywords: obj.get("keywords").and_then(string_list),
        sentiment: obj
            .get("sentiment")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string()),
    })
}

/// Accept an array of strings, or a single comma-separated string.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) => Some(split_scraped_list(s)),
        _ => None,
    }
}

/// Normalizes model output into an [`InsightRecord`].
#[derive(Debug, Clone)]
pub struct InsightNormalizer {
    stop_words: StopWords,
    keyword_limit: usize,
}

impl Default for InsightNormalizer {
    fn default() -> Self {
        Self::new(StopWords::insights(), DEFAULT_KEYWORD_LIMIT)
    }
}

impl InsightNormalizer {
    pub fn new(stop_words: StopWords, keyword_limit: usize) -> Self {
        Self {
            stop_words,
            keyword_limit,
        }
    }

    pub fn keyword_limit(&self) -> usize {
        self.keyword_limit
    }

    /// Run the extraction strategies over `raw` and fill any gaps.
    ///
    /// `fallback_text` (usually title and description) is only used when the
    /// model supplied no keywords.
    #[instrument(level = "debug", skip_all, fields(raw_len = raw.len()))]
    pub fn normalize(&self, raw: &str, fallback_text: &str) -> InsightRecord {
        let (strategy, partial) = STRATEGIES
            .iter()
            .find_map(|(name, strategy)| strategy(raw).map(|p| (*name, p)))
            .unwrap_or(("none", PartialInsights::default()));

        if strategy == "field_scrape" {
            warn!(
                preview = %truncate_for_log(raw, 200),
                "Model output was not JSON; scraped fields instead"
            );
        } else {
            debug!(strategy, "Parsed model output");
        }

        self.assemble(partial, fallback_text)
    }

    /// The record returned when no model output could be obtained.
    pub fn unavailable(&self, fallback_text: &str) -> InsightRecord {
        InsightRecord {
            summary: UNAVAILABLE_SUMMARY.to_string(),
            key_points: vec![DEFAULT_KEY_POINT.to_string()],
            keywords: extract_keywords(fallback_text, &self.stop_words, self.keyword_limit),
            sentiment: Sentiment::Neutral,
        }
    }

    fn assemble(&self, partial: PartialInsights, fallback_text: &str) -> InsightRecord {
        let summary = partial
            .summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

        let key_points = partial
            .key_points
            .filter(|points| !points.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_KEY_POINT.to_string()]);

        let keywords = match partial.keywords.filter(|k| !k.is_empty()) {
            Some(mut words) => {
                words.truncate(self.keyword_limit);
                words
            }
            None => {
                debug!("No keywords from model; ranking fallback text");
                extract_keywords(fallback_text, &self.stop_words, self.keyword_limit)
            }
        };

        let sentiment = partial
            .sentiment
            .as_deref()
            .map(Sentiment::coerce)
            .unwrap_or_default();

        InsightRecord {
            summary,
            key_points,
            keywords,
            sentiment,
        }
    }
}

/// Normalize with the insights stop-word profile and a limit of seven keywords.
pub fn normalize(raw: &str, fallback_text: &str) -> InsightRecord {
    InsightNormalizer::default().normalize(raw, fallback_text)
}
