//! Stop-word sets used by keyword ranking.
//!
//! Two named configurations exist because article insights and headline
//! grouping were tuned separately:
//!
//! | Profile | Constructor | Words |
//! |---------|-------------|-------|
//! | Insights | [`StopWords::insights`] | [`BASE_STOP_WORDS`] (32) |
//! | Headlines | [`StopWords::headlines`] | base + [`HEADLINE_STOP_WORDS`] (46) |
//!
//! Both are built from the shared constants below; callers may layer a
//! [`StopWordOverride`] from the YAML config on top of either profile.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Articles, prepositions, pronouns and auxiliaries shared by every profile.
pub const BASE_STOP_WORDS: &[&str] = &[
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "of", "with", "by", "as", "is", "are",
    "was", "were", "be", "this", "that", "it", "from", "or", "but", "not", "what", "all", "about",
    "who", "which", "when", "there",
];

/// Words that are noise in wire-service headlines but not in article bodies.
pub const HEADLINE_STOP_WORDS: &[&str] = &[
    "new", "more", "their", "has", "will", "one", "after", "said", "would", "have", "they", "you",
    "been", "its",
];

/// Which built-in stop-word configuration a call site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordProfile {
    /// Fallback keywords for article insights.
    #[default]
    Insights,
    /// Trending-topic keywords built from headline titles.
    Headlines,
}

impl fmt::Display for StopWordProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopWordProfile::Insights => f.write_str("insights"),
            StopWordProfile::Headlines => f.write_str("headlines"),
        }
    }
}

impl FromStr for StopWordProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insights" => Ok(StopWordProfile::Insights),
            "headlines" => Ok(StopWordProfile::Headlines),
            other => Err(format!("unknown stop-word profile: {other}")),
        }
    }
}

/// Additions and removals applied on top of a named profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopWordOverride {
    /// Words to exclude in addition to the profile.
    pub extra: Vec<String>,
    /// Profile words to count after all.
    pub remove: Vec<String>,
}

/// A set of lowercase words excluded from frequency counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build a set from arbitrary words. Entries are lower-cased and trimmed.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// The 32-word set used when article insights need fallback keywords.
    pub fn insights() -> Self {
        Self::new(BASE_STOP_WORDS.iter().copied())
    }

    /// The 46-word set used when ranking words across headline titles.
    pub fn headlines() -> Self {
        Self::new(BASE_STOP_WORDS.iter().chain(HEADLINE_STOP_WORDS).copied())
    }

    pub fn for_profile(profile: StopWordProfile) -> Self {
        match profile {
            StopWordProfile::Insights => Self::insights(),
            StopWordProfile::Headlines => Self::headlines(),
        }
    }

    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in extra {
            let w = w.as_ref().trim().to_lowercase();
            if !w.is_empty() {
                self.words.insert(w);
            }
        }
        self
    }

    pub fn without<I, S>(mut self, remove: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in remove {
            self.words.remove(&w.as_ref().trim().to_lowercase());
        }
        self
    }

    /// Apply a config override: additions first, then removals.
    pub fn apply(self, over: &StopWordOverride) -> Self {
        self.with_extra(&over.extra).without(&over.remove)
    }

    /// `word` must already be lower-case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::insights()
    }
}
