//! YAML configuration for keyword limits, stop-word overrides and retries.
//!
//! Every field has a default, so an empty file (or no file at all) behaves
//! exactly like the built-in settings:
//!
//! ```yaml
//! keyword_limit: 7
//! trending_keyword_limit: 5
//! max_trending_topics: 4
//! related_limit: 3
//! stop_words:
//!   insights:
//!     extra: [reuters]
//!   headlines:
//!     remove: [new]
//! retry:
//!   max_retries: 0
//!   base_delay_ms: 1000
//! ```

use crate::insights::{DEFAULT_KEYWORD_LIMIT, InsightNormalizer};
use crate::stopwords::{StopWordOverride, StopWordProfile, StopWords};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopWordConfig {
    pub insights: StopWordOverride,
    pub headlines: StopWordOverride,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Keywords kept per article insight.
    pub keyword_limit: usize,
    /// Keywords kept per trending topic.
    pub trending_keyword_limit: usize,
    pub max_trending_topics: usize,
    pub related_limit: usize,
    pub stop_words: StopWordConfig,
    pub retry: RetryConfig,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            trending_keyword_limit: 5,
            max_trending_topics: 4,
            related_limit: 3,
            stop_words: StopWordConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl InsightsConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a config file; `None` yields the defaults.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// The named stop-word set with this config's overrides applied.
    pub fn stop_words(&self, profile: StopWordProfile) -> StopWords {
        let over = match profile {
            StopWordProfile::Insights => &self.stop_words.insights,
            StopWordProfile::Headlines => &self.stop_words.headlines,
        };
        StopWords::for_profile(profile).apply(over)
    }

    pub fn normalizer(&self) -> InsightNormalizer {
        InsightNormalizer::new(
            self.stop_words(StopWordProfile::Insights),
            self.keyword_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(InsightsConfig::from_yaml("").unwrap(), InsightsConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
keyword_limit: 4
stop_words:
  headlines:
    extra: [Reuters]
    remove: [new]
retry:
  max_retries: 2
"#;
        let config = InsightsConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.keyword_limit, 4);
        assert_eq!(config.trending_keyword_limit, 5);
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.retry.base_delay(), Duration::from_millis(1000));

        let headlines = config.stop_words(StopWordProfile::Headlines);
        assert!(headlines.contains("reuters"));
        assert!(!headlines.contains("new"));
        assert_eq!(config.stop_words(StopWordProfile::Insights), StopWords::insights());
        assert_eq!(config.normalizer().keyword_limit(), 4);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(InsightsConfig::from_yaml("keyword_limit: [1, 2").is_err());
    }

    #[tokio::test]
    async fn test_load_without_path() {
        let config = InsightsConfig::load(None).await.unwrap();
        assert_eq!(config, InsightsConfig::default());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let missing = Path::new("/nonexistent/news_insights/config.yaml");
        assert!(InsightsConfig::load(Some(missing)).await.is_err());
    }
}
