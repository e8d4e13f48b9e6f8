//! # News Insights
//!
//! Turns the free-form text a generative model returns about a news article
//! into a complete, typed insight record, and ranks the most frequent words
//! in headlines and articles.
//!
//! ## Modules
//!
//! - [`insights`]: layered JSON / regex extraction with default filling
//! - [`keywords`]: frequency-ranked keyword extraction
//! - [`stopwords`]: the shared stop-word sets and their named profiles
//! - [`news`]: shaping NewsAPI payloads into articles and trending topics
//! - [`prompts`]: prompt text for insights and reader chat
//! - [`api`]: the model-call seams, retry decorator and never-failing wrappers
//! - [`config`]: YAML configuration
//!
//! ## Example
//!
//! ```
//! use news_insights::insights::{normalize, Sentiment};
//!
//! let raw = "Here you go:\n```json\n{\"summary\": \"Rates held.\", \"sentiment\": \"Neutral\"}\n```";
//! let record = normalize(raw, "Central bank holds rates steady");
//! assert_eq!(record.summary, "Rates held.");
//! assert_eq!(record.sentiment, Sentiment::Neutral);
//! assert_eq!(record.keywords, vec!["central", "bank", "holds", "rates", "steady"]);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod insights;
pub mod keywords;
pub mod models;
pub mod news;
pub mod outputs;
pub mod prompts;
pub mod stopwords;
pub mod utils;
