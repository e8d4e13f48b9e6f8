//! Data models shared by the news, prompt and AI-call layers.
//!
//! This module defines the trusted, already-shaped records:
//! - [`Article`]: a news article after it has been cleaned up from the news API
//! - [`TrendingTopic`]: a category that several headlines fall under
//! - [`ChatMessage`]: one turn of a reader's conversation about an article
//! - [`ArticleCard`]: an article plus its human-readable age, for listings
//!
//! JSON field names follow the camelCase names used by the web front end.

use serde::{Deserialize, Serialize};

/// Where an article was published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: String,
}

/// A news article ready to be displayed or sent to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    pub author: Option<String>,
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp as reported by the news API.
    pub published_at: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Article {
    /// Title and description joined with a space: the text keyword fallback runs over.
    pub fn fallback_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A category with enough headlines to be shown as trending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub article_count: usize,
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// An article as listed on a front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCard {
    #[serde(flatten)]
    pub article: Article,
    /// e.g. `"3 hours ago"`; `None` when `publishedAt` does not parse.
    pub published_ago: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            source: Source {
                id: Some("reuters".to_string()),
                name: "Reuters".to_string(),
            },
            author: None,
            title: "Markets rally".to_string(),
            description: "Stocks climbed on Friday".to_string(),
            url: "https://example.com/business/markets-rally".to_string(),
            url_to_image: None,
            published_at: "2025-05-06T14:30:00Z".to_string(),
            content: "Stocks climbed on Friday after...".to_string(),
            category: Some("business".to_string()),
            ai_summary: None,
            keywords: None,
        }
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let json = serde_json::to_string(&sample_article()).unwrap();
        assert!(json.contains("\"urlToImage\":null"));
        assert!(json.contains("\"publishedAt\":\"2025-05-06T14:30:00Z\""));
        assert!(json.contains("\"category\":\"business\""));
        assert!(!json.contains("aiSummary"));
    }

    #[test]
    fn test_fallback_text_joins_title_and_description() {
        assert_eq!(
            sample_article().fallback_text(),
            "Markets rally Stocks climbed on Friday"
        );
    }

    #[test]
    fn test_chat_message_roles_round_trip() {
        let json = r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#;
        let msgs: Vec<ChatMessage> = serde_json::from_str(json).unwrap();
        assert_eq!(msgs[0], ChatMessage::user("hi"));
        assert_eq!(msgs[1], ChatMessage::assistant("hello"));
    }

    #[test]
    fn test_article_card_flattens_article() {
        let card = ArticleCard {
            article: sample_article(),
            published_ago: Some("2 hours ago".to_string()),
        };
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["title"], "Markets rally");
        assert_eq!(value["publishedAgo"], "2 hours ago");
    }

    #[test]
    fn test_trending_topic_serialization() {
        let topic = TrendingTopic {
            id: "sports".to_string(),
            title: "Sports".to_string(),
            description: "Latest news and updates about sports".to_string(),
            category: "Sports".to_string(),
            keywords: vec!["final".to_string()],
            article_count: 3,
        };
        let json = serde_json::to_string(&topic).unwrap();
        assert!(json.contains("\"articleCount\":3"));
    }
}
