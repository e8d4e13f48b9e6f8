//! Prompt text sent to the generative model.

use crate::models::{Article, ChatMessage, ChatRole};
use serde::Serialize;

pub fn article_insights(article: &Article) -> String {
    format!(
        r#"Analyze the following news article and provide insights:

Title: {title}
Description: {description}
Content: {content}

Please provide the following in JSON format:
{{
  "summary": "A concise summary (2-3 sentences)",
  "keyPoints": ["3-5 key points from the article"],
  "keywords": ["5-7 relevant keywords"],
  "sentiment": "The overall sentiment (Positive, Negative, or Neutral)"
}}"#,
        title = article.title,
        description = article.description,
        content = article.content,
    )
}

/// Speaker labels the chat model understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    User,
    Model,
}

impl From<ChatRole> for ModelRole {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::User => ModelRole::User,
            ChatRole::Assistant => ModelRole::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: ModelRole,
    pub text: String,
}

/// Sampling settings for conversational replies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

/// Everything needed to send one chat message to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Prior turns; always starts with a user turn when non-empty.
    pub history: Vec<ChatTurn>,
    pub prompt: String,
    pub generation_config: GenerationConfig,
}

/// Shape a reader's question into a chat request.
///
/// The model requires history to open with a user turn. When the
/// conversation opens with an assistant greeting instead, the history is
/// dropped and the greeting is folded into the prompt as context.
pub fn chat_request(
    previous: &[ChatMessage],
    user_message: &str,
    article: Option<&Article>,
) -> ChatRequest {
    let (history, prompt) = match previous.first() {
        Some(first) if first.role == ChatRole::Assistant => {
            let context = &first.content;
            let prompt = match article {
                Some(a) => format!(
                    "{context}\n\nArticle context:\nTitle: {}\nSource: {}\nDescription: {}\n\nUser: {user_message}",
                    a.title, a.source.name, a.description
                ),
                None => format!("{context}\n\nUser: {user_message}"),
            };
            (Vec::new(), prompt)
        }
        _ => {
            let history = previous
                .iter()
                .map(|m| ChatTurn {
                    role: m.role.into(),
                    text: m.content.clone(),
                })
                .collect();
            let prompt = match article {
                Some(a) => format!(
                    "I'm asking about this article:\nTitle: {}\nSource: {}\nDescription: {}\n\nMy question is: {user_message}",
                    a.title, a.source.name, a.description
                ),
                None => user_message.to_string(),
            };
            (history, prompt)
        }
    };

    ChatRequest {
        history,
        prompt,
        generation_config: GenerationConfig::default(),
    }
}
