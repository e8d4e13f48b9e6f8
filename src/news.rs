//! Shaping news API payloads into articles and trending topics.
//!
//! The HTTP calls themselves happen elsewhere; this module only works on the
//! decoded JSON. NewsAPI leaves many fields `null`, so [`NewsApiArticle`]
//! keeps everything optional and [`Article::from`] fills the gaps.

use crate::keywords::extract_keywords;
use crate::models::{Article, ArticleCard, Source, TrendingTopic};
use crate::stopwords::StopWords;
use crate::utils::{parse_timestamp, time_ago, upcase};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Categories recognised in article URLs, checked in this order.
pub const CATEGORIES: &[&str] = &[
    "world",
    "business",
    "technology",
    "science",
    "health",
    "sports",
    "entertainment",
    "politics",
];

/// Bucket for articles whose URL names no known category.
pub const GENERAL_CATEGORY: &str = "general";

const NO_DESCRIPTION: &str = "No description available";
const NO_CONTENT: &str = "No content available";

/// A NewsAPI `top-headlines` or `everything` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsApiResponse {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// One article exactly as NewsAPI reports it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsApiArticle {
    pub source: NewsApiSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl NewsApiArticle {
    fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

impl From<NewsApiArticle> for Article {
    fn from(raw: NewsApiArticle) -> Self {
        let description = non_empty(&raw.description);
        let content = non_empty(&raw.content)
            .or_else(|| description.clone())
            .unwrap_or_else(|| NO_CONTENT.to_string());
        let url = raw.url.clone().unwrap_or_default();

        Article {
            source: Source {
                id: raw.source.id,
                name: raw.source.name.unwrap_or_default(),
            },
            author: raw.author,
            title: raw.title.unwrap_or_default(),
            description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            category: category_from_url(&url).map(str::to_string),
            url,
            url_to_image: raw.url_to_image,
            published_at: raw.published_at.unwrap_or_default(),
            content,
            ai_summary: None,
            keywords: None,
        }
    }
}

/// The first known category that appears anywhere in `url`.
pub fn category_from_url(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    CATEGORIES.iter().copied().find(|c| lower.contains(*c))
}

/// Convert every article in a response, optionally keeping one category.
pub fn articles(response: NewsApiResponse, category: Option<&str>) -> Vec<Article> {
    response
        .articles
        .into_iter()
        .map(Article::from)
        .filter(|a| match category {
            Some(c) => a.category.as_deref() == Some(c),
            None => true,
        })
        .collect()
}

/// Attach a relative age to each article for listing.
pub fn article_cards(articles: Vec<Article>, now: DateTime<Utc>) -> Vec<ArticleCard> {
    articles
        .into_iter()
        .map(|article| {
            let published_ago = parse_timestamp(&article.published_at).map(|t| time_ago(t, now));
            ArticleCard {
                article,
                published_ago,
            }
        })
        .collect()
}

/// Group headlines by URL category and describe the busiest groups.
///
/// Groups keep the order in which their first article appeared. Only groups
/// with at least two articles qualify; at most `max_topics` are returned.
/// Keywords are ranked over the group's joined titles.
#[instrument(level = "info", skip_all, fields(articles = raw.len()))]
pub fn trending_topics(
    raw: &[NewsApiArticle],
    stop_words: &StopWords,
    keyword_limit: usize,
    max_topics: usize,
) -> Vec<TrendingTopic> {
    let mut groups: Vec<(&str, Vec<&NewsApiArticle>)> = Vec::new();
    for article in raw {
        let category = category_from_url(article.url()).unwrap_or(GENERAL_CATEGORY);
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, members)) => members.push(article),
            None => groups.push((category, vec![article])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(category, members)| {
            let titles = members
                .iter()
                .map(|a| a.title.as_deref().unwrap_or_default())
                .join(" ");
            let keywords = extract_keywords(&titles, stop_words, keyword_limit);
            debug!(category, count = members.len(), ?keywords, "Trending group");

            TrendingTopic {
                id: category.to_lowercase(),
                title: upcase(category),
                description: format!("Latest news and updates about {category}"),
                category: upcase(category),
                keywords,
                article_count: members.len(),
            }
        })
        .take(max_topics)
        .collect()
}

/// Build a search query from the slug at the end of an article URL.
///
/// `https://example.com/2025/05/fed-holds-rates-steady` gives
/// `"fed holds rates"`.
pub fn search_query_from_url(url: &str) -> String {
    let last_segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => url.rsplit('/').next().unwrap_or_default().to_string(),
    };
    last_segment.split('-').take(3).join(" ")
}

/// Articles related to `article_url`, excluding the article itself.
pub fn related_articles(
    candidates: Vec<NewsApiArticle>,
    article_url: &str,
    limit: usize,
) -> Vec<Article> {
    candidates
        .into_iter()
        .filter(|a| a.url() != article_url)
        .map(Article::from)
        .take(limit)
        .collect()
}

/// Pick the article with exactly this URL, else the best search hit.
pub fn find_by_url(candidates: Vec<NewsApiArticle>, url: &str) -> Option<Article> {
    let exact = candidates.iter().position(|a| a.url() == url);
    let index = match exact {
        Some(i) => i,
        None if !candidates.is_empty() => {
            debug!(%url, "No exact URL match; using first search result");
            0
        }
        None => return None,
    };
    candidates.into_iter().nth(index).map(Article::from)
}
