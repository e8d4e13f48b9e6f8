//! # News Insights CLI
//!
//! Command-line front end for the `news_insights` library. Each subcommand
//! reads its inputs (captured model responses, saved NewsAPI payloads or
//! plain text), runs the library and prints JSON.
//!
//! ## Usage
//!
//! ```sh
//! news_insights insights --title "Fed holds rates" --description "..." --response reply.txt
//! news_insights trending --input top-headlines.json
//! ```

use chrono::Utc;
use clap::Parser;
use news_insights::api::{RetryAsk, ResponseFile, generate_insights};
use news_insights::cli::{ArticleArgs, Cli, Command};
use news_insights::config::InsightsConfig;
use news_insights::keywords::extract_keywords;
use news_insights::models::Article;
use news_insights::news::{self, NewsApiResponse};
use news_insights::outputs::{json, text};
use news_insights::prompts;
use news_insights::stopwords::StopWordProfile;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let config = InsightsConfig::load(args.config.as_deref()).await?;
    let output = args.output.as_deref();

    match args.command {
        Command::Insights { article, response } => {
            run_insights(&config, article, response, output).await?
        }
        Command::Keywords {
            text,
            file,
            profile,
            limit,
        } => run_keywords(&config, text, file, profile, limit, output).await?,
        Command::Trending { input } => {
            let response = read_news_response(&input).await?;
            let topics = news::trending_topics(
                &response.articles,
                &config.stop_words(StopWordProfile::Headlines),
                config.trending_keyword_limit,
                config.max_trending_topics,
            );
            info!(topics = topics.len(), "Built trending topics");
            json::write_json(&topics, output).await?;
        }
        Command::Articles { input, category } => {
            let response = read_news_response(&input).await?;
            let articles = news::articles(response, category.as_deref());
            let cards = news::article_cards(articles, Utc::now());
            info!(count = cards.len(), "Listed articles");
            json::write_json(&cards, output).await?;
        }
        Command::Related { input, url } => {
            let response = read_news_response(&input).await?;
            let related = news::related_articles(response.articles, &url, config.related_limit);
            info!(
                count = related.len(),
                query = %news::search_query_from_url(&url),
                "Selected related articles"
            );
            json::write_json(&related, output).await?;
        }
        Command::Prompt { article } => {
            let prompt = prompts::article_insights(&to_article(article));
            text::write_text(&prompt, output).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

fn to_article(args: ArticleArgs) -> Article {
    let content = if args.content.is_empty() {
        args.description.clone()
    } else {
        args.content
    };
    Article {
        title: args.title,
        description: args.description,
        content,
        ..Default::default()
    }
}

#[instrument(level = "info", skip_all)]
async fn run_insights(
    config: &InsightsConfig,
    article: ArticleArgs,
    response: Option<PathBuf>,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let article = to_article(article);
    let normalizer = config.normalizer();

    let record = match response {
        Some(path) => {
            let client = RetryAsk::new(
                ResponseFile { path },
                config.retry.max_retries,
                config.retry.base_delay(),
            );
            generate_insights(&client, &article, &normalizer).await
        }
        None => {
            warn!("No model response supplied; using fallback insights");
            normalizer.unavailable(&article.fallback_text())
        }
    };

    info!(
        sentiment = %record.sentiment,
        key_points = record.key_points.len(),
        keywords = record.keywords.len(),
        "Generated insights"
    );
    json::write_json(&record, output).await
}

#[instrument(level = "info", skip_all, fields(%profile))]
async fn run_keywords(
    config: &InsightsConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    profile: StopWordProfile,
    limit: Option<usize>,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path).await?,
        (None, None) => return Err("either --text or --file is required".into()),
    };

    let default_limit = match profile {
        StopWordProfile::Insights => config.keyword_limit,
        StopWordProfile::Headlines => config.trending_keyword_limit,
    };
    let keywords = extract_keywords(
        &text,
        &config.stop_words(profile),
        limit.unwrap_or(default_limit),
    );
    info!(count = keywords.len(), "Extracted keywords");
    json::write_json(&keywords, output).await
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
async fn read_news_response(path: &Path) -> Result<NewsApiResponse, Box<dyn Error>> {
    let body = tokio::fs::read_to_string(path).await?;
    let response: NewsApiResponse = serde_json::from_str(&body)?;
    if let Some(status) = response.status.as_deref().filter(|s| *s != "ok") {
        warn!(status, "News API response did not report ok");
    }
    info!(
        articles = response.articles.len(),
        total_results = ?response.total_results,
        "Loaded news API response"
    );
    Ok(response)
}
