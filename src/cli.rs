//! Command-line interface definitions for News Insights.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Global options can also be provided via environment variables.

use crate::stopwords::StopWordProfile;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the News Insights application.
///
/// # Examples
///
/// ```sh
/// # Normalize a captured model response for an article
/// news_insights insights --title "Fed holds rates" --description "..." --response reply.txt
///
/// # Rank keywords in a file using the headline stop words
/// news_insights keywords --file headlines.txt --profile headlines --limit 5
///
/// # Build trending topics from a saved NewsAPI response
/// news_insights --config insights.yaml trending --input top-headlines.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, global = true, env = "NEWS_INSIGHTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// The article fields a prompt is built from.
#[derive(Args, Debug, Clone)]
pub struct ArticleArgs {
    /// Article headline
    #[arg(long)]
    pub title: String,

    /// Article description or standfirst
    #[arg(long, default_value = "")]
    pub description: String,

    /// Article body text
    #[arg(long, default_value = "")]
    pub content: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize a model response into summary, key points, keywords and sentiment
    Insights {
        #[command(flatten)]
        article: ArticleArgs,

        /// File holding the raw model response; missing means the call failed
        #[arg(short, long)]
        response: Option<PathBuf>,
    },

    /// Rank the most frequent words in a piece of text
    Keywords {
        /// Text to analyze
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// File whose contents should be analyzed
        #[arg(long)]
        file: Option<PathBuf>,

        /// Stop-word profile: insights or headlines
        #[arg(long, default_value_t = StopWordProfile::Insights)]
        profile: StopWordProfile,

        /// Maximum number of keywords (defaults to the configured keyword limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Group saved headlines into trending topics
    Trending {
        /// NewsAPI JSON response
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List articles from a saved NewsAPI response
    Articles {
        /// NewsAPI JSON response
        #[arg(short, long)]
        input: PathBuf,

        /// Only keep articles whose URL names this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Pick articles related to a URL from saved search results
    Related {
        /// NewsAPI JSON response for the search
        #[arg(short, long)]
        input: PathBuf,

        /// URL of the article being read
        #[arg(long)]
        url: String,
    },

    /// Print the insights prompt for an article
    Prompt {
        #[command(flatten)]
        article: ArticleArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_parsing() {
        let cli = Cli::parse_from([
            "news_insights",
            "insights",
            "--title",
            "Fed holds rates",
            "--response",
            "./reply.txt",
        ]);

        match cli.command {
            Command::Insights { article, response } => {
                assert_eq!(article.title, "Fed holds rates");
                assert_eq!(article.description, "");
                assert_eq!(response, Some(PathBuf::from("./reply.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_keywords_profile_and_limit() {
        let cli = Cli::parse_from([
            "news_insights",
            "keywords",
            "--text",
            "markets rally",
            "--profile",
            "headlines",
            "-l",
            "3",
        ]);

        match cli.command {
            Command::Keywords {
                text,
                profile,
                limit,
                ..
            } => {
                assert_eq!(text.as_deref(), Some("markets rally"));
                assert_eq!(profile, StopWordProfile::Headlines);
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_keywords_requires_input() {
        assert!(Cli::try_parse_from(["news_insights", "keywords"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "news_insights",
            "trending",
            "-i",
            "top.json",
            "--config",
            "insights.yaml",
            "-o",
            "out.json",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("insights.yaml")));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }
}
