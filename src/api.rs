//! The boundary with the generative model, with exponential backoff.
//!
//! The model itself is reached through whatever client the caller plugs in;
//! this module only defines the seams and what happens around them:
//! - [`AskAsync`]: single-shot text in, text out (article insights)
//! - [`ChatAsync`]: a [`ChatRequest`] in, a reply out (reader Q&A)
//! - [`RetryAsk`]: decorator that adds retry logic to any `AskAsync`
//! - [`ResponseFile`]: an `AskAsync` that replays a captured model response
//!
//! [`generate_insights`] and [`chat_with_model`] never fail: a failed call
//! becomes the fallback insight record or a fixed apology.
//!
//! # Retry Strategy
//!
//! - Configurable retry attempts
//! - Exponential backoff from a configurable base delay
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::insights::{InsightNormalizer, InsightRecord};
use crate::models::{Article, ChatMessage};
use crate::prompts::{self, ChatRequest};
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Reply shown to the reader when the chat model cannot be reached.
pub const CHAT_ERROR_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

/// Trait for async single-prompt model interaction.
pub trait AskAsync {
    /// The type of response returned by the model.
    type Response;

    /// Send text to the model and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>>;
}

/// Trait for async conversational model interaction.
pub trait ChatAsync {
    async fn send(&self, request: &ChatRequest) -> Result<String, Box<dyn Error>>;
}

/// Wrapper that adds exponential backoff retry logic to any [`AskAsync`] implementation.
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
///
/// Meant for network-backed clients, where a failed call can succeed on a
/// later attempt. Wrapping a local source such as [`ResponseFile`] only
/// repeats the same error, so the CLI's default `retry.max_retries` of 0
/// makes a single attempt.
pub struct RetryAsk<T> {
    /// The underlying client to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: AskAsync,
{
    /// Create a new retry wrapper around an existing [`AskAsync`] implementation.
    ///
    /// With `max_retries == 0` the inner client is called exactly once.
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX).min(16);
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + StdDuration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> AskAsync for RetryAsk<T>
where
    T: AskAsync + fmt::Debug,
{
    type Response = T::Response;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.ask(text).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis(),
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "ask() exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis(),
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "ask() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Replays a model response previously captured to disk.
///
/// A missing or unreadable file is reported as a failed call.
#[derive(Debug, Clone)]
pub struct ResponseFile {
    pub path: PathBuf,
}

impl AskAsync for ResponseFile {
    type Response = String;

    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    async fn ask(&self, _text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        info!(bytes = body.len(), "Loaded captured model response");
        Ok(body)
    }
}

/// Ask the model about `article` and normalize whatever comes back.
///
/// Never fails: when the call errors, the record is built from the
/// article's title and description alone.
#[instrument(level = "info", skip_all, fields(title = %article.title))]
pub async fn generate_insights<A>(
    client: &A,
    article: &Article,
    normalizer: &InsightNormalizer,
) -> InsightRecord
where
    A: AskAsync<Response = String>,
{
    let t0 = Instant::now();
    let prompt = prompts::article_insights(article);
    let fallback_text = article.fallback_text();

    match client.ask(&prompt).await {
        Ok(raw) => {
            info!(
                elapsed_ms = t0.elapsed().as_millis(),
                bytes = raw.len(),
                "Model responded"
            );
            normalizer.normalize(&raw, &fallback_text)
        }
        Err(e) => {
            error!(
                elapsed_ms = t0.elapsed().as_millis(),
                error = %e,
                "Error generating article insights; using fallback record"
            );
            normalizer.unavailable(&fallback_text)
        }
    }
}

/// Send a reader's message, with optional article context, to the chat model.
#[instrument(level = "info", skip_all, fields(history = previous.len()))]
pub async fn chat_with_model<C>(
    client: &C,
    previous: &[ChatMessage],
    user_message: &str,
    article: Option<&Article>,
) -> String
where
    C: ChatAsync,
{
    let request = prompts::chat_request(previous, user_message, article);
    match client.send(&request).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(
                error = %e,
                message = %truncate_for_log(user_message, 80),
                "Error chatting with model"
            );
            CHAT_ERROR_REPLY.to_string()
        }
    }
}
