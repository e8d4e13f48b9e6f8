//! Plain-text output, for results meant to be read or piped as-is.

use std::error::Error;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

#[instrument(level = "info", skip_all)]
pub async fn write_text(text: &str, path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut body = text.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }

    match path {
        Some(path) => {
            tokio::fs::write(path, body).await?;
            info!(path = %path.display(), "Wrote text output");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(body.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
