//! JSON output for subcommand results.
//!
//! Values are pretty-printed. When an output path is given, its parent
//! directory is created first and the file is overwritten.

use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

/// Serialize `value` as pretty JSON.
pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` to `path`, or to stdout when `path` is `None`.
#[instrument(level = "info", skip_all)]
pub async fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut json = to_pretty(value)?;
    json.push('\n');

    let Some(path) = path else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.flush().await?;
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(path = %path.display(), "Wrote JSON output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::normalize;

    #[test]
    fn test_to_pretty_is_indented() {
        let record = normalize(r#"{"summary": "S", "keyPoints": ["P"]}"#, "");
        let json = to_pretty(&record).unwrap();
        assert!(json.starts_with("{\n  \"summary\": \"S\""));
    }

    #[tokio::test]
    async fn test_write_json_to_file() {
        let dir = std::env::temp_dir().join(format!("news_insights_test_{}", std::process::id()));
        let path = dir.join("nested").join("out.json");
        write_json(&vec!["a", "b"], Some(&path)).await.unwrap();

        let written = fs::read_to_string(&path).await.unwrap();
        let back: Vec<String> = serde_json::from_str(&written).unwrap();
        assert_eq!(back, vec!["a", "b"]);

        let _ = fs::remove_dir_all(&dir).await;
    }
}
