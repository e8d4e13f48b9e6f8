//! Output generation.
//!
//! Subcommands write either to stdout or to the file named by `--output`:
//!
//! - [`json`]: pretty-printed JSON for records, keyword lists and articles
//! - [`text`]: plain text, used for prompts

pub mod json;
pub mod text;
