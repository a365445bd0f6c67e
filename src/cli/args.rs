/// CLI argument definitions via clap derive.
use std::path::Path;

use clap::{Parser, ValueEnum};

use crate::article::{ArticleCompileOptions, Language, UnsupportedLanguage};

/// texarticle — compile LaTeX articles by key and languages.
#[derive(Debug, Parser)]
#[command(
    name = "texarticle",
    about = "Compile LaTeX articles by key and languages",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Folder with LaTeX files (article key).
    #[arg(short, long, value_name = "KEY", value_parser = valid_key)]
    pub key: String,

    /// Languages for compilation (default: all).
    #[arg(
        short,
        long,
        value_name = "LANG",
        num_args = 1..,
        value_parser = valid_language,
        default_values = Language::codes()
    )]
    pub languages: Vec<Language>,

    /// Output format for progress and result messages.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Print the compiler commands without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Log compiler invocations and timings to stderr.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Build the immutable options record for this invocation.
    #[must_use]
    pub fn to_options(&self) -> ArticleCompileOptions {
        ArticleCompileOptions::new(&self.key, self.languages.clone())
    }
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable messages, one per line.
    #[default]
    Text,
    /// One compact JSON object per event (NDJSON).
    Json,
}

/// Accept `value` only if it names an existing directory.
///
/// # Errors
///
/// Returns a message naming the value when it is missing or not a directory.
pub fn valid_key(value: &str) -> Result<String, String> {
    if Path::new(value).is_dir() {
        Ok(value.to_owned())
    } else {
        Err(format!(
            "Folder '{value}' does not exist or is not a directory"
        ))
    }
}

/// Accept `value` only if it is a supported language code.
///
/// # Errors
///
/// Returns `Unsupported language: <value>` for codes outside the registry.
pub fn valid_language(value: &str) -> Result<Language, String> {
    if !Language::is_valid(value) {
        return Err(UnsupportedLanguage {
            code: value.to_owned(),
        }
        .to_string());
    }
    value
        .parse()
        .map_err(|err: UnsupportedLanguage| err.to_string())
}
