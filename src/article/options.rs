/// The immutable options record handed to the compiler.
use super::Language;

/// LaTeX engine used for every article.
pub const DEFAULT_COMPILER: &str = "pdflatex";

/// What to compile for one invocation: an article key, the languages to
/// build and the compiler executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCompileOptions {
    key: String,
    languages: Vec<Language>,
    compiler: String,
}

impl ArticleCompileOptions {
    /// Build options for `key` using [`DEFAULT_COMPILER`].
    ///
    /// Trailing path separators on the key are dropped, so `paper1/` and
    /// `paper1` name the same article.
    #[must_use]
    pub fn new(key: &str, languages: Vec<Language>) -> Self {
        Self::with_compiler(key, languages, DEFAULT_COMPILER)
    }

    /// Build options with an explicit compiler executable.
    #[must_use]
    pub fn with_compiler(key: &str, languages: Vec<Language>, compiler: &str) -> Self {
        let trimmed = key.trim_end_matches(std::path::is_separator);
        let key = if trimmed.is_empty() { key } else { trimmed };
        Self {
            key: key.to_owned(),
            languages,
            compiler: compiler.to_owned(),
        }
    }

    /// The article key (folder name).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Languages to compile, in the order given.
    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Compiler executable name.
    #[must_use]
    pub fn compiler(&self) -> &str {
        &self.compiler
    }
}
