/// Errors from the article domain layer.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::Language;

/// A language code outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language: {code}")]
pub struct UnsupportedLanguage {
    /// The rejected code, verbatim.
    pub code: String,
}

/// Errors that can occur while compiling an article.
///
/// Everything except [`CompileError::OutputDir`] is scoped to a single
/// source file: it is reported and the run moves on to the next language.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The expected `.tex` file for a language does not exist.
    #[error("File for language '{language}' not found: {}", path.display())]
    MissingSource {
        /// The requested language.
        language: Language,
        /// Where the source file was expected.
        path: PathBuf,
    },

    /// A compiler pass exited unsuccessfully.
    #[error("Compilation error for {}:\n{stdout}\n{stderr}", path.display())]
    PassFailed {
        /// Source file being compiled.
        path: PathBuf,
        /// 1-based pass number.
        pass: u8,
        /// Exit code, or `None` when the compiler was killed by a signal.
        exit_code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The compiler could not be started or talked to.
    #[error("Failed to run compiler for {}: {source}", path.display())]
    Launch {
        /// Source file being compiled.
        path: PathBuf,
        /// Underlying spawn / pipe error.
        #[source]
        source: io::Error,
    },

    /// The shared output directory could not be created.
    #[error("Cannot create output directory '{}': {source}", path.display())]
    OutputDir {
        /// The directory that was being created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    /// Machine-readable error code (`snake_case`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSource { .. } => "source_missing",
            Self::PassFailed { .. } => "compile_failed",
            Self::Launch { .. } => "launch_failed",
            Self::OutputDir { .. } => "output_dir_failed",
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutputDir { .. } => 74,
            Self::MissingSource { .. } | Self::PassFailed { .. } | Self::Launch { .. } => 1,
        }
    }
}
