/// Serializable report types written to stdout and stderr.
///
/// The compiler emits a [`CompileEvent`] for every message it reports; the
/// CLI layer renders it either as a human-readable line or as JSON.
use std::fmt;

use serde::Serialize;

use crate::article::{CompileError, Language};

/// One reportable step of compiling an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CompileEvent {
    /// A source file is about to be compiled.
    Compiling {
        /// Language being compiled.
        language: Language,
        /// Source file path.
        path: String,
    },
    /// A pass that would run, printed instead of running under `--dry-run`.
    Planned {
        language: Language,
        path: String,
        /// 1-based pass number.
        pass: u8,
        /// Program followed by its arguments.
        command: Vec<String>,
    },
    /// Every pass finished with exit code 0.
    Compiled {
        language: Language,
        path: String,
        /// Expected artifact file name (e.g. `paper1_en.pdf`).
        artifact: String,
        /// Directory the compiler was told to write into.
        output_dir: String,
    },
    /// The language was skipped or its compilation failed.
    Failed {
        language: Language,
        path: String,
        /// Machine-readable error code (snake_case).
        code: &'static str,
        /// Human-readable message.
        message: String,
        /// Pass that failed, when a pass ran at all.
        #[serde(skip_serializing_if = "Option::is_none")]
        pass: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stdout: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stderr: Option<String>,
    },
}

impl CompileEvent {
    /// Build a `Failed` event for `language` from a compile error.
    #[must_use]
    pub fn failed(language: Language, err: &CompileError) -> Self {
        let (path, pass, exit_code, stdout, stderr) = match err {
            CompileError::PassFailed {
                path,
                pass,
                exit_code,
                stdout,
                stderr,
            } => (
                path,
                Some(*pass),
                *exit_code,
                Some(stdout.clone()),
                Some(stderr.clone()),
            ),
            CompileError::MissingSource { path, .. }
            | CompileError::Launch { path, .. }
            | CompileError::OutputDir { path, .. } => (path, None, None, None, None),
        };
        Self::Failed {
            language,
            path: path.display().to_string(),
            code: err.code(),
            message: err.to_string(),
            pass,
            exit_code,
            stdout,
            stderr,
        }
    }
}

impl fmt::Display for CompileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compiling { path, .. } => write!(f, "Compiling {path}..."),
            Self::Planned { pass, command, .. } => {
                write!(f, "[dry-run] pass {pass}: {}", command.join(" "))
            }
            Self::Compiled {
                artifact,
                output_dir,
                ..
            } => write!(f, "Successfully compiled: {artifact} to {output_dir} folder"),
            Self::Failed { message, .. } => f.write_str(message),
        }
    }
}

/// A structured error envelope for fatal errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `CompileError`.
    #[must_use]
    pub fn from_compile_error(err: &CompileError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
