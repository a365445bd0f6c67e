/// Two-pass `pdflatex` orchestration for one article.
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::runner::ProcessRunner;
use crate::article::{ArticleCompileOptions, CompileError, Language};
use crate::cli::{OutputCtx, write_event};
use crate::types::CompileEvent;

/// Shared output directory, relative to the root.
pub const OUTPUT_DIR_NAME: &str = "dist";
/// Extension of the source files.
pub const SOURCE_EXTENSION: &str = "tex";
/// Extension of the artifact the compiler is expected to produce.
pub const ARTIFACT_EXTENSION: &str = "pdf";
/// Compiler passes per file. The second pass resolves references and the
/// table of contents written by the first; it is not a retry.
pub const PASSES: u8 = 2;

/// Compiles every configured language of one article.
pub struct LatexCompiler<R> {
    options: ArticleCompileOptions,
    runner: R,
    ctx: OutputCtx,
    root: PathBuf,
}

impl<R: ProcessRunner> LatexCompiler<R> {
    /// Create a compiler rooted at the current working directory.
    #[must_use]
    pub fn new(options: ArticleCompileOptions, runner: R, ctx: OutputCtx) -> Self {
        Self {
            options,
            runner,
            ctx,
            root: PathBuf::new(),
        }
    }

    /// Resolve the key and output directory against `root` instead of the
    /// working directory.
    #[cfg(test)]
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// The options this compiler was built with.
    #[must_use]
    pub fn options(&self) -> &ArticleCompileOptions {
        &self.options
    }

    /// Directory the compiler writes its artifacts into.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR_NAME)
    }

    /// `<key>_<code>`, shared by the source and the artifact.
    fn file_stem(&self, language: Language) -> String {
        format!("{}_{}", self.options.key(), language.code())
    }

    /// Where the source for `language` is expected: `<key>/<key>_<code>.tex`.
    #[must_use]
    pub fn source_path(&self, language: Language) -> PathBuf {
        self.root.join(self.options.key()).join(format!(
            "{}.{SOURCE_EXTENSION}",
            self.file_stem(language)
        ))
    }

    /// Return the source path for `language` if the file exists.
    ///
    /// A missing file is reported and yields `None`.
    #[must_use]
    pub fn resolve_path(&self, language: Language) -> Option<PathBuf> {
        let path = self.source_path(language);
        if path.exists() {
            return Some(path);
        }
        let err = CompileError::MissingSource { language, path };
        self.emit(&CompileEvent::failed(language, &err));
        None
    }

    /// Compile the source for `language`, reporting the outcome.
    ///
    /// Returns `Ok(false)` when the source is missing, a pass fails or the
    /// compiler cannot be launched; all of those are reported first.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::OutputDir`] if the output directory cannot be
    /// created.
    pub fn compile_one(&self, language: Language) -> Result<bool, CompileError> {
        let Some(tex_path) = self.resolve_path(language) else {
            return Ok(false);
        };
        let output_dir = self.output_dir();
        let args = pass_args(&output_dir, &tex_path);
        let path = tex_path.display().to_string();

        if self.ctx.dry_run {
            let command: Vec<String> = std::iter::once(self.options.compiler().to_owned())
                .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
                .collect();
            for pass in 1..=PASSES {
                self.emit(&CompileEvent::Planned {
                    language,
                    path: path.clone(),
                    pass,
                    command: command.clone(),
                });
            }
            return Ok(true);
        }

        ensure_output_dir(&output_dir)?;
        self.emit(&CompileEvent::Compiling {
            language,
            path: path.clone(),
        });

        match self.run_passes(&tex_path, &args) {
            Ok(()) => {
                self.emit(&CompileEvent::Compiled {
                    language,
                    path,
                    artifact: format!("{}.{ARTIFACT_EXTENSION}", self.file_stem(language)),
                    output_dir: output_dir.display().to_string(),
                });
                Ok(true)
            }
            Err(err) => {
                self.emit(&CompileEvent::failed(language, &err));
                Ok(false)
            }
        }
    }

    /// Compile every configured language in order.
    ///
    /// Per-language outcomes are reported but not aggregated; a failed
    /// language never stops the next one.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::OutputDir`] if the output directory cannot be
    /// created.
    pub fn compile_all(&self) -> Result<(), CompileError> {
        for &language in self.options.languages() {
            self.compile_one(language)?;
        }
        Ok(())
    }

    /// Run every pass, stopping at the first unsuccessful one.
    fn run_passes(&self, tex_path: &Path, args: &[OsString]) -> Result<(), CompileError> {
        let compiler = self.options.compiler();
        for pass in 1..=PASSES {
            let _t = self
                .ctx
                .timer(format!("{compiler} pass {pass} on {}", tex_path.display()));
            debug!(compiler, pass, ?args, "running compiler");

            let output = self
                .runner
                .run(compiler, args)
                .map_err(|source| CompileError::Launch {
                    path: tex_path.to_path_buf(),
                    source,
                })?;
            debug!(pass, exit_code = ?output.exit_code, "compiler exited");

            if !output.success() {
                return Err(CompileError::PassFailed {
                    path: tex_path.to_path_buf(),
                    pass,
                    exit_code: output.exit_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                });
            }
        }
        Ok(())
    }

    fn emit(&self, event: &CompileEvent) {
        write_event(event, &self.ctx);
    }
}

/// Arguments for one compiler pass; identical for every pass.
fn pass_args(output_dir: &Path, tex_path: &Path) -> Vec<OsString> {
    let mut out_flag = OsString::from("-output-directory=");
    out_flag.push(output_dir);
    vec![
        OsString::from("-interaction=nonstopmode"),
        out_flag,
        tex_path.as_os_str().to_owned(),
    ]
}

/// Create `dir` unless it already exists. Parents are not created.
fn ensure_output_dir(dir: &Path) -> Result<(), CompileError> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(CompileError::OutputDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
