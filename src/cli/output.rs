/// Output formatting: human text or NDJSON events, plus fatal error output.
use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::args::OutputFormat;
use crate::types::{CompileEvent, ErrorOutput};

/// Resolve the effective output format, handling the `--json` shorthand.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag { OutputFormat::Json } else { fmt }
}

/// Output context passed to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCtx {
    pub format: OutputFormat,
    /// When true, print planned passes instead of running them.
    pub dry_run: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, dry_run: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            dry_run,
        }
    }

    /// Start a named timer that logs its elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: impl Into<String>) -> DebugTimer {
        DebugTimer::new(label.into())
    }
}

impl Default for OutputCtx {
    fn default() -> Self {
        Self::new(OutputFormat::Text, false, false)
    }
}

/// Write one compile event to stdout.
pub fn write_event(event: &CompileEvent, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_compact_json(event),
        OutputFormat::Text => println!("{event}"),
    }
}

/// Write a fatal error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Text => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Only visible with `--debug` or a
/// matching `RUST_LOG` filter.
pub struct DebugTimer {
    label: String,
    start: Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: String) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!("{}: {ms:.2}ms", self.label);
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
