/// Diagnostic logging to stderr via `tracing`.
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `warn`, or at
/// `debug` when `--debug` is set.
pub fn init(debug: bool) {
    let fallback = if debug {
        "texarticle=debug"
    } else {
        "texarticle=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
