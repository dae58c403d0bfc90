use tracing_subscriber::EnvFilter;

/// Initialize structured logging with `RUST_LOG` support.
///
/// Defaults to `dropfinder=info`, or `dropfinder=debug` when `verbose` is
/// set. Logs go to stderr so they never mix with result output. Safe to call
/// more than once.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "dropfinder=debug"
    } else {
        "dropfinder=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
