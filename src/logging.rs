//! Log output
//!
//! Diagnostics go to stderr so the hosted application's stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Default filter: `info`, or `debug` with `--verbose`
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "rtdep=debug,info" } else { "info" }
}

/// Install the global subscriber; `RUST_LOG` takes precedence over `verbose`
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .without_time()
        .try_init();
}
