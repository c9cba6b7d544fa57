use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global `tracing` subscriber, writing to stderr so JSON reports
/// on stdout stay clean.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `warn`, `debug`
/// with `--verbose`, and only errors with `--quiet`.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn default_directive(verbose: bool, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    format!("listing_importer={}", level)
}
