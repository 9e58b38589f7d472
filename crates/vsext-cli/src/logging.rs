use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber that writes to stderr.
///
/// `RUST_LOG` takes precedence when set; otherwise `debug` with `--verbose`
/// and `info` without it. Stdout stays reserved for command output.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
