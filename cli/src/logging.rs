use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Installs the error report handler and the global tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `info`) and `LOG_FORMAT=json` switches from
/// the human readable output to one JSON object per line. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_logging() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Read from `RUST_LOG` environment variable, with fallback to default
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().with_default_directive(Level::INFO.into()).parse("certstore=info"))?;

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        let fmt_layer =
            fmt::layer().json().with_target(true).with_file(true).with_line_number(true).with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(fmt_layer))?;
    } else {
        let fmt_layer =
            fmt::layer().with_target(true).with_file(true).with_line_number(true).with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(fmt_layer))?;
    }

    Ok(())
}
