use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("broadcaster=debug,info")
        } else {
            EnvFilter::new("broadcaster=info,warn")
        }
    })
}

/// Errors go to stderr, everything else to stdout.
pub fn init_logger(verbose: bool, format: LogFormat) {
    let writer = std::io::stderr
        .with_max_level(Level::ERROR)
        .or_else(std::io::stdout);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(default_filter(verbose));

    match format {
        LogFormat::Text => registry.with(layer.with_target(false).compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
