pub mod cli;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod pipeline_config;
pub mod reference;
pub mod summary;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the default filter, or the debug
/// filter when `verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        config::verbose_log_filter()
    } else {
        config::default_log_filter()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();
}
