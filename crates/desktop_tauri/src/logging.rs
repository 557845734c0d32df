//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,gemini_desktop=debug,shell_runtime=debug,shell_host=debug";

/// Installs the global `fmt` subscriber, honouring `RUST_LOG` when set.
pub(crate) fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
    {
        eprintln!("tracing subscriber already installed: {err}");
    }
}
