//! Host-level error type.

use shell_runtime::ConfigError;
use thiserror::Error;

/// Failures that stop the desktop shell from starting.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The embedded shell manifest could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The configured home URL has no host to trust.
    #[error("home url `{0}` cannot anchor the navigation policy")]
    UntrustedHome(String),
    /// Tauri failed to build or run the application.
    #[error(transparent)]
    Tauri(#[from] tauri::Error),
}
