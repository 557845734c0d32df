//! Window lifecycle controller for the desktop shell.
//!
//! The controller is a reducer: hosts translate native window/app events into [`ShellAction`]s,
//! feed them to [`ShellRuntime::dispatch`], and execute the returned [`ShellEffect`]s in order. The
//! runtime never touches windows, timers, or the filesystem itself, which keeps every lifecycle
//! rule testable without a GUI.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod model;
pub mod reducer;

pub use config::{ConfigError, HostPlatform, ShellConfig};
pub use model::{GeometrySample, SaveTicket, ShellState, WindowPresence};
pub use reducer::{reduce_shell, ReducerError, ShellAction, ShellEffect};

use shell_host::WindowState;

/// Single controller instance owning the shell configuration and lifecycle state.
#[derive(Debug, Clone)]
pub struct ShellRuntime {
    config: ShellConfig,
    state: ShellState,
}

impl ShellRuntime {
    /// Creates the controller from the record loaded at startup.
    pub fn new(config: ShellConfig, restored: Option<WindowState>) -> Self {
        Self {
            config,
            state: ShellState::from_restored(restored),
        }
    }

    /// Applies `action` and returns the effects the host must execute.
    ///
    /// # Errors
    ///
    /// See [`reduce_shell`].
    pub fn dispatch(&mut self, action: ShellAction) -> Result<Vec<ShellEffect>, ReducerError> {
        reduce_shell(&mut self.state, &self.config, action)
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &ShellState {
        &self.state
    }
}
