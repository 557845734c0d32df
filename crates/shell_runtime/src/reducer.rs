//! Reducer actions, side-effect intents, and transition logic for the window lifecycle.

use std::time::Duration;

use shell_host::{is_app_deep_link, WindowState};
use thiserror::Error;
use url::Url;

use crate::config::ShellConfig;
use crate::model::{GeometrySample, SaveTicket, ShellState, WindowPresence};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_shell`].
pub enum ShellAction {
    /// Create the window if missing, otherwise bring it to front.
    EnsureWindowVisible,
    /// The placeholder has painted; the window may be revealed.
    ReadyToShow,
    /// The window moved, resized, or changed maximize/fullscreen mode.
    ObservedGeometry(GeometrySample),
    /// An armed debounce timer fired.
    SaveTimerElapsed {
        /// Ticket the timer was armed with.
        ticket: SaveTicket,
    },
    /// The user asked to close the window.
    CloseRequested,
    /// The host destroyed the window.
    WindowDestroyed,
    /// The host is about to exit the process.
    ExitRequested {
        /// `true` for an explicit quit, `false` when the last window went away.
        explicit: bool,
    },
    /// Dock/taskbar activation or a second launch attempt.
    Reactivate,
    /// A custom-scheme URL was delivered to the process.
    DeepLink {
        /// Raw URL as delivered by the OS.
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_shell`] for the host to execute in order.
pub enum ShellEffect {
    /// Build the window hidden, seeded with `seed`, showing `placeholder`.
    CreateWindow {
        /// Geometry to apply, already clamped to the minimum floor.
        seed: WindowState,
        /// Bundled placeholder document.
        placeholder: String,
    },
    /// Navigate to `url` after `delay`.
    ScheduleNavigation {
        /// Target URL.
        url: Url,
        /// Delay before navigating.
        delay: Duration,
    },
    /// Navigate to `url` now.
    Navigate {
        /// Target URL.
        url: Url,
    },
    /// Maximize the window.
    Maximize,
    /// Enter fullscreen.
    EnterFullScreen,
    /// Show (and unminimize) the window.
    ShowWindow,
    /// Give the window keyboard focus.
    FocusWindow,
    /// Hide the window without destroying it.
    HideWindow,
    /// Cancel the pending close request.
    PreventClose,
    /// Keep the process alive despite the exit request.
    PreventExit,
    /// Exit the process.
    Quit,
    /// Arm the debounce timer, replacing any pending one.
    ArmSaveTimer {
        /// Ticket to report back in [`ShellAction::SaveTimerElapsed`].
        ticket: SaveTicket,
        /// Quiet period.
        delay: Duration,
    },
    /// Abort the pending debounce timer.
    CancelSaveTimer,
    /// Write the record now.
    PersistWindowState(WindowState),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not fit the current lifecycle position.
pub enum ReducerError {
    /// The action refers to a window the runtime is not tracking.
    #[error("no application window is open")]
    NoWindow,
}

/// Applies a [`ShellAction`] to the shell state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::NoWindow`] when a window event arrives while no window exists.
pub fn reduce_shell(
    state: &mut ShellState,
    config: &ShellConfig,
    action: ShellAction,
) -> Result<Vec<ShellEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        ShellAction::EnsureWindowVisible | ShellAction::Reactivate => {
            ensure_window_visible(state, config, &mut effects);
        }
        ShellAction::ReadyToShow => {
            require_window(state)?;
            if state.presence == WindowPresence::Starting {
                state.presence = WindowPresence::Visible;
                if state.window_state.is_maximized {
                    effects.push(ShellEffect::Maximize);
                }
                if state.window_state.is_full_screen {
                    effects.push(ShellEffect::EnterFullScreen);
                }
                effects.push(ShellEffect::ShowWindow);
                effects.push(ShellEffect::FocusWindow);
            }
        }
        ShellAction::ObservedGeometry(sample) => {
            require_window(state)?;
            if !sample.is_degenerate() {
                observe_geometry(state, config, sample, &mut effects);
            }
        }
        ShellAction::SaveTimerElapsed { ticket } => {
            if state.pending_save == Some(ticket) {
                state.pending_save = None;
                effects.push(ShellEffect::PersistWindowState(state.window_state));
            } else {
                tracing::debug!(
                    ?ticket,
                    pending = ?state.pending_save,
                    "ignoring stale save timer"
                );
            }
        }
        ShellAction::CloseRequested => {
            require_window(state)?;
            cancel_pending_save(state, &mut effects);
            effects.push(ShellEffect::PersistWindowState(state.window_state));
            if config.resident_on_close {
                state.presence = WindowPresence::Hidden;
                effects.push(ShellEffect::PreventClose);
                effects.push(ShellEffect::HideWindow);
            }
        }
        ShellAction::WindowDestroyed => {
            state.presence = WindowPresence::Absent;
            cancel_pending_save(state, &mut effects);
            if !config.resident_on_close {
                effects.push(ShellEffect::Quit);
            }
        }
        ShellAction::ExitRequested { explicit } => {
            if !explicit && config.resident_on_close {
                effects.push(ShellEffect::PreventExit);
            } else {
                let had_pending = cancel_pending_save(state, &mut effects);
                if had_pending || state.presence.exists() {
                    effects.push(ShellEffect::PersistWindowState(state.window_state));
                }
            }
        }
        ShellAction::DeepLink { url } => {
            if !is_app_deep_link(&url, &config.url_scheme) {
                tracing::debug!(%url, "ignoring URL for a foreign scheme");
                return Ok(effects);
            }
            match state.presence {
                // A fresh window already navigates home once the placeholder has painted.
                WindowPresence::Absent | WindowPresence::Starting => {
                    ensure_window_visible(state, config, &mut effects);
                }
                WindowPresence::Visible | WindowPresence::Hidden => {
                    effects.push(ShellEffect::Navigate {
                        url: config.home_url.clone(),
                    });
                    reveal(state, &mut effects);
                }
            }
        }
    }
    Ok(effects)
}

fn require_window(state: &ShellState) -> Result<(), ReducerError> {
    if state.presence.exists() {
        Ok(())
    } else {
        Err(ReducerError::NoWindow)
    }
}

fn ensure_window_visible(
    state: &mut ShellState,
    config: &ShellConfig,
    effects: &mut Vec<ShellEffect>,
) {
    match state.presence {
        WindowPresence::Absent => {
            state.presence = WindowPresence::Starting;
            effects.push(ShellEffect::CreateWindow {
                seed: state
                    .window_state
                    .clamped_min(config.min_width, config.min_height),
                placeholder: config.placeholder.clone(),
            });
            effects.push(ShellEffect::ScheduleNavigation {
                url: config.home_url.clone(),
                delay: config.navigation_delay,
            });
        }
        WindowPresence::Starting => {}
        WindowPresence::Visible | WindowPresence::Hidden => reveal(state, effects),
    }
}

fn reveal(state: &mut ShellState, effects: &mut Vec<ShellEffect>) {
    state.presence = WindowPresence::Visible;
    effects.push(ShellEffect::ShowWindow);
    effects.push(ShellEffect::FocusWindow);
}

fn observe_geometry(
    state: &mut ShellState,
    config: &ShellConfig,
    sample: GeometrySample,
    effects: &mut Vec<ShellEffect>,
) {
    let previous = state.window_state;
    let next = sample.apply_to(previous);
    if next == previous {
        return;
    }
    state.window_state = next;

    let mode_changed = next.is_maximized != previous.is_maximized
        || next.is_full_screen != previous.is_full_screen;
    if mode_changed {
        cancel_pending_save(state, effects);
        effects.push(ShellEffect::PersistWindowState(next));
    } else {
        let ticket = state.arm_save();
        effects.push(ShellEffect::ArmSaveTimer {
            ticket,
            delay: config.save_debounce,
        });
    }
}

// Returns whether a timer was pending.
fn cancel_pending_save(state: &mut ShellState, effects: &mut Vec<ShellEffect>) -> bool {
    if state.pending_save.take().is_some() {
        effects.push(ShellEffect::CancelSaveTimer);
        true
    } else {
        false
    }
}
