//! Managed lifecycle controller: feeds native events to the shell reducer and executes the
//! resulting effects against the Tauri window, timers, and window-state file.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use shell_host::{
    NavigationPolicy, NoopWindowStateStore, PermissionPolicy, WindowState, WindowStateStore,
};
use shell_runtime::{ReducerError, SaveTicket, ShellAction, ShellConfig, ShellEffect, ShellRuntime};
use tauri::async_runtime::JoinHandle;
use tauri::{AppHandle, Manager, Url, WebviewWindow};

use crate::error::ShellError;
use crate::window::{self, MAIN_WINDOW_LABEL};
use crate::window_state::FileWindowStateStore;

/// What the native event handler must do with the event that triggered a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct HostVerdict {
    pub(crate) prevent_close: bool,
    pub(crate) prevent_exit: bool,
}

impl HostVerdict {
    fn from_effects(effects: &[ShellEffect]) -> Self {
        Self {
            prevent_close: effects.contains(&ShellEffect::PreventClose),
            prevent_exit: effects.contains(&ShellEffect::PreventExit),
        }
    }
}

/// The single controller instance, installed as Tauri managed state during setup.
pub(crate) struct ShellController {
    runtime: Mutex<ShellRuntime>,
    config: ShellConfig,
    store: Box<dyn WindowStateStore + Send + Sync>,
    navigation: NavigationPolicy,
    permissions: PermissionPolicy,
    save_timer: Mutex<Option<JoinHandle<()>>>,
    navigation_timer: Mutex<Option<JoinHandle<()>>>,
}

impl ShellController {
    pub(crate) fn new(app: &AppHandle, config: ShellConfig) -> Result<Self, ShellError> {
        let navigation = NavigationPolicy::for_home_url(&config.home_url)
            .ok_or_else(|| ShellError::UntrustedHome(config.home_url.to_string()))?;
        let store = select_store(FileWindowStateStore::for_app(app, &config.state_file));
        let restored = store.load();
        tracing::info!(restored = restored.is_some(), "loaded window state");

        Ok(Self {
            runtime: Mutex::new(ShellRuntime::new(config.clone(), restored)),
            config,
            store,
            navigation,
            permissions: PermissionPolicy::default(),
            save_timer: Mutex::new(None),
            navigation_timer: Mutex::new(None),
        })
    }

    pub(crate) fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub(crate) fn navigation(&self) -> &NavigationPolicy {
        &self.navigation
    }

    pub(crate) fn permissions(&self) -> &PermissionPolicy {
        &self.permissions
    }

    /// Reduces `action` and executes its effects in order.
    ///
    /// The runtime lock is released before any effect runs, so effects may dispatch again.
    pub(crate) fn dispatch(&self, app: &AppHandle, action: ShellAction) -> HostVerdict {
        tracing::trace!(?action, "dispatching shell action");
        let reduced = self
            .runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dispatch(action.clone());
        let effects = match reduced {
            Ok(effects) => effects,
            Err(ReducerError::NoWindow) => {
                tracing::debug!(?action, "ignoring window event without a tracked window");
                return HostVerdict::default();
            }
        };

        let verdict = HostVerdict::from_effects(&effects);
        for effect in effects {
            self.execute(app, effect);
        }
        verdict
    }

    fn execute(&self, app: &AppHandle, effect: ShellEffect) {
        match effect {
            ShellEffect::CreateWindow { seed, placeholder } => {
                self.create_window(app, &seed, &placeholder);
            }
            ShellEffect::ScheduleNavigation { url, delay } => {
                replace_timer(
                    &self.navigation_timer,
                    spawn_on_main_after(app, delay, "startup navigation", move |app| {
                        navigate_main(app, url);
                    }),
                );
            }
            ShellEffect::Navigate { url } => navigate_main(app, url),
            ShellEffect::Maximize => with_main_window(app, "maximize", |w| w.maximize()),
            ShellEffect::EnterFullScreen => {
                with_main_window(app, "enter fullscreen", |w| w.set_fullscreen(true));
            }
            ShellEffect::ShowWindow => with_main_window(app, "show", |w| {
                if w.is_minimized()? {
                    w.unminimize()?;
                }
                w.show()
            }),
            ShellEffect::FocusWindow => with_main_window(app, "focus", |w| w.set_focus()),
            ShellEffect::HideWindow => with_main_window(app, "hide", |w| w.hide()),
            // Consumed through `HostVerdict` by the native event handler.
            ShellEffect::PreventClose | ShellEffect::PreventExit => {}
            ShellEffect::Quit => {
                tracing::info!("last window closed; exiting");
                app.exit(0);
            }
            ShellEffect::ArmSaveTimer { ticket, delay } => {
                replace_timer(&self.save_timer, spawn_save_timer(app, ticket, delay));
            }
            ShellEffect::CancelSaveTimer => {
                if let Some(pending) = take_timer(&self.save_timer) {
                    pending.abort();
                }
            }
            ShellEffect::PersistWindowState(state) => self.persist(&state),
        }
    }

    fn create_window(&self, app: &AppHandle, seed: &WindowState, placeholder: &str) {
        match window::build_main_window(app, self, seed, placeholder) {
            Ok(_) => tracing::debug!(?seed, "created main window"),
            Err(err) => {
                tracing::error!(error = %err, "failed to create main window");
                self.dispatch(app, ShellAction::WindowDestroyed);
            }
        }
    }

    fn persist(&self, state: &WindowState) {
        match self.store.save(state) {
            Ok(()) => tracing::debug!(?state, "persisted window state"),
            Err(err) => tracing::warn!(error = %err, "window state save failed"),
        }
    }
}

// Persistence is best effort: without an app data dir the shell runs on defaults.
fn select_store(
    resolved: tauri::Result<FileWindowStateStore>,
) -> Box<dyn WindowStateStore + Send + Sync> {
    match resolved {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "window state file");
            Box::new(store)
        }
        Err(err) => {
            tracing::warn!(error = %err, "app data dir unavailable; window state will not persist");
            Box::new(NoopWindowStateStore)
        }
    }
}

/// Dispatches `action` to the managed controller, if setup has installed one.
pub(crate) fn dispatch(app: &AppHandle, action: ShellAction) -> HostVerdict {
    match app.try_state::<ShellController>() {
        Some(controller) => controller.dispatch(app, action),
        None => {
            tracing::warn!(?action, "shell controller is not installed");
            HostVerdict::default()
        }
    }
}

/// Queues `action` on the main thread, outside whatever native callback is running.
pub(crate) fn dispatch_on_main(app: &AppHandle, action: ShellAction) {
    let handle = app.clone();
    if let Err(err) = app.run_on_main_thread(move || {
        dispatch(&handle, action);
    }) {
        tracing::warn!(error = %err, "failed to queue shell action on the main thread");
    }
}

fn spawn_save_timer(app: &AppHandle, ticket: SaveTicket, delay: Duration) -> JoinHandle<()> {
    spawn_on_main_after(app, delay, "save timer", move |app| {
        dispatch(app, ShellAction::SaveTimerElapsed { ticket });
    })
}

// Sleeps on the async runtime, then runs `op` on the main thread.
fn spawn_on_main_after<F>(
    app: &AppHandle,
    delay: Duration,
    label: &'static str,
    op: F,
) -> JoinHandle<()>
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let handle = app.clone();
    spawn_after(delay, move || {
        let main = handle.clone();
        if let Err(err) = handle.run_on_main_thread(move || op(&main)) {
            tracing::warn!(timer = label, error = %err, "failed to queue timer on the main thread");
        }
    })
}

fn spawn_after<F>(delay: Duration, fire: F) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(delay).await;
        fire();
    })
}

fn replace_timer(slot: &Mutex<Option<JoinHandle<()>>>, next: JoinHandle<()>) {
    let previous = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(next);
    if let Some(previous) = previous {
        previous.abort();
    }
}

fn take_timer(slot: &Mutex<Option<JoinHandle<()>>>) -> Option<JoinHandle<()>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

fn navigate_main(app: &AppHandle, url: Url) {
    let target = url.to_string();
    with_main_window(app, "navigate", move |w| w.navigate(url));
    tracing::debug!(url = %target, "navigated main window");
}

fn with_main_window<F>(app: &AppHandle, operation: &str, op: F)
where
    F: FnOnce(&WebviewWindow) -> tauri::Result<()>,
{
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        tracing::debug!(operation, "main window is gone; skipping");
        return;
    };
    if let Err(err) = op(&window) {
        tracing::warn!(operation, error = %err, "window operation failed");
    }
}
