//! Tauri desktop shell hosting the Gemini web application in a single persistent window.
//!
//! Native window and app events are translated into `shell_runtime` actions by a managed
//! controller; every lifecycle rule lives in the reducer, and this crate only executes effects.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod controller;
mod deep_link;
mod error;
mod external_url;
mod logging;
mod permissions;
mod window;
#[doc(hidden)]
pub mod window_state;

pub use error::ShellError;

use shell_runtime::{ShellAction, ShellConfig};
use tauri::{AppHandle, Manager, RunEvent};

use crate::controller::ShellController;
use crate::window::MAIN_WINDOW_LABEL;

/// Starts the desktop shell and blocks until the process exits.
///
/// # Errors
///
/// Returns an error when the embedded manifest is invalid or Tauri fails to build the app.
/// Failures inside setup are reported by Tauri itself.
pub fn run() -> Result<(), ShellError> {
    logging::init();
    let config = ShellConfig::from_manifest()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        home = %config.home_url,
        resident_on_close = config.resident_on_close,
        "starting desktop shell"
    );

    let builder = tauri::Builder::default();
    // Must be the first plugin so a second launch exits before anything else initializes.
    #[cfg(any(target_os = "linux", target_os = "windows"))]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, argv, _cwd| {
        tracing::debug!(?argv, "second launch forwarded to the running instance");
        controller::dispatch_on_main(app, ShellAction::Reactivate);
    }));

    let app = builder
        .plugin(tauri_plugin_deep_link::init())
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            let handle = app.handle().clone();
            app.manage(ShellController::new(&handle, config)?);
            deep_link::install(&handle);
            controller::dispatch(&handle, ShellAction::EnsureWindowVisible);
            Ok(())
        })
        .build(tauri::generate_context!())?;

    app.run(|app, event| match event {
        RunEvent::ExitRequested { code, api, .. } => {
            let explicit = exit_is_explicit(app, code);
            if controller::dispatch(app, ShellAction::ExitRequested { explicit }).prevent_exit {
                api.prevent_exit();
            }
        }
        RunEvent::Exit => {
            controller::dispatch(app, ShellAction::ExitRequested { explicit: true });
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            controller::dispatch(app, ShellAction::Reactivate);
        }
        _ => {}
    });
    Ok(())
}

// Tauri reports `None` both for "last window closed" and for some user-initiated quits. Only the
// former leaves no window behind.
fn exit_is_explicit(app: &AppHandle, code: Option<i32>) -> bool {
    code.is_some() || app.get_webview_window(MAIN_WINDOW_LABEL).is_some()
}
