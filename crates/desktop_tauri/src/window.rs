//! Main application window construction and native window-event translation.

use shell_host::{NavigationDecision, PopupDecision, WindowState};
use shell_runtime::{GeometrySample, ShellAction};
use tauri::webview::{NewWindowResponse, PageLoadEvent};
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent};

use crate::controller::{self, ShellController};
use crate::external_url::open_external;
use crate::permissions::guard_script;

/// Label of the one application window.
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

/// Builds the main window hidden, seeded with `seed`, showing the bundled `placeholder`.
pub(crate) fn build_main_window(
    app: &AppHandle,
    controller: &ShellController,
    seed: &WindowState,
    placeholder: &str,
) -> tauri::Result<WebviewWindow> {
    let config = controller.config();
    let navigation = controller.navigation().clone();
    let popups = navigation.clone();
    let nav_handle = app.clone();
    let popup_handle = app.clone();

    let start_url = WebviewUrl::App(placeholder.into());
    let builder = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, start_url)
        .title(config.window_title.as_str())
        .inner_size(f64::from(seed.width), f64::from(seed.height))
        .min_inner_size(f64::from(config.min_width), f64::from(config.min_height))
        .visible(false)
        .initialization_script_for_all_frames(&guard_script(controller.permissions()));
    let builder = match seed.position() {
        Some((x, y)) => builder.position(f64::from(x), f64::from(y)),
        None => builder.center(),
    };

    let window = builder
        .on_navigation(move |url| match navigation.decide(url) {
            NavigationDecision::Allow => true,
            NavigationDecision::OpenExternal => {
                open_external(&nav_handle, url.as_str());
                false
            }
            NavigationDecision::Block => {
                tracing::debug!(%url, "blocked navigation");
                false
            }
        })
        .on_new_window(move |url, _features| {
            match popups.decide_popup(&url) {
                PopupDecision::LoadInWindow => {
                    tracing::debug!(%url, "loading pop-up target in the main window");
                    let handle = popup_handle.clone();
                    if let Err(err) = popup_handle.run_on_main_thread(move || {
                        if let Some(window) = handle.get_webview_window(MAIN_WINDOW_LABEL) {
                            if let Err(err) = window.navigate(url) {
                                tracing::warn!(error = %err, "pop-up navigation failed");
                            }
                        }
                    }) {
                        tracing::warn!(error = %err, "failed to queue pop-up navigation");
                    }
                }
                PopupDecision::OpenExternal => open_external(&popup_handle, url.as_str()),
                PopupDecision::Deny => tracing::debug!(%url, "denied pop-up"),
            }
            NewWindowResponse::Deny
        })
        .on_page_load(|window, payload| {
            if payload.event() == PageLoadEvent::Finished {
                controller::dispatch_on_main(window.app_handle(), ShellAction::ReadyToShow);
            }
        })
        .build()?;

    let observed = window.clone();
    window.on_window_event(move |event| handle_window_event(&observed, event));
    Ok(window)
}

fn handle_window_event(window: &WebviewWindow, event: &WindowEvent) {
    let app = window.app_handle();
    match event {
        WindowEvent::Moved(_) | WindowEvent::Resized(_) => {
            if let Some(sample) = sample_geometry(window) {
                controller::dispatch(app, ShellAction::ObservedGeometry(sample));
            }
        }
        WindowEvent::CloseRequested { api, .. } => {
            if controller::dispatch(app, ShellAction::CloseRequested).prevent_close {
                api.prevent_close();
            }
        }
        WindowEvent::Destroyed => {
            controller::dispatch(app, ShellAction::WindowDestroyed);
        }
        _ => {}
    }
}

// Reads the live geometry in logical pixels. Minimized windows report nothing useful.
fn sample_geometry(window: &WebviewWindow) -> Option<GeometrySample> {
    if window.is_minimized().unwrap_or(false) {
        return None;
    }
    let scale = window.scale_factor().ok()?;
    let size = window.inner_size().ok()?.to_logical::<u32>(scale);
    let position = window.outer_position().ok().map(|physical| {
        let logical = physical.to_logical::<i32>(scale);
        (logical.x, logical.y)
    });

    Some(GeometrySample {
        position,
        width: size.width,
        height: size.height,
        is_maximized: window.is_maximized().unwrap_or(false),
        is_full_screen: window.is_fullscreen().unwrap_or(false),
    })
}
