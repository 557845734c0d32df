//! Custom URL scheme registration and delivery.

use shell_runtime::ShellAction;
use tauri::AppHandle;
use tauri_plugin_deep_link::DeepLinkExt;

/// Routes scheme URLs delivered to this process into the shell controller.
///
/// URLs that launched the process are replayed immediately; later ones arrive through the
/// plugin's open-url event (or the single-instance plugin on Windows and Linux).
pub(crate) fn install(app: &AppHandle) {
    // Installed bundles register the scheme; dev builds have to do it at runtime.
    #[cfg(all(debug_assertions, any(target_os = "linux", target_os = "windows")))]
    if let Err(err) = app.deep_link().register_all() {
        tracing::warn!(error = %err, "failed to register URL schemes for dev build");
    }

    let handle = app.clone();
    app.deep_link().on_open_url(move |event| {
        for url in event.urls() {
            tracing::info!(%url, "received deep link");
            crate::controller::dispatch_on_main(
                &handle,
                ShellAction::DeepLink {
                    url: url.to_string(),
                },
            );
        }
    });

    match app.deep_link().get_current() {
        Ok(Some(urls)) => {
            for url in urls {
                tracing::info!(%url, "launched with deep link");
                crate::controller::dispatch(
                    app,
                    ShellAction::DeepLink {
                        url: url.to_string(),
                    },
                );
            }
        }
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "failed to read launch deep links"),
    }
}
