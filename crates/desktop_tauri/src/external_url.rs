//! External browser hand-off through the Tauri opener plugin.

use tauri_plugin_opener::OpenerExt;

/// Opens `url` with the system default handler. Failures are logged, never raised.
pub(crate) fn open_external(app: &tauri::AppHandle, url: &str) {
    match app.opener().open_url(url, None::<String>) {
        Ok(()) => tracing::info!(%url, "opened URL in external browser"),
        Err(err) => tracing::warn!(%url, error = %err, "external URL open failed"),
    }
}
