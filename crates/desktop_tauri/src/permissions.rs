//! Page-side enforcement of the default-deny permission policy.
//!
//! wry exposes no cross-platform permission delegate, so denied capabilities are disabled by an
//! initialization script injected into every frame before any page script runs. WebAuthn APIs
//! are left untouched and handled natively by the webview.

use shell_host::{PermissionKind, PermissionPolicy};

/// Per-frame marker so a frame that receives the script twice wraps each API only once.
const INSTALLED_MARKER: &str = "__shellPermissionGuard";

const PRELUDE: &str = r#"
  if (window[__MARKER__]) return;
  Object.defineProperty(window, __MARKER__, { value: true });
  const denied = new Set(__DENIED__);
  const deny = (name) =>
    Promise.reject(new DOMException(name + " permission denied", "NotAllowedError"));
  if (navigator.permissions && navigator.permissions.query) {
    const query = navigator.permissions.query.bind(navigator.permissions);
    navigator.permissions.query = (descriptor) =>
      descriptor && denied.has(descriptor.name)
        ? Promise.resolve({ name: descriptor.name, state: "denied", onchange: null })
        : query(descriptor);
  }
"#;

const MEDIA_GUARD: &str = r#"
  if (navigator.mediaDevices && navigator.mediaDevices.getUserMedia) {
    const getUserMedia = navigator.mediaDevices.getUserMedia.bind(navigator.mediaDevices);
    navigator.mediaDevices.getUserMedia = (constraints = {}) => {
      if (constraints.video && denied.has("camera")) return deny("camera");
      if (constraints.audio && denied.has("microphone")) return deny("microphone");
      return getUserMedia(constraints);
    };
  }
"#;

const DISPLAY_CAPTURE_GUARD: &str = r#"
  if (navigator.mediaDevices && navigator.mediaDevices.getDisplayMedia) {
    navigator.mediaDevices.getDisplayMedia = () => deny("display-capture");
  }
"#;

const GEOLOCATION_GUARD: &str = r#"
  if (navigator.geolocation) {
    const positionError =
      { code: 1, message: "geolocation permission denied", PERMISSION_DENIED: 1 };
    navigator.geolocation.getCurrentPosition = (_ok, fail) => fail && fail(positionError);
    navigator.geolocation.watchPosition = (_ok, fail) => {
      if (fail) fail(positionError);
      return 0;
    };
  }
"#;

const NOTIFICATIONS_GUARD: &str = r#"
  if (window.Notification) {
    Object.defineProperty(window.Notification, "permission", { get: () => "denied" });
    window.Notification.requestPermission = (callback) => {
      if (callback) callback("denied");
      return Promise.resolve("denied");
    };
  }
"#;

const CLIPBOARD_READ_GUARD: &str = r#"
  if (navigator.clipboard) {
    navigator.clipboard.read = () => deny("clipboard-read");
    navigator.clipboard.readText = () => deny("clipboard-read");
  }
"#;

const MIDI_GUARD: &str = r#"
  if (navigator.requestMIDIAccess) {
    navigator.requestMIDIAccess = () => deny("midi");
  }
"#;

fn api_guard(kind: &PermissionKind) -> Option<&'static str> {
    match kind {
        PermissionKind::Camera | PermissionKind::Microphone => Some(MEDIA_GUARD),
        PermissionKind::DisplayCapture => Some(DISPLAY_CAPTURE_GUARD),
        PermissionKind::Geolocation => Some(GEOLOCATION_GUARD),
        PermissionKind::Notifications => Some(NOTIFICATIONS_GUARD),
        PermissionKind::ClipboardRead => Some(CLIPBOARD_READ_GUARD),
        PermissionKind::Midi => Some(MIDI_GUARD),
        _ => None,
    }
}

/// Builds the initialization script that disables every guarded API `policy` denies.
pub(crate) fn guard_script(policy: &PermissionPolicy) -> String {
    let denied = policy.denied_guarded();
    let names: Vec<&str> = denied.iter().map(PermissionKind::name).collect();
    let names_json = serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string());

    let mut script = String::from("(() => {");
    let marker_json = serde_json::to_string(INSTALLED_MARKER)
        .unwrap_or_else(|_| format!("\"{INSTALLED_MARKER}\""));
    script.push_str(
        &PRELUDE
            .replace("__MARKER__", &marker_json)
            .replace("__DENIED__", &names_json),
    );

    let mut emitted: Vec<&'static str> = Vec::new();
    for guard in denied.iter().filter_map(api_guard) {
        // Camera and microphone share one getUserMedia wrapper.
        if !emitted.contains(&guard) {
            emitted.push(guard);
            script.push_str(guard);
        }
    }
    script.push_str("})();");
    script
}

#[cfg(test)]
mod tests {
    use super::guard_script;
    use shell_host::PermissionPolicy;

    #[test]
    fn default_policy_guards_every_denied_api() {
        let script = guard_script(&PermissionPolicy::default());

        assert!(script.starts_with("(() => {"));
        assert!(script.ends_with("})();"));
        assert!(script.contains(concat!(
            r#"["camera","microphone","display-capture","geolocation","#,
            r#""notifications","clipboard-read","midi"]"#
        )));
        for api in [
            "getUserMedia",
            "getDisplayMedia",
            "geolocation",
            "requestPermission",
            "readText",
            "requestMIDIAccess",
        ] {
            assert!(script.contains(api), "missing guard for {api}");
        }
    }

    #[test]
    fn media_wrapper_is_emitted_once() {
        let script = guard_script(&PermissionPolicy::default());
        assert_eq!(script.matches("const getUserMedia").count(), 1);
    }

    #[test]
    fn script_installs_once_per_frame() {
        let script = guard_script(&PermissionPolicy::default());
        let guard = r#"if (window["__shellPermissionGuard"]) return;"#;
        let marker = r#"Object.defineProperty(window, "__shellPermissionGuard""#;
        let guard_at = script.find(guard).expect("re-entry guard");
        let marker_at = script.find(marker).expect("install marker");
        let first_wrapper = script.find("navigator.permissions.query =").expect("query wrapper");
        assert!(guard_at < marker_at && marker_at < first_wrapper);
        assert!(!script.contains("__MARKER__"));
    }

    #[test]
    fn credential_apis_are_left_alone() {
        let script = guard_script(&PermissionPolicy::default());
        assert!(!script.contains("credentials"));
        assert!(!script.contains("webauthn"));
    }
}
