//! Custom URL-scheme matching for deep links.

/// Custom scheme registered with the OS for this application.
pub const APP_URL_SCHEME: &str = "google-gemini-desktop-app";

/// Returns whether `raw` is an invocation of `scheme` (`<scheme>://...`).
///
/// Only the scheme is inspected; any path or query payload is ignored.
pub fn is_app_deep_link(raw: &str, scheme: &str) -> bool {
    let Some((candidate, rest)) = raw.trim().split_once(':') else {
        return false;
    };
    candidate.eq_ignore_ascii_case(scheme) && rest.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_registered_scheme_regardless_of_payload() {
        assert!(is_app_deep_link(
            "google-gemini-desktop-app://",
            APP_URL_SCHEME
        ));
        assert!(is_app_deep_link(
            "google-gemini-desktop-app://callback?code=abc",
            APP_URL_SCHEME
        ));
        assert!(is_app_deep_link(
            "Google-Gemini-Desktop-App://open",
            APP_URL_SCHEME
        ));
    }

    #[test]
    fn rejects_other_schemes_and_malformed_input() {
        assert!(!is_app_deep_link("https://gemini.google.com/app", APP_URL_SCHEME));
        assert!(!is_app_deep_link("google-gemini-desktop-app:open", APP_URL_SCHEME));
        assert!(!is_app_deep_link("google-gemini-desktop-apps://", APP_URL_SCHEME));
        assert!(!is_app_deep_link("", APP_URL_SCHEME));
    }
}
