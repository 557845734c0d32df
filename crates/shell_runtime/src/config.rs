//! Shell configuration resolved from the build-time manifest and the host platform.

use std::time::Duration;

use serde::Deserialize;
use shell_host::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use thiserror::Error;
use url::Url;

include!(concat!(env!("OUT_DIR"), "/shell_manifest_generated.rs"));

/// Host operating-system family, as far as shell behaviour is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    /// macOS: apps stay resident after their last window closes.
    MacOs,
    /// Windows.
    Windows,
    /// Linux and other freedesktop systems.
    Linux,
    /// Anything else.
    Other,
}

impl HostPlatform {
    /// Platform the binary was built for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Whether closing the last window keeps the process alive.
    pub const fn resident_on_close(self) -> bool {
        matches!(self, Self::MacOs)
    }
}

/// Errors raised while resolving [`ShellConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The embedded manifest is not valid JSON for the expected shape.
    #[error("invalid shell manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    /// The home URL could not be parsed.
    #[error("invalid home url `{url}`: {source}")]
    HomeUrl {
        /// Offending URL text.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },
    /// The home URL has no host to trust.
    #[error("home url `{0}` has no host")]
    MissingHost(String),
}

#[derive(Debug, Deserialize)]
struct Manifest {
    window: WindowSection,
    remote: RemoteSection,
    deep_link: DeepLinkSection,
    startup: StartupSection,
    persistence: PersistenceSection,
}

#[derive(Debug, Deserialize)]
struct WindowSection {
    title: String,
}

#[derive(Debug, Deserialize)]
struct RemoteSection {
    home_url: String,
}

#[derive(Debug, Deserialize)]
struct DeepLinkSection {
    scheme: String,
}

#[derive(Debug, Deserialize)]
struct StartupSection {
    placeholder: String,
    navigation_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
struct PersistenceSection {
    state_file: String,
    save_debounce_ms: u64,
}

/// Immutable shell settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Window title.
    pub window_title: String,
    /// Remote application home URL; its host is the only trusted host.
    pub home_url: Url,
    /// Custom URL scheme handled as a deep link.
    pub url_scheme: String,
    /// Bundled placeholder document shown before the redirect.
    pub placeholder: String,
    /// Delay between showing the placeholder and navigating to [`Self::home_url`].
    pub navigation_delay: Duration,
    /// Quiet period before a geometry change is written.
    pub save_debounce: Duration,
    /// File name of the persisted window record inside the app data directory.
    pub state_file: String,
    /// Minimum width applied to a new window.
    pub min_width: u32,
    /// Minimum height applied to a new window.
    pub min_height: u32,
    /// Hide instead of close, and stay alive after the last window closes.
    pub resident_on_close: bool,
}

impl ShellConfig {
    /// Resolves the embedded manifest for the current platform.
    pub fn from_manifest() -> Result<Self, ConfigError> {
        Self::from_manifest_json(SHELL_MANIFEST_JSON, HostPlatform::current())
    }

    /// Resolves a manifest JSON document for `platform`.
    pub fn from_manifest_json(raw: &str, platform: HostPlatform) -> Result<Self, ConfigError> {
        let manifest: Manifest = serde_json::from_str(raw)?;
        let home_url =
            Url::parse(&manifest.remote.home_url).map_err(|source| ConfigError::HomeUrl {
                url: manifest.remote.home_url.clone(),
                source,
            })?;
        if home_url.host_str().is_none() {
            return Err(ConfigError::MissingHost(manifest.remote.home_url));
        }

        Ok(Self {
            window_title: manifest.window.title,
            home_url,
            url_scheme: manifest.deep_link.scheme,
            placeholder: manifest.startup.placeholder,
            navigation_delay: Duration::from_millis(manifest.startup.navigation_delay_ms),
            save_debounce: Duration::from_millis(manifest.persistence.save_debounce_ms),
            state_file: manifest.persistence.state_file,
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
            resident_on_close: platform.resident_on_close(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_manifest_resolves_design_constants() {
        let config = ShellConfig::from_manifest_json(SHELL_MANIFEST_JSON, HostPlatform::Linux)
            .expect("config");
        assert_eq!(config.home_url.as_str(), "https://gemini.google.com/app");
        assert_eq!(config.url_scheme, "google-gemini-desktop-app");
        assert_eq!(config.placeholder, "index.html");
        assert_eq!(config.navigation_delay, Duration::from_millis(100));
        assert_eq!(config.save_debounce, Duration::from_millis(500));
        assert_eq!(config.state_file, "window-state.json");
        assert_eq!((config.min_width, config.min_height), (800, 600));
        assert!(!config.resident_on_close);
    }

    #[test]
    fn only_macos_stays_resident() {
        assert!(HostPlatform::MacOs.resident_on_close());
        assert!(!HostPlatform::Windows.resident_on_close());
        assert!(!HostPlatform::Linux.resident_on_close());
        assert!(!HostPlatform::Other.resident_on_close());
    }

    #[test]
    fn rejects_home_url_without_host() {
        let raw =
            SHELL_MANIFEST_JSON.replace("https://gemini.google.com/app", "data:text/plain,hi");
        let err = ShellConfig::from_manifest_json(&raw, HostPlatform::Linux)
            .expect_err("hostless url must be rejected");
        assert_eq!(err.to_string(), "home url `data:text/plain,hi` has no host");
    }

    #[test]
    fn rejects_malformed_manifest() {
        let err = ShellConfig::from_manifest_json("{\"window\":", HostPlatform::Linux)
            .expect_err("malformed manifest");
        assert!(matches!(err, ConfigError::Manifest(_)));
    }
}
