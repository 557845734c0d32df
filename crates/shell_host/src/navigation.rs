//! In-window navigation policy.
//!
//! Top-level navigation stays in the app window anywhere on the home URL's registrable domain, so
//! the sign-in redirect through `accounts.google.com` keeps its cookies in the app session.
//! Pop-ups load in-window only for the home host itself. Everything else is handed to the user's
//! default browser.

use url::Url;

/// Host the bundled placeholder is served from on Windows/Android webviews.
const LOCAL_ASSET_HOST: &str = "tauri.localhost";
/// Scheme the bundled placeholder is served from on macOS/Linux webviews.
const LOCAL_ASSET_SCHEME: &str = "tauri";

/// Outcome for a top-level navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the webview navigate.
    Allow,
    /// Cancel in-window and open the URL in the external browser.
    OpenExternal,
    /// Cancel without opening anything.
    Block,
}

/// Outcome for a `window.open` / target-blank attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupDecision {
    /// Load the target in the existing app window.
    LoadInWindow,
    /// Open the target in the external browser.
    OpenExternal,
    /// Drop the request.
    Deny,
}

/// Navigation policy anchored on the remote application's home URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    home_host: String,
    trusted_domain: String,
}

impl NavigationPolicy {
    /// Builds a policy that trusts the registrable domain of `home_url`.
    ///
    /// Returns `None` when `home_url` has no host.
    pub fn for_home_url(home_url: &Url) -> Option<Self> {
        let home_host = home_url.host_str()?.to_ascii_lowercase();
        let trusted_domain = registrable_domain(&home_host).to_string();
        Some(Self {
            home_host,
            trusted_domain,
        })
    }

    /// Host of the home URL.
    pub fn home_host(&self) -> &str {
        &self.home_host
    }

    /// Domain whose hosts may load in the app window.
    pub fn trusted_domain(&self) -> &str {
        &self.trusted_domain
    }

    /// Returns whether `url` is served over https by the trusted domain or one of its subdomains.
    pub fn is_trusted(&self, url: &Url) -> bool {
        url.scheme() == "https"
            && url.host_str().is_some_and(|host| {
                let host = host.to_ascii_lowercase();
                host == self.trusted_domain
                    || host
                        .strip_suffix(self.trusted_domain.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
    }

    /// Returns whether `url` is served over https by the home host itself.
    pub fn is_home(&self, url: &Url) -> bool {
        url.scheme() == "https"
            && url
                .host_str()
                .is_some_and(|host| host.eq_ignore_ascii_case(&self.home_host))
    }

    /// Classifies a top-level navigation attempt.
    pub fn decide(&self, url: &Url) -> NavigationDecision {
        if self.is_trusted(url) || is_local_asset(url) {
            return NavigationDecision::Allow;
        }
        if is_inert_scheme(url.scheme()) {
            return NavigationDecision::Block;
        }
        NavigationDecision::OpenExternal
    }

    /// Classifies a pop-up attempt. Pop-ups never become app windows.
    pub fn decide_popup(&self, url: &Url) -> PopupDecision {
        if self.is_home(url) {
            return PopupDecision::LoadInWindow;
        }
        if is_local_asset(url) || is_inert_scheme(url.scheme()) {
            return PopupDecision::Deny;
        }
        PopupDecision::OpenExternal
    }
}

// Last two labels of `host`. IP literals and single-label hosts are returned unchanged.
fn registrable_domain(host: &str) -> &str {
    if host.parse::<std::net::IpAddr>().is_ok() || host.starts_with('[') {
        return host;
    }
    match host.rmatch_indices('.').nth(1) {
        Some((index, _)) => &host[index + 1..],
        None => host,
    }
}

fn is_local_asset(url: &Url) -> bool {
    url.scheme() == LOCAL_ASSET_SCHEME
        || (matches!(url.scheme(), "http" | "https") && url.host_str() == Some(LOCAL_ASSET_HOST))
}

// Schemes with no meaningful external handler.
fn is_inert_scheme(scheme: &str) -> bool {
    matches!(scheme, "about" | "blob" | "data" | "javascript")
}
