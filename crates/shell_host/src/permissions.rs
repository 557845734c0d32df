//! Browser permission policy for the hosted page.

/// Permission names the hosted page may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    /// General WebAuthn credential assertion.
    WebAuthn,
    /// WebAuthn `navigator.credentials.get`.
    WebAuthnGetAssertion,
    /// WebAuthn `navigator.credentials.create`.
    WebAuthnCreate,
    /// Camera capture.
    Camera,
    /// Microphone capture.
    Microphone,
    /// Screen/display capture.
    DisplayCapture,
    /// Location lookup.
    Geolocation,
    /// Web notifications.
    Notifications,
    /// Clipboard reads.
    ClipboardRead,
    /// Web MIDI access.
    Midi,
}

impl PermissionKind {
    /// Permissions the host actively guards in the page.
    pub const GUARDED: [PermissionKind; 7] = [
        Self::Camera,
        Self::Microphone,
        Self::DisplayCapture,
        Self::Geolocation,
        Self::Notifications,
        Self::ClipboardRead,
        Self::Midi,
    ];

    /// Stable permission name, as used by the Permissions API where one exists.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WebAuthn => "webauthn",
            Self::WebAuthnGetAssertion => "webauthn-get-assertion",
            Self::WebAuthnCreate => "webauthn-create",
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::DisplayCapture => "display-capture",
            Self::Geolocation => "geolocation",
            Self::Notifications => "notifications",
            Self::ClipboardRead => "clipboard-read",
            Self::Midi => "midi",
        }
    }
}

/// Result of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// The request is granted.
    Grant,
    /// The request is denied.
    Deny,
}

/// Default-deny permission policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPolicy {
    granted: Vec<PermissionKind>,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::credentials_only()
    }
}

impl PermissionPolicy {
    /// Grants the three WebAuthn permissions and nothing else.
    pub fn credentials_only() -> Self {
        Self {
            granted: vec![
                PermissionKind::WebAuthn,
                PermissionKind::WebAuthnGetAssertion,
                PermissionKind::WebAuthnCreate,
            ],
        }
    }

    /// Decides a single request.
    pub fn decide(&self, kind: &PermissionKind) -> PermissionDecision {
        if self.granted.contains(kind) {
            PermissionDecision::Grant
        } else {
            PermissionDecision::Deny
        }
    }

    /// Guarded permissions this policy denies, in [`PermissionKind::GUARDED`] order.
    pub fn denied_guarded(&self) -> Vec<PermissionKind> {
        PermissionKind::GUARDED
            .into_iter()
            .filter(|kind| self.decide(kind) == PermissionDecision::Deny)
            .collect()
    }
}
