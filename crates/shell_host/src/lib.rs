//! Host-agnostic contracts shared by the shell runtime and the Tauri desktop host.
//!
//! This crate owns the persisted [`WindowState`] record, the [`WindowStateStore`] service trait,
//! and the policy decisions layered on top of the webview host: which navigations stay in-window,
//! which browser permissions are granted, and which deep links belong to this application. None of
//! it depends on Tauri, so every decision is unit-testable without a GUI.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod deep_link;
pub mod navigation;
pub mod permissions;
pub mod store;
pub mod window_state;

pub use deep_link::{is_app_deep_link, APP_URL_SCHEME};
pub use navigation::{NavigationDecision, NavigationPolicy, PopupDecision};
pub use permissions::{PermissionDecision, PermissionKind, PermissionPolicy};
pub use store::{MemoryWindowStateStore, NoopWindowStateStore, StoreError, WindowStateStore};
pub use window_state::{
    WindowState, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};
