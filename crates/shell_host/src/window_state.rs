//! Persisted window geometry record.

use serde::{Deserialize, Serialize};

/// Width used when no geometry was ever recorded.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1400;
/// Height used when no geometry was ever recorded.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 900;
/// Smallest width applied to a newly created window.
pub const MIN_WINDOW_WIDTH: u32 = 800;
/// Smallest height applied to a newly created window.
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Window geometry and mode persisted across launches.
///
/// Position and size are logical pixels. `x`/`y` are omitted from the JSON record while the window
/// is maximized or fullscreen, because the position is not meaningful in those modes. `width` and
/// `height` always hold the last normal (restored) size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    /// Left edge of the window, absent when last maximized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Top edge of the window, absent when last maximized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// Last known content width.
    pub width: u32,
    /// Last known content height.
    pub height: u32,
    /// Whether the window was maximized.
    pub is_maximized: bool,
    /// Whether the window was fullscreen.
    pub is_full_screen: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            is_maximized: false,
            is_full_screen: false,
        }
    }
}

impl WindowState {
    /// Returns the record with width/height raised to the minimum window floor.
    pub fn clamped_min(self, min_width: u32, min_height: u32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..self
        }
    }

    /// Returns the position when both coordinates are known.
    pub fn position(&self) -> Option<(i32, i32)> {
        self.x.zip(self.y)
    }
}
