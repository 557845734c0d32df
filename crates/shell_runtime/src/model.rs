//! Runtime state owned by the window lifecycle controller.

use shell_host::WindowState;

/// Lifecycle position of the single application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPresence {
    /// No window exists.
    #[default]
    Absent,
    /// Created hidden; waiting for the placeholder to paint.
    Starting,
    /// Shown to the user.
    Visible,
    /// Alive but hidden after a resident close.
    Hidden,
}

impl WindowPresence {
    /// Whether a live window exists.
    pub const fn exists(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Identifier of an armed debounce timer. Only the latest ticket may persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaveTicket(pub u64);

/// One geometry observation reported by the host after a move/resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometrySample {
    /// Outer top-left position, when the host could read it.
    pub position: Option<(i32, i32)>,
    /// Content width.
    pub width: u32,
    /// Content height.
    pub height: u32,
    /// Whether the window is maximized.
    pub is_maximized: bool,
    /// Whether the window is fullscreen.
    pub is_full_screen: bool,
}

impl GeometrySample {
    /// Zero-sized samples are reported while minimized and carry no geometry.
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Folds the sample into the previous record.
    ///
    /// In maximized/fullscreen mode the position is dropped and the previous normal size is kept,
    /// so restoring later reopens at the user's own size.
    pub fn apply_to(self, previous: WindowState) -> WindowState {
        if self.is_maximized || self.is_full_screen {
            return WindowState {
                x: None,
                y: None,
                is_maximized: self.is_maximized,
                is_full_screen: self.is_full_screen,
                ..previous
            };
        }

        let (x, y) = match self.position {
            Some((x, y)) => (Some(x), Some(y)),
            None => (previous.x, previous.y),
        };
        WindowState {
            x,
            y,
            width: self.width,
            height: self.height,
            is_maximized: false,
            is_full_screen: false,
        }
    }
}

/// Mutable controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellState {
    /// Current window presence.
    pub presence: WindowPresence,
    /// Latest known record; what the next save writes.
    pub window_state: WindowState,
    /// Ticket of the armed debounce timer, if any.
    pub pending_save: Option<SaveTicket>,
    next_ticket: u64,
}

impl ShellState {
    /// Seeds the state from the record loaded at startup.
    pub fn from_restored(restored: Option<WindowState>) -> Self {
        Self {
            window_state: restored.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Issues a fresh ticket, replacing any pending one.
    pub(crate) fn arm_save(&mut self) -> SaveTicket {
        self.next_ticket += 1;
        let ticket = SaveTicket(self.next_ticket);
        self.pending_save = Some(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(x: i32, y: i32, width: u32, height: u32) -> GeometrySample {
        GeometrySample {
            position: Some((x, y)),
            width,
            height,
            is_maximized: false,
            is_full_screen: false,
        }
    }

    #[test]
    fn maximized_sample_drops_position_and_keeps_normal_size() {
        let previous = normal(40, 50, 1200, 800).apply_to(WindowState::default());
        let maximized = GeometrySample {
            position: Some((0, 0)),
            width: 2560,
            height: 1400,
            is_maximized: true,
            is_full_screen: false,
        }
        .apply_to(previous);

        assert_eq!(maximized.position(), None);
        assert_eq!((maximized.width, maximized.height), (1200, 800));
        assert!(maximized.is_maximized);
    }

    #[test]
    fn missing_position_keeps_previous_coordinates() {
        let previous = normal(40, 50, 1200, 800).apply_to(WindowState::default());
        let resized = GeometrySample {
            position: None,
            ..normal(0, 0, 1000, 700)
        }
        .apply_to(previous);
        assert_eq!(resized.position(), Some((40, 50)));
        assert_eq!((resized.width, resized.height), (1000, 700));
    }

    #[test]
    fn tickets_increase_and_replace_pending() {
        let mut state = ShellState::default();
        let first = state.arm_save();
        let second = state.arm_save();
        assert!(second > first);
        assert_eq!(state.pending_save, Some(second));
    }

    #[test]
    fn zero_sized_samples_are_degenerate() {
        assert!(normal(-32000, -32000, 0, 0).is_degenerate());
        assert!(!normal(0, 0, 800, 600).is_degenerate());
    }
}
