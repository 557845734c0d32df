//! Window-state storage contract and in-memory adapters.

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use thiserror::Error;

use crate::window_state::WindowState;

/// Failures raised while reading or writing the persisted window record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The state directory could not be created.
    #[error("failed to create state dir {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The record exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Record path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The record was read but is not a valid window state.
    #[error("failed to parse window state {}: {source}", path.display())]
    Parse {
        /// Record path.
        path: PathBuf,
        /// JSON decoding failure.
        source: serde_json::Error,
    },
    /// The in-memory record could not be encoded.
    #[error("failed to serialize window state: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The encoded record could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Record path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// Storage service for the singleton [`WindowState`] record.
pub trait WindowStateStore {
    /// Reads the persisted record, reporting why it is unavailable.
    ///
    /// `Ok(None)` means no record was ever written.
    fn try_load(&self) -> Result<Option<WindowState>, StoreError>;

    /// Overwrites the persisted record.
    fn save(&self, state: &WindowState) -> Result<(), StoreError>;

    /// Reads the persisted record, treating every failure as "no prior state".
    fn load(&self) -> Option<WindowState> {
        match self.try_load() {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, "window state unavailable; falling back to defaults");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never persists anything.
pub struct NoopWindowStateStore;

impl WindowStateStore for NoopWindowStateStore {
    fn try_load(&self) -> Result<Option<WindowState>, StoreError> {
        Ok(None)
    }

    fn save(&self, _state: &WindowState) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store that also counts writes.
pub struct MemoryWindowStateStore {
    inner: Rc<RefCell<MemoryRecord>>,
}

#[derive(Debug, Default)]
struct MemoryRecord {
    state: Option<WindowState>,
    writes: usize,
}

impl MemoryWindowStateStore {
    /// Creates a store pre-populated with `state`.
    pub fn with_state(state: WindowState) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().state = Some(state);
        store
    }

    /// Number of successful [`WindowStateStore::save`] calls.
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl WindowStateStore for MemoryWindowStateStore {
    fn try_load(&self) -> Result<Option<WindowState>, StoreError> {
        Ok(self.inner.borrow().state)
    }

    fn save(&self, state: &WindowState) -> Result<(), StoreError> {
        let mut record = self.inner.borrow_mut();
        record.state = Some(*state);
        record.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl WindowStateStore for BrokenStore {
        fn try_load(&self) -> Result<Option<WindowState>, StoreError> {
            let source = serde_json::from_str::<WindowState>("{").expect_err("malformed json");
            Err(StoreError::Parse {
                path: PathBuf::from("window-state.json"),
                source,
            })
        }

        fn save(&self, _state: &WindowState) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn load_maps_failures_to_absent() {
        assert_eq!(BrokenStore.load(), None);
        assert!(BrokenStore
            .try_load()
            .expect_err("parse failure")
            .to_string()
            .starts_with("failed to parse window state window-state.json:"));
    }

    #[test]
    fn memory_store_round_trips_and_counts_writes() {
        let store = MemoryWindowStateStore::default();
        assert_eq!(store.load(), None);

        let state = WindowState {
            x: Some(12),
            y: Some(34),
            ..WindowState::default()
        };
        store.save(&state).expect("save");
        store.save(&state).expect("save again");

        assert_eq!(store.load(), Some(state));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn noop_store_never_yields_state() {
        NoopWindowStateStore
            .save(&WindowState::default())
            .expect("noop save");
        assert_eq!(NoopWindowStateStore.load(), None);
    }
}
