//! File-backed window-state storage in the native app-data directory.

use std::fs;
use std::path::{Path, PathBuf};

use shell_host::{StoreError, WindowState, WindowStateStore};
use tauri::Manager;

const TEMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone)]
/// Window-state store backed by a single pretty-printed JSON file.
///
/// Nothing touches the filesystem until the first load or save; the parent directory is created
/// on every save, so a directory removed mid-session is recreated.
pub struct FileWindowStateStore {
    file: PathBuf,
}

impl FileWindowStateStore {
    /// Creates a store for `file_name` under `root`.
    pub fn from_root(root: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            file: root.as_ref().join(file_name),
        }
    }

    pub(crate) fn for_app(app: &tauri::AppHandle, file_name: &str) -> tauri::Result<Self> {
        let root = app.path().app_data_dir()?;
        Ok(Self::from_root(root, file_name))
    }

    /// Location of the persisted record.
    pub fn path(&self) -> &Path {
        &self.file
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.file.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.file.with_file_name(name)
    }
}

impl WindowStateStore for FileWindowStateStore {
    fn try_load(&self) -> Result<Option<WindowState>, StoreError> {
        if !self.file.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.file).map_err(|source| StoreError::Read {
            path: self.file.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.file.clone(),
                source,
            })
    }

    // Writes a sibling temp file and renames it over the record so a torn write never replaces
    // the last good record.
    fn save(&self, state: &WindowState) -> Result<(), StoreError> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let serialized = serde_json::to_string_pretty(state).map_err(StoreError::Serialize)?;

        let temp = self.temp_path();
        fs::write(&temp, serialized).map_err(|source| StoreError::Write {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &self.file).map_err(|source| {
            let _ = fs::remove_file(&temp);
            StoreError::Write {
                path: self.file.clone(),
                source,
            }
        })
    }
}
