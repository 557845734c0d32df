use gemini_desktop::window_state::FileWindowStateStore;
use pretty_assertions::assert_eq;
use shell_host::{StoreError, WindowState, WindowStateStore};
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "gemini_desktop_store_it_{}_{}",
        process::id(),
        now
    ))
}

#[test]
fn creates_missing_root_on_save_and_round_trips_across_instances() {
    let base = temp_dir_path();
    let root = base.join("nested").join("app-data");
    let first = FileWindowStateStore::from_root(&root, "window-state.json");
    assert!(!root.exists());
    assert_eq!(first.try_load().expect("empty load"), None);

    let state = WindowState {
        x: Some(-120),
        y: Some(40),
        width: 1024,
        height: 768,
        is_maximized: false,
        is_full_screen: false,
    };
    first.save(&state).expect("save");
    assert!(root.is_dir());

    let second = FileWindowStateStore::from_root(&root, "window-state.json");
    assert_eq!(second.load(), Some(state));

    let _ = fs::remove_dir_all(base);
}

#[test]
fn later_saves_replace_the_whole_record() {
    let root = temp_dir_path();
    let store = FileWindowStateStore::from_root(&root, "window-state.json");
    store
        .save(&WindowState {
            x: Some(10),
            y: Some(10),
            ..WindowState::default()
        })
        .expect("first save");

    let maximized = WindowState {
        is_maximized: true,
        ..WindowState::default()
    };
    store.save(&maximized).expect("second save");

    let raw = fs::read_to_string(store.path()).expect("read back");
    assert!(!raw.contains("\"x\""), "stale position left behind: {raw}");
    assert_eq!(store.load(), Some(maximized));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn records_written_by_hand_with_missing_position_load() {
    let root = temp_dir_path();
    fs::create_dir_all(&root).expect("create root");
    let store = FileWindowStateStore::from_root(&root, "window-state.json");
    fs::write(
        store.path(),
        r#"{"width":1400,"height":900,"isMaximized":true,"isFullScreen":false}"#,
    )
    .expect("write record");

    let loaded = store.load().expect("record loads");
    assert_eq!(loaded.position(), None);
    assert!(loaded.is_maximized);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn unusable_root_degrades_to_defaults_without_panicking() {
    let base = temp_dir_path();
    fs::create_dir_all(&base).expect("create base");
    let blocker = base.join("app-data");
    fs::write(&blocker, "not a directory").expect("write blocking file");

    let store = FileWindowStateStore::from_root(blocker.join("nested"), "window-state.json");
    assert_eq!(store.load(), None);
    let err = store
        .save(&WindowState::default())
        .expect_err("save under a regular file must fail");
    assert!(matches!(err, StoreError::CreateDir { .. }), "unexpected error: {err}");

    let _ = fs::remove_dir_all(base);
}

#[test]
fn save_recreates_a_root_removed_mid_session() {
    let root = temp_dir_path();
    let store = FileWindowStateStore::from_root(&root, "window-state.json");
    store.save(&WindowState::default()).expect("first save");

    fs::remove_dir_all(&root).expect("remove root");
    store.save(&WindowState::default()).expect("save after removal");
    assert_eq!(store.load(), Some(WindowState::default()));

    let _ = fs::remove_dir_all(root);
}
