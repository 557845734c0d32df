use pretty_assertions::assert_eq;
use shell_host::{MemoryWindowStateStore, WindowState, WindowStateStore};
use shell_runtime::config::SHELL_MANIFEST_JSON;
use shell_runtime::{
    GeometrySample, HostPlatform, SaveTicket, ShellAction, ShellConfig, ShellEffect, ShellRuntime,
    WindowPresence,
};

/// Minimal host that executes effects against in-memory stand-ins.
struct FakeHost {
    runtime: ShellRuntime,
    store: MemoryWindowStateStore,
    armed_timer: Option<SaveTicket>,
    windows_created: usize,
    window_live: bool,
    window_visible: bool,
    process_alive: bool,
}

impl FakeHost {
    fn launch(platform: HostPlatform, store: MemoryWindowStateStore) -> Self {
        let config = ShellConfig::from_manifest_json(SHELL_MANIFEST_JSON, platform).expect("config");
        let runtime = ShellRuntime::new(config, store.load());
        let mut host = Self {
            runtime,
            store,
            armed_timer: None,
            windows_created: 0,
            window_live: false,
            window_visible: false,
            process_alive: true,
        };
        host.dispatch(ShellAction::EnsureWindowVisible);
        host.dispatch(ShellAction::ReadyToShow);
        host
    }

    fn dispatch(&mut self, action: ShellAction) -> Vec<ShellEffect> {
        let effects = self.runtime.dispatch(action).expect("dispatch");
        for effect in &effects {
            match effect {
                ShellEffect::CreateWindow { .. } => {
                    self.windows_created += 1;
                    self.window_live = true;
                }
                ShellEffect::ShowWindow => self.window_visible = true,
                ShellEffect::HideWindow => self.window_visible = false,
                ShellEffect::ArmSaveTimer { ticket, .. } => self.armed_timer = Some(*ticket),
                ShellEffect::CancelSaveTimer => self.armed_timer = None,
                ShellEffect::PersistWindowState(state) => {
                    self.store.save(state).expect("save");
                }
                ShellEffect::Quit => self.process_alive = false,
                _ => {}
            }
        }
        effects
    }

    fn fire_save_timer(&mut self) {
        if let Some(ticket) = self.armed_timer.take() {
            self.dispatch(ShellAction::SaveTimerElapsed { ticket });
        }
    }

    fn close(&mut self) {
        let effects = self.dispatch(ShellAction::CloseRequested);
        if !effects.contains(&ShellEffect::PreventClose) {
            self.window_live = false;
            self.window_visible = false;
            self.dispatch(ShellAction::WindowDestroyed);
        }
    }
}

fn moved(x: i32, y: i32) -> ShellAction {
    ShellAction::ObservedGeometry(GeometrySample {
        position: Some((x, y)),
        width: 1280,
        height: 820,
        is_maximized: false,
        is_full_screen: false,
    })
}

#[test]
fn burst_of_geometry_events_writes_once_with_final_state() {
    let mut host = FakeHost::launch(HostPlatform::Linux, MemoryWindowStateStore::default());

    for step in 0..25 {
        host.dispatch(moved(step * 4, step * 2));
    }
    assert_eq!(host.store.writes(), 0);

    host.fire_save_timer();

    assert_eq!(host.store.writes(), 1);
    assert_eq!(
        host.store.load(),
        Some(WindowState {
            x: Some(96),
            y: Some(48),
            width: 1280,
            height: 820,
            is_maximized: false,
            is_full_screen: false,
        })
    );
}

#[test]
fn maximize_survives_abrupt_exit() {
    let store = MemoryWindowStateStore::default();
    let mut host = FakeHost::launch(HostPlatform::Windows, store.clone());
    host.dispatch(moved(100, 100));
    host.dispatch(ShellAction::ObservedGeometry(GeometrySample {
        position: Some((0, 0)),
        width: 1920,
        height: 1040,
        is_maximized: true,
        is_full_screen: false,
    }));
    // The process dies here: no timer fires, no close or exit event arrives.
    drop(host);

    let persisted = store.load().expect("maximize persisted");
    assert!(persisted.is_maximized);
    assert_eq!(persisted.position(), None);
    assert_eq!((persisted.width, persisted.height), (1280, 820));
}

#[test]
fn persisted_geometry_seeds_the_next_launch() {
    let store = MemoryWindowStateStore::default();
    let mut first = FakeHost::launch(HostPlatform::Linux, store.clone());
    first.dispatch(moved(64, 32));
    first.close();
    assert!(!first.process_alive);

    let mut second = ShellRuntime::new(
        ShellConfig::from_manifest_json(SHELL_MANIFEST_JSON, HostPlatform::Linux).expect("config"),
        store.load(),
    );
    let effects = second
        .dispatch(ShellAction::EnsureWindowVisible)
        .expect("create");
    let ShellEffect::CreateWindow { seed, .. } = &effects[0] else {
        panic!("expected CreateWindow, got {effects:?}");
    };
    assert_eq!(seed.position(), Some((64, 32)));
    assert_eq!((seed.width, seed.height), (1280, 820));
}

#[test]
fn resident_close_then_reactivate_reuses_the_same_window() {
    let mut host = FakeHost::launch(HostPlatform::MacOs, MemoryWindowStateStore::default());
    assert!(host.window_visible);

    host.close();
    assert!(host.process_alive);
    assert!(host.window_live);
    assert!(!host.window_visible);
    assert_eq!(host.store.writes(), 1);

    let exit = host.dispatch(ShellAction::ExitRequested { explicit: false });
    assert_eq!(exit, vec![ShellEffect::PreventExit]);

    host.dispatch(ShellAction::Reactivate);
    assert!(host.window_visible);
    assert_eq!(host.windows_created, 1);
    assert_eq!(host.runtime.state().presence, WindowPresence::Visible);
}

#[test]
fn repeated_ensure_window_visible_keeps_one_window() {
    let mut host = FakeHost::launch(HostPlatform::Linux, MemoryWindowStateStore::default());
    host.dispatch(ShellAction::EnsureWindowVisible);
    host.dispatch(ShellAction::EnsureWindowVisible);
    host.dispatch(ShellAction::Reactivate);
    assert_eq!(host.windows_created, 1);
}

#[test]
fn closing_on_non_resident_platform_quits() {
    let mut host = FakeHost::launch(HostPlatform::Linux, MemoryWindowStateStore::default());
    host.dispatch(moved(1, 1));
    host.close();

    assert!(!host.process_alive);
    assert_eq!(host.armed_timer, None);
    assert_eq!(host.store.writes(), 1);
    assert_eq!(host.runtime.state().presence, WindowPresence::Absent);
}
