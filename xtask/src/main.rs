//! Packaging and developer workflow commands (`cargo xtask`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use serde::Deserialize;

const TAURI_CONFIG: &str = "crates/desktop_tauri/tauri.conf.json";
const MACOS_BUNDLE_DIR: &str = "target/release/bundle/macos";
const QUARANTINE_ATTR: &str = "com.apple.quarantine";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TauriConfig {
    product_name: String,
}

fn main() -> ExitCode {
    let root = workspace_root();
    let mut args = env::args().skip(1);

    let Some(cmd) = args.next() else {
        print_usage();
        return ExitCode::from(2);
    };

    let rest: Vec<String> = args.collect();

    let result = match cmd.as_str() {
        "unquarantine" => unquarantine(&root, rest),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown xtask command: {other}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn print_usage() {
    eprintln!(
        "Usage: cargo xtask <command> [args]\n\
         \n\
         Commands:\n\
           unquarantine [app]  Strip {QUARANTINE_ATTR} from the bundled .app (macOS only)\n\
           help                Show this message\n"
    );
}

fn unquarantine(root: &Path, args: Vec<String>) -> Result<(), String> {
    if !cfg!(target_os = "macos") {
        println!("not on macOS; nothing to unquarantine");
        return Ok(());
    }

    let app = match args.first() {
        Some(path) => PathBuf::from(path),
        None => default_app_bundle(root)?,
    };
    if !app.exists() {
        println!("{} not found; skipping quarantine removal", app.display());
        return Ok(());
    }

    println!("removing {QUARANTINE_ATTR} from {}", app.display());
    strip_quarantine(&app)?;

    let frameworks = app.join("Contents").join("Frameworks");
    for helper in nested_apps(&frameworks)? {
        strip_quarantine(&helper)?;
    }
    Ok(())
}

fn default_app_bundle(root: &Path) -> Result<PathBuf, String> {
    let path = root.join(TAURI_CONFIG);
    let raw = fs::read_to_string(&path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let config: TauriConfig = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;
    Ok(root
        .join(MACOS_BUNDLE_DIR)
        .join(format!("{}.app", config.product_name)))
}

fn nested_apps(dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    let entries =
        fs::read_dir(dir).map_err(|err| format!("failed to list {}: {err}", dir.display()))?;
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to list {}: {err}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "app") {
            found.push(path);
        } else if path.is_dir() {
            found.extend(nested_apps(&path)?);
        }
    }
    found.sort();
    Ok(found)
}

fn strip_quarantine(path: &Path) -> Result<(), String> {
    print_command("xattr", path);
    let status = Command::new("xattr")
        .args(["-dr", QUARANTINE_ATTR])
        .arg(path)
        .status()
        .map_err(|err| format!("failed to start `xattr`: {err}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("`xattr` exited with status {status}"))
    }
}

fn print_command(program: &str, target: &Path) {
    println!("+ {program} -dr {QUARANTINE_ATTR} {}", target.display());
}
