use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowSection {
    title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoteSection {
    home_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeepLinkSection {
    scheme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StartupSection {
    placeholder: String,
    navigation_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistenceSection {
    state_file: String,
    save_debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShellManifest {
    schema_version: u32,
    window: WindowSection,
    remote: RemoteSection,
    deep_link: DeepLinkSection,
    startup: StartupSection,
    persistence: PersistenceSection,
}

fn validate(manifest: &ShellManifest, path: &str) {
    if manifest.schema_version != 1 {
        panic!(
            "shell manifest schema mismatch in {path}: expected 1 found {}",
            manifest.schema_version
        );
    }
    if !manifest.remote.home_url.starts_with("https://") {
        panic!(
            "remote.home_url in {path} must be an https URL, found `{}`",
            manifest.remote.home_url
        );
    }
    let scheme = &manifest.deep_link.scheme;
    let scheme_ok = scheme
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));
    if !scheme_ok {
        panic!("deep_link.scheme `{scheme}` in {path} is not a valid URL scheme");
    }
    if manifest.startup.navigation_delay_ms == 0 || manifest.persistence.save_debounce_ms == 0 {
        panic!("startup/persistence delays in {path} must be non-zero");
    }
    let state_file = &manifest.persistence.state_file;
    if state_file.is_empty() || state_file.contains(['/', '\\']) {
        panic!("persistence.state_file `{state_file}` in {path} must be a bare file name");
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("shell.manifest.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: ShellManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&manifest, &path.display().to_string());

    let json = serde_json::to_string_pretty(&manifest).expect("serialize shell manifest");
    let generated = format!(
        "/// Build-time generated shell manifest JSON.\n\
pub const SHELL_MANIFEST_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("shell_manifest_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
