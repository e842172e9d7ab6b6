use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileManagerToml {
    schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    share_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    toast_duration_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_toast_duration_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drag_preview_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_preview_bytes: Option<u64>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("file_manager.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: FileManagerToml = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if config.schema_version != 1 {
        panic!(
            "config schema mismatch in {}: expected 1 found {}",
            path.display(),
            config.schema_version
        );
    }
    for (key, value) in [
        ("toast_duration_ms", config.toast_duration_ms),
        ("error_toast_duration_ms", config.error_toast_duration_ms),
    ] {
        if value == Some(0) {
            panic!("{key} in {} must be greater than zero", path.display());
        }
    }

    let json = serde_json::to_string_pretty(&config).expect("serialize file manager config");
    let generated = format!(
        "/// Build-time generated file manager configuration JSON.\n\
pub const FILE_MANAGER_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("file_manager_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
