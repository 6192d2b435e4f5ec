use std::env;
use std::path::PathBuf;

use crate::core::config::config_loader::ENV_PREFIX;

pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Output directory: `NEXTCLOUD_K8S_OUT_DIR` when set, otherwise `dist/`.
pub fn default_output_dir() -> PathBuf {
    env::var(format!("{ENV_PREFIX}OUT_DIR"))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}
