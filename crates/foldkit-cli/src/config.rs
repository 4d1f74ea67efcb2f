mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{CliOverrides, build_config};
pub use defaults::DefaultsConfig;
pub use file::FileConfig;
pub use models::{AppConfig, ValidationPreset};

use crate::error::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

/// The per-user configuration file, e.g. `~/.config/foldkit/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "foldkit", "foldkit").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Picks the explicit `--config` path, falling back to the per-user file when it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = default_config_path()?;
    if candidate.is_file() {
        debug!("Using configuration file found at {:?}", candidate);
        Some(candidate)
    } else {
        None
    }
}

pub fn load(
    explicit: Option<&Path>,
    set_values: &[String],
    overrides: &CliOverrides,
) -> Result<AppConfig> {
    let path = resolve_config_path(explicit);
    build_config(path.as_deref(), set_values, overrides)
}
