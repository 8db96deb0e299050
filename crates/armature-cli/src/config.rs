//! Configuration file resolution for the CLI.

use std::path::PathBuf;

use directories::ProjectDirs;
use log::debug;

use armature::{ArmatureError, config::WorkspaceConfig};

/// Load the workspace configuration.
///
/// An explicit path must exist and parse. Without one, the platform config
/// directory is probed for `armature/config.toml`; if that file is absent
/// too, the defaults apply (useful for dry runs that only write the document
/// to disk).
pub fn load_config(path: Option<&String>) -> Result<WorkspaceConfig, ArmatureError> {
    if let Some(path) = path {
        debug!(path; "Loading configuration");
        return WorkspaceConfig::load(path);
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            debug!(path:? = default_path; "Loading configuration from default location");
            return WorkspaceConfig::load(default_path);
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(WorkspaceConfig::default())
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "armature").map(|dirs| dirs.config_dir().join("config.toml"))
}
