//! Workspace configuration.
//!
//! The configuration record carries the remote workspace identity and the
//! credentials for the publishing endpoint. It is supplied before assembly
//! begins and never read again after construction starts; credentials are
//! injected here rather than compiled into the model code.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{ArmatureError, ConfigError};

/// Static workspace configuration supplied at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// Remote workspace the document is published into.
    #[serde(default)]
    pub workspace_id: u64,

    /// Workspace display name, written into the document header.
    #[serde(default = "default_workspace_name")]
    pub workspace_name: String,

    #[serde(default)]
    pub workspace_description: String,

    /// API key for the publishing endpoint.
    #[serde(default)]
    pub api_key: String,

    /// API secret for the publishing endpoint.
    #[serde(default)]
    pub api_secret: String,

    /// Base URL of the documentation service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_workspace_name() -> String {
    "Workspace".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            workspace_id: 0,
            workspace_name: default_workspace_name(),
            workspace_description: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            endpoint: default_endpoint(),
        }
    }
}

impl WorkspaceConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when the path does not exist and
    /// [`ConfigError::Parse`] when the file is not valid configuration TOML,
    /// both wrapped in [`ArmatureError::Config`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArmatureError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ArmatureError::Config(ConfigError::MissingFile(
                path.to_path_buf(),
            )));
        }

        let content = fs::read_to_string(path)?;
        let config: WorkspaceConfig = toml::from_str(&content)
            .map_err(ConfigError::from)
            .map_err(ArmatureError::Config)?;

        Ok(config)
    }
}
