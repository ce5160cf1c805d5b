//! Import configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Key the location root container is registered under.
pub const DEFAULT_ROOT_KEY: &str = "Locations";

/// Stable identity of the location root container.
pub const DEFAULT_ROOT_GUID: Uuid = Uuid::from_u128(0x3a59_6e25_4b13_41d6_9958_c21d_38b7_1a09);

/// Where to read locations from and where to put them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Location dataset (JSON array).
    pub input_path: PathBuf,
    /// File-backed content store snapshot.
    pub store_path: PathBuf,
    /// Root container key.
    pub root_key: String,
    /// Identity used when registering the root container.
    pub root_id: Uuid,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./locations.json"),
            store_path: PathBuf::from("./content.json"),
            root_key: DEFAULT_ROOT_KEY.to_string(),
            root_id: DEFAULT_ROOT_GUID,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ImportConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
