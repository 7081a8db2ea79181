// src/utils/config.rs
use crate::utils::error::ConfigError;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the per-user config, relative to the executable.
pub const DEFAULT_CONFIG_PATH: &str = "user_config.yml";

const ONEDRIVE_ROOT_KEY: &str = "onedrive_root";

/// Local, per-user settings read from a YAML mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserConfig {
    values: Mapping,
}

impl UserConfig {
    /// Parses a YAML document. The top level must be a mapping.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(values) => Ok(Self { values }),
            other => {
                tracing::debug!("Config top level is {:?}, expected a mapping", other);
                Err(ConfigError::NotAMapping)
            }
        }
    }

    /// Looks up a string value by key.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        value
            .as_str()
            .ok_or_else(|| ConfigError::InvalidValue(key.to_string()))
    }

    /// The OneDrive root folder configured for this machine.
    pub fn onedrive_root(&self) -> Result<&str, ConfigError> {
        self.get_str(ONEDRIVE_ROOT_KEY)
    }
}

/// Anchors a relative config path to the directory holding the executable,
/// so the same file is found whatever the working directory is.
/// Absolute paths are returned unchanged.
pub fn resolve_config_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let exe = std::env::current_exe().map_err(ConfigError::ExeDir)?;
    let base = exe.parent().unwrap_or_else(|| Path::new(""));
    Ok(base.join(path))
}

/// Reads and parses the config file at `path`.
/// Relative paths resolve against the executable's directory.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<UserConfig, ConfigError> {
    let path = resolve_config_path(path.as_ref())?;
    tracing::debug!("Loading user config from {}", path.display());

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    UserConfig::from_yaml_str(&contents)
}

/// Convenience wrapper: load the file and return its `onedrive_root` value.
pub fn get_onedrive_root<P: AsRef<Path>>(path: P) -> Result<String, ConfigError> {
    let config = load_config(path)?;
    config.onedrive_root().map(str::to_string)
}
