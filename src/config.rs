use crate::error::{MinVerError, Result};
use crate::settings::MinVerSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "minver.toml";

/// Represents the contents of a `minver.toml` settings file.
///
/// Holds the explicit MinVer settings; the `[settings.env]` table carries
/// per-call `MINVER*` overrides.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: MinVerSettings,
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Config> {
        toml::from_str(text).map_err(|e| MinVerError::config(e.to_string()))
    }
}

/// Returns `<user config dir>/minver/minver.toml`, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("minver").join(CONFIG_FILE_NAME))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `minver.toml` in current directory
/// 3. `minver/minver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = Path::new(".").join(CONFIG_FILE_NAME);
            if local.exists() {
                local
            } else if let Some(user) = user_config_path().filter(|p| p.exists()) {
                user
            } else {
                log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(Config::default());
            }
        }
    };

    log::debug!("Loading settings from {}", path.display());
    let text = fs::read_to_string(&path)
        .map_err(|e| MinVerError::config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&text).map_err(|e| MinVerError::config(format!("{}: {}", path.display(), e)))
}
