//! Configuration loader with file resolution.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Config file name searched for in the standard locations.
const CONFIG_FILE_NAME: &str = "testbench.toml";

/// Load configuration using standard resolution order.
///
/// Resolution priority (highest to lowest):
/// 1. explicit path (usually from `--config`)
/// 2. `./testbench.toml` (current directory)
/// 3. the user config dir (`~/.config/marlin-testbench/testbench.toml`
///    on Linux, platform equivalents elsewhere)
/// 4. built-in defaults (no file required)
pub fn load(explicit: Option<&Path>) -> ConfigResult<Config> {
    let config = match explicit {
        Some(path) => load_from_file(path)?,
        None => match resolve_config_path() {
            Some(path) => load_from_file(&path)?,
            None => Config::default(),
        },
    };
    config.validate()?;
    Ok(config)
}

/// Find a config file in the standard locations, if one exists.
pub fn resolve_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "marlin-testbench") {
        let path = dirs.config_dir().join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}
