//! Configuration loading and root folder resolution
//!
//! Resolution priority order for every tunable:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Default HTTP port (the framework default the service has always served on)
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Environment variable naming the data root folder
pub const ROOT_ENV_VAR: &str = "PROFILE_BOARD_ROOT";

/// Environment variable naming the bind host
pub const HOST_ENV_VAR: &str = "PROFILE_BOARD_HOST";

/// Environment variable naming the bind port
pub const PORT_ENV_VAR: &str = "PROFILE_BOARD_PORT";

/// Database file name inside the root folder
const DATABASE_FILE: &str = "board.db";

/// Values read from the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub root_folder: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    /// Load the config file from the first existing candidate location.
    ///
    /// A missing or unparsable file is not fatal; resolution falls through
    /// to the next tier.
    pub fn load() -> FileConfig {
        for path in candidate_config_paths() {
            if !path.exists() {
                continue;
            }
            match FileConfig::from_path(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded config file: {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                }
            }
        }
        FileConfig::default()
    }

    /// Parse a config file at an explicit path
    pub fn from_path(path: &Path) -> Result<FileConfig> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Candidate config file locations, in priority order
fn candidate_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("profile-board").join("config.toml"));
    }
    if cfg!(target_os = "linux") {
        paths.push(PathBuf::from("/etc/profile-board/config.toml"));
    }
    paths
}

/// Resolve the data root folder
pub fn resolve_root_folder(cli_arg: Option<&str>, file: &FileConfig) -> PathBuf {
    resolve_root_folder_from(
        cli_arg,
        std::env::var(ROOT_ENV_VAR).ok().as_deref(),
        file.root_folder.as_deref(),
    )
}

/// Tier selection for the root folder, with all inputs explicit
pub fn resolve_root_folder_from(
    cli_arg: Option<&str>,
    env_value: Option<&str>,
    file_value: Option<&str>,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }
    if let Some(path) = env_value {
        return PathBuf::from(path);
    }
    if let Some(path) = file_value {
        return PathBuf::from(path);
    }
    default_root_folder()
}

/// Resolve the listen address (host, port)
pub fn resolve_listen(
    cli_host: Option<&str>,
    cli_port: Option<u16>,
    file: &FileConfig,
) -> (String, u16) {
    let env_host = std::env::var(HOST_ENV_VAR).ok();
    let env_port = std::env::var(PORT_ENV_VAR)
        .ok()
        .and_then(|v| v.parse::<u16>().ok());
    resolve_listen_from(
        cli_host,
        cli_port,
        env_host.as_deref(),
        env_port,
        file.host.as_deref(),
        file.port,
    )
}

/// Tier selection for the listen address, with all inputs explicit
pub fn resolve_listen_from(
    cli_host: Option<&str>,
    cli_port: Option<u16>,
    env_host: Option<&str>,
    env_port: Option<u16>,
    file_host: Option<&str>,
    file_port: Option<u16>,
) -> (String, u16) {
    let host = cli_host
        .or(env_host)
        .or(file_host)
        .unwrap_or(DEFAULT_HOST)
        .to_string();
    let port = cli_port.or(env_port).or(file_port).unwrap_or(DEFAULT_PORT);
    (host, port)
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("profile-board"))
        .unwrap_or_else(|| PathBuf::from("./profile_board_data"))
}

/// Create the root folder if it does not exist
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}
