//! TesseraCli Config
//!
//! The config file lives at `~/.tessera/config.toml` unless `-c/--config` names another
//! file. It is created with defaults the first time the CLI runs.
use crate::error::{Error, ErrorKind};
use abscissa_core::tracing::debug;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tessera::chain::{embed::COSMOSHUB_CHAIN_ID, ChainStore};

/// Config directory under the home directory
pub const CONFIG_DIR: &str = ".tessera";
/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

// Path the running command loaded its config from.
static LOADED_CONFIG_PATH: OnceCell<PathBuf> = OnceCell::new();

/// TesseraCli Configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TesseraCliConfig {
    /// Chain shown by `chains show-default` and used when a command omits a chain id
    pub default_chain: String,
    /// Location of the chain store file
    pub store_path: String,
}

impl Default for TesseraCliConfig {
    fn default() -> Self {
        let store_path = ChainStore::default_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| format!("{}/chains.toml", CONFIG_DIR));

        TesseraCliConfig {
            default_chain: COSMOSHUB_CHAIN_ID.to_string(),
            store_path,
        }
    }
}

impl TesseraCliConfig {
    /// Opens the chain store named by `store_path`.
    pub fn open_store(&self) -> Result<ChainStore, Error> {
        Ok(ChainStore::load(Path::new(&self.store_path))?)
    }

    /// Writes this config to the file it was loaded from.
    pub fn save(&self) -> Result<PathBuf, Error> {
        let path = match LOADED_CONFIG_PATH.get() {
            Some(path) => path.clone(),
            None => get_config_path()?,
        };
        fs::write(&path, toml::to_string(self)?)?;
        debug!("wrote config to {}", path.display());

        Ok(path)
    }
}

/// Builds the config path in the user's home directory
pub fn get_config_path() -> Result<PathBuf, Error> {
    let mut path = dirs::home_dir()
        .ok_or_else(|| ErrorKind::Config.context("could not determine home directory"))?;
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);

    Ok(path)
}

/// Records the file the config is loaded from so later writes go back to it.
pub fn set_loaded_path(path: &Path) {
    let _ = LOADED_CONFIG_PATH.set(path.to_path_buf());
}

/// Initializes the tessera config dir and file if they do not exist.
pub fn init() -> Result<PathBuf, Error> {
    let path = get_config_path()?;
    let config_dir = path
        .parent()
        .ok_or_else(|| ErrorKind::Config.context("config path has no parent directory"))?;
    if !config_dir.exists() {
        debug!("creating config directory {}", config_dir.display());
        fs::create_dir_all(config_dir)?;
    }
    if !path.exists() {
        debug!("creating config file with default chain");
        let content = toml::to_string(&TesseraCliConfig::default())?;
        fs::write(&path, content)?;
    }

    Ok(path)
}
