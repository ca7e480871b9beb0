use crate::{
    chain::{
        embed,
        info::{AccessOrigin, ChainInfo, ChainInfoWithEmbed, SuggestedChainInfo},
        schema::{self, SuggestingChainInfo},
    },
    error::ChainStoreError,
    utils,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

// Constants
pub const DEFAULT_STORE_DIR: &str = ".tessera";
pub const DEFAULT_STORE_NAME: &str = "chains.toml";
/// Unix permissions for dir
const STORE_DIR_PERMISSIONS: u32 = 0o700;

// Toml structs
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChainStoreToml {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_chain: Option<String>,
    #[serde(default)]
    pub suggested: Vec<SuggestedChainInfo>,
    #[serde(default)]
    pub access_origins: Vec<AccessOrigin>,
}

/// The set of chains the wallet knows about: embedded chains plus chains suggested by sites,
/// together with the origins allowed to use each chain and the currently selected chain.
///
/// A store created with [`ChainStore::load`] writes itself back to its file after every change.
#[derive(Debug)]
pub struct ChainStore {
    path: Option<PathBuf>,
    embedded: Vec<ChainInfo>,
    suggested: Vec<SuggestedChainInfo>,
    access_origins: BTreeMap<String, Vec<String>>,
    current: String,
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainStore {
    /// Creates an in memory store holding only the embedded chains.
    pub fn new() -> Self {
        ChainStore {
            path: None,
            embedded: embed::embedded_chain_infos(),
            suggested: Vec::new(),
            access_origins: BTreeMap::new(),
            current: embed::COSMOSHUB_CHAIN_ID.to_string(),
        }
    }

    /// Default store location, `~/.tessera/chains.toml`.
    pub fn default_path() -> Result<PathBuf, ChainStoreError> {
        let mut path = dirs::home_dir().ok_or_else(|| {
            ChainStoreError::FileIO("could not determine home directory".to_string())
        })?;
        path.push(DEFAULT_STORE_DIR);
        path.push(DEFAULT_STORE_NAME);

        Ok(path)
    }

    /// Opens a file backed store. The file is read if it exists; its parent directory is
    /// created otherwise. Suggested chains are validated again on load.
    pub fn load(path: &Path) -> Result<ChainStore, ChainStoreError> {
        if path.is_dir() {
            return Err(ChainStoreError::FileIO(
                "Path is a dir; must be a file.".to_string(),
            ));
        }

        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| ChainStoreError::FileIO(e.to_string()))?;

                #[cfg(unix)]
                std::fs::set_permissions(
                    dir,
                    std::fs::Permissions::from_mode(STORE_DIR_PERMISSIONS),
                )
                .map_err(|e| ChainStoreError::FileIO(e.to_string()))?;
            }
        }

        let mut store = ChainStore::new();
        store.path = Some(path.to_path_buf());

        if !path.exists() {
            debug!("chain store {} does not exist yet", path.display());
            return Ok(store);
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ChainStoreError::FileIO(e.to_string()))?;
        // Possible contents is empty, check to avoid parsing errors
        if content.trim().is_empty() {
            return Ok(store);
        }

        let toml: ChainStoreToml =
            toml::from_str(&content).map_err(|e| ChainStoreError::Toml(e.to_string()))?;

        for suggested in toml.suggested {
            let info = SuggestingChainInfo::new(suggested.chain_info).validate()?;
            if embed::is_embedded(&info.chain_id) {
                return Err(ChainStoreError::EmbeddedChain(info.chain_id));
            }
            store.suggested.push(SuggestedChainInfo {
                origin: suggested.origin,
                chain_info: info,
            });
        }
        for access in toml.access_origins {
            store.access_origins.insert(access.chain_id, access.origins);
        }
        if let Some(current) = toml.current_chain {
            if store.has_chain(&current) {
                store.current = current;
            }
        }
        debug!(
            "loaded {} suggested chains from {}",
            store.suggested.len(),
            path.display()
        );

        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Every known chain, embedded chains first.
    pub fn chain_infos(&self) -> Vec<ChainInfoWithEmbed> {
        self.embedded
            .iter()
            .map(|info| ChainInfoWithEmbed {
                embedded: true,
                chain_info: info.clone(),
            })
            .chain(self.suggested.iter().map(|s| ChainInfoWithEmbed {
                embedded: false,
                chain_info: s.chain_info.clone(),
            }))
            .collect()
    }

    pub fn suggested_chain_infos(&self) -> &[SuggestedChainInfo] {
        &self.suggested
    }

    pub fn chain_info(&self, chain_id: &str) -> Option<&ChainInfo> {
        self.embedded
            .iter()
            .find(|info| info.chain_id == chain_id)
            .or_else(|| {
                self.suggested
                    .iter()
                    .map(|s| &s.chain_info)
                    .find(|info| info.chain_id == chain_id)
            })
    }

    pub fn has_chain(&self, chain_id: &str) -> bool {
        self.chain_info(chain_id).is_some()
    }

    /// Validates a JSON suggestion from `origin` and stores it.
    pub fn suggest_chain(
        &mut self,
        json: &str,
        origin: &str,
    ) -> Result<&ChainInfo, ChainStoreError> {
        let info = schema::parse_suggesting_chain_info(json)?;

        self.add_suggested_chain(info, origin)
    }

    /// Stores an already validated chain on behalf of `origin` and grants the origin access to
    /// it. A chain suggested earlier under the same id is replaced.
    pub fn add_suggested_chain(
        &mut self,
        info: ChainInfo,
        origin: &str,
    ) -> Result<&ChainInfo, ChainStoreError> {
        if embed::is_embedded(&info.chain_id) {
            return Err(ChainStoreError::EmbeddedChain(info.chain_id));
        }
        let origin = normalize_origin(origin)?;
        let chain_id = info.chain_id.clone();

        self.suggested.retain(|s| s.chain_info.chain_id != chain_id);
        self.suggested.push(SuggestedChainInfo {
            origin: origin.clone(),
            chain_info: info,
        });
        self.insert_access_origin(&chain_id, origin.clone());
        self.persist()?;
        info!("added chain {} suggested by {}", chain_id, origin);

        self.chain_info(&chain_id)
            .ok_or(ChainStoreError::UnknownChain(chain_id))
    }

    /// Removes a suggested chain and every access grant for it.
    pub fn remove_chain(&mut self, chain_id: &str) -> Result<SuggestedChainInfo, ChainStoreError> {
        if embed::is_embedded(chain_id) {
            return Err(ChainStoreError::EmbeddedChain(chain_id.to_string()));
        }
        let index = self
            .suggested
            .iter()
            .position(|s| s.chain_info.chain_id == chain_id)
            .ok_or_else(|| ChainStoreError::UnknownChain(chain_id.to_string()))?;

        let removed = self.suggested.remove(index);
        self.access_origins.remove(chain_id);
        if self.current == chain_id {
            self.current = embed::COSMOSHUB_CHAIN_ID.to_string();
        }
        self.persist()?;
        info!("removed chain {}", chain_id);

        Ok(removed)
    }

    /// Selects the chain subsequent operations apply to.
    pub fn set_chain(&mut self, chain_id: &str) -> Result<(), ChainStoreError> {
        if !self.has_chain(chain_id) {
            return Err(ChainStoreError::UnknownChain(chain_id.to_string()));
        }
        if self.current != chain_id {
            self.current = chain_id.to_string();
            self.persist()?;
        }

        Ok(())
    }

    pub fn current_chain_id(&self) -> &str {
        &self.current
    }

    pub fn current(&self) -> &ChainInfo {
        // the current id always refers to a known chain
        self.chain_info(&self.current)
            .unwrap_or_else(|| &self.embedded[0])
    }

    pub fn access_origins(&self) -> Vec<AccessOrigin> {
        self.access_origins
            .iter()
            .map(|(chain_id, origins)| AccessOrigin {
                chain_id: chain_id.clone(),
                origins: origins.clone(),
            })
            .collect()
    }

    pub fn add_access_origin(
        &mut self,
        chain_id: &str,
        origin: &str,
    ) -> Result<(), ChainStoreError> {
        if !self.has_chain(chain_id) {
            return Err(ChainStoreError::UnknownChain(chain_id.to_string()));
        }
        let origin = normalize_origin(origin)?;
        self.insert_access_origin(chain_id, origin);

        self.persist()
    }

    pub fn remove_access_origin(
        &mut self,
        chain_id: &str,
        origin: &str,
    ) -> Result<(), ChainStoreError> {
        let origin = normalize_origin(origin)?;
        if let Some(origins) = self.access_origins.get_mut(chain_id) {
            origins.retain(|o| *o != origin);
            if origins.is_empty() {
                self.access_origins.remove(chain_id);
            }
        }

        self.persist()
    }

    pub fn has_access(&self, chain_id: &str, origin: &str) -> bool {
        match normalize_origin(origin) {
            Ok(origin) => self
                .access_origins
                .get(chain_id)
                .map(|origins| origins.contains(&origin))
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    fn insert_access_origin(&mut self, chain_id: &str, origin: String) {
        let origins = self.access_origins.entry(chain_id.to_string()).or_default();
        if !origins.contains(&origin) {
            origins.push(origin);
        }
    }

    /// Writes the store back to its file. In memory stores do nothing.
    pub fn persist(&self) -> Result<(), ChainStoreError> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };

        let toml = ChainStoreToml {
            current_chain: Some(self.current.clone()),
            suggested: self.suggested.clone(),
            access_origins: self.access_origins(),
        };
        // going through toml::Value orders plain values ahead of tables
        let value =
            toml::Value::try_from(&toml).map_err(|e| ChainStoreError::Toml(e.to_string()))?;
        let toml_string =
            toml::to_string(&value).map_err(|e| ChainStoreError::Toml(e.to_string()))?;
        debug!("writing chain store to {}", path.display());

        std::fs::write(path, toml_string).map_err(|e| ChainStoreError::FileIO(e.to_string()))
    }
}

fn normalize_origin(origin: &str) -> Result<String, ChainStoreError> {
    utils::origin_of(origin).ok_or_else(|| ChainStoreError::InvalidOrigin(origin.to_string()))
}
