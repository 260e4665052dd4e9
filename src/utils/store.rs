// Durable store for the bot configuration record
// Single JSON file, read once at startup, rewritten after every mutation

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::config::BotConfig;

/// Errors raised while loading or persisting the configuration file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Owns the single in-memory configuration record and its file on disk.
///
/// Handlers receive this through the shared framework data instead of a
/// global, so tests can run against a store pointed at a scratch file.
/// Writes go through a sibling temp file and a rename, so a crash mid-write
/// leaves the previous record intact.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: RwLock<BotConfig>,
}

impl ConfigStore {
    /// Load the record from `path`, or start from the default record when the
    /// file does not exist yet. An unreadable or malformed file is an error;
    /// startup must fail rather than silently run on defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let config = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            BotConfig::default()
        };

        Ok(Self {
            path,
            config: RwLock::new(config),
        })
    }

    /// Clone of the current record
    pub async fn snapshot(&self) -> BotConfig {
        self.config.read().await.clone()
    }

    /// Apply `mutate` to the record, flush it to disk, and return the
    /// post-mutation snapshot for rendering. The write lock is held across
    /// the flush so two mutations cannot interleave their file writes.
    pub async fn update<F>(&self, mutate: F) -> Result<BotConfig, StoreError>
    where
        F: FnOnce(&mut BotConfig),
    {
        let mut config = self.config.write().await;
        mutate(&mut config);
        write_record(&self.path, &config)?;
        debug!("Configuration persisted to {}", self.path.display());
        Ok(config.clone())
    }
}

/// Serialize the full record and atomically replace the file
fn write_record(path: &Path, config: &BotConfig) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(config).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
