//! One JSON file of rain settings per cloud.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use drizzle_core::RainConfig;

use crate::error::StoreError;

/// Per-cloud settings files, named `cloud_<id>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct CloudStore {
    dir: PathBuf,
}

impl CloudStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the settings of cloud `id`.
    pub fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("cloud_{id}.json"))
    }

    /// Read the settings of cloud `id`, writing `defaults` first if the file
    /// does not exist yet.
    pub fn load_or_create(&self, id: u64, defaults: &RainConfig) -> Result<RainConfig, StoreError> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let config: RainConfig = serde_json::from_str(&text)
                    .map_err(|source| StoreError::Json { path, source })?;
                tracing::debug!(id, "loaded existing cloud settings");
                Ok(config.normalized())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.save(id, defaults)?;
                Ok(*defaults)
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Write the settings of cloud `id`.
    pub fn save(&self, id: u64, config: &RainConfig) -> Result<(), StoreError> {
        let path = self.path_for(id);
        let json = serde_json::to_string(config).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })?;
        tracing::trace!(id, "saved cloud settings");
        Ok(())
    }

    /// Delete the settings of cloud `id`; a missing file is not an error.
    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
