use crate::errors::{Error, Result};
use crate::structs::ChannelConfig;

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub trait ConfigStore: Send {
    fn read(&self) -> Result<ChannelConfig>;

    fn write(&mut self, config: &ChannelConfig) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> JsonFileStore {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn read(&self) -> Result<ChannelConfig> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write(&mut self, config: &ChannelConfig) -> Result<()> {
        let data = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, data)?;
        debug!("wrote channel config to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    contents: Option<ChannelConfig>,
    writes: usize,
}

impl MemoryStore {
    pub const fn new() -> MemoryStore {
        MemoryStore {
            contents: None,
            writes: 0,
        }
    }

    pub fn with_config(config: ChannelConfig) -> MemoryStore {
        MemoryStore {
            contents: Some(config),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&ChannelConfig> {
        self.contents.as_ref()
    }

    /// Number of writes since creation
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self) -> Result<ChannelConfig> {
        self.contents.clone().ok_or(Error::NoConfig)
    }

    fn write(&mut self, config: &ChannelConfig) -> Result<()> {
        self.contents = Some(config.clone());
        self.writes += 1;
        Ok(())
    }
}
