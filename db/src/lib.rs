mod errors;
mod registry;
mod store;
pub mod structs;

pub use errors::{Error, Result};
pub use registry::{Registry, RelaySnapshot};
pub use store::{ConfigStore, JsonFileStore, MemoryStore};
pub use structs::ChannelConfig;

use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "./channels.json";

#[inline]
pub fn open_registry(path: impl AsRef<Path>) -> Registry<JsonFileStore> {
    Registry::load(JsonFileStore::new(path))
}
