use crate::errors::Result;
use crate::store::ConfigStore;
use crate::structs::ChannelConfig;

use log::{info, warn};

#[derive(Debug)]
pub struct Registry<S> {
    config: ChannelConfig,
    store: S,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelaySnapshot(Vec<(u64, u64)>);

impl RelaySnapshot {
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for RelaySnapshot {
    type Item = (u64, u64);
    type IntoIter = std::vec::IntoIter<(u64, u64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RelaySnapshot {
    type Item = (u64, u64);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (u64, u64)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl<S: ConfigStore> Registry<S> {
    pub fn load(store: S) -> Registry<S> {
        let config = match store.read() {
            Ok(config) => {
                info!(
                    "loaded channel config with {} primary and {} relay channels",
                    config.primary_channel.len(),
                    config.relay_channels.len()
                );
                config
            }
            Err(why) => {
                warn!("Could not read channel config, starting with empty settings: {why}");
                ChannelConfig::default()
            }
        };

        Registry { config, store }
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.write(&self.config)
    }

    pub fn set_relay(&mut self, server_id: u64, channel_id: u64) -> Result<()> {
        if let Some(previous) = self.config.relay_channels.insert(server_id, channel_id) {
            info!("relay for server {server_id} moved from {previous} to {channel_id}");
        } else {
            info!("relay for server {server_id} set to {channel_id}");
        }
        self.save()
    }

    pub fn remove_relay(&mut self, server_id: u64) -> Result<bool> {
        match self.config.relay_channels.remove(&server_id) {
            Some(channel_id) => {
                info!("removed relay {channel_id} for server {server_id}");
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Only while the relay still points at `channel_id`
    pub fn remove_relay_if(&mut self, server_id: u64, channel_id: u64) -> Result<bool> {
        if self.config.relay_channels.get(&server_id) != Some(&channel_id) {
            return Ok(false);
        }
        self.remove_relay(server_id)
    }
}

impl<S> Registry<S> {
    pub fn is_primary(&self, server_id: u64, channel_id: u64) -> bool {
        self.config.primary_channel.get(&server_id) == Some(&channel_id)
    }

    pub fn relay_channel(&self, server_id: u64) -> Option<u64> {
        self.config.relay_channels.get(&server_id).copied()
    }

    pub fn relay_targets(&self) -> RelaySnapshot {
        RelaySnapshot(
            self.config
                .relay_channels
                .iter()
                .map(|(server, channel)| (*server, *channel))
                .collect(),
        )
    }

    pub fn relay_count(&self) -> usize {
        self.config.relay_channels.len()
    }

    pub const fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
