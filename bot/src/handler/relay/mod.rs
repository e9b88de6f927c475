mod fan_out;
mod sync;

use crate::errors::Error;
use crate::handler::footer::FooterFormat;
use crate::structs::{CorrelationTable, Presentation, SourceMessage};

use chrono::{DateTime, FixedOffset};
use db::{ConfigStore, Registry};
use log::{debug, error, warn};
use serenity::model::id::{ChannelId, GuildId};

pub struct Relay<S> {
    registry: Registry<S>,
    correlations: CorrelationTable,
    footer: FooterFormat,
}

impl<S: ConfigStore> Relay<S> {
    pub fn new(registry: Registry<S>, footer: FooterFormat) -> Relay<S> {
        Relay {
            registry,
            correlations: CorrelationTable::new(),
            footer,
        }
    }

    pub const fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<S> {
        &mut self.registry
    }

    pub const fn correlations(&self) -> &CorrelationTable {
        &self.correlations
    }

    pub fn qualifies(&self, msg: &SourceMessage) -> bool {
        self.registry
            .is_primary(*msg.guild_id.as_u64(), *msg.channel_id.as_u64())
    }

    fn render(&self, msg: &SourceMessage, now: &DateTime<FixedOffset>) -> Presentation {
        Presentation::render(msg, self.footer.render(now))
    }

    fn handle_failure(&mut self, server_id: GuildId, channel_id: ChannelId, action: &str, why: &Error) {
        if !why.is_unreachable_destination() {
            warn!("Failed to {action} in channel {channel_id} of server {server_id}: {why}");
            return;
        }

        error!(
            "Channel {channel_id} in server {server_id} is no longer accessible ({why}). \
            Removing from relay channels."
        );
        match self
            .registry
            .remove_relay_if(*server_id.as_u64(), *channel_id.as_u64())
        {
            Ok(true) => {}
            Ok(false) => debug!("relay for server {server_id} no longer points at {channel_id}"),
            Err(why) => error!("Failed to save relay channels after removing {channel_id}: {why}"),
        }
    }
}
