use super::Relay;
use crate::errors::Result;
use crate::platform::Platform;
use crate::structs::{Presentation, RelayedCopy, SourceMessage};

use chrono::{DateTime, FixedOffset};
use db::ConfigStore;
use log::{info, trace};
use serenity::model::id::{ChannelId, GuildId, MessageId};

async fn send_primary<P: Platform>(
    platform: &P,
    channel_id: ChannelId,
    presentation: &Presentation,
) -> Result<MessageId> {
    let channel_id = platform.resolve_channel(channel_id).await?;
    platform.send_embed(channel_id, presentation).await
}

impl<S: ConfigStore> Relay<S> {
    /// Returns the number of channels that got the message
    pub async fn fan_out<P: Platform>(
        &mut self,
        platform: &P,
        msg: &SourceMessage,
        now: &DateTime<FixedOffset>,
    ) -> usize {
        if !self.qualifies(msg) {
            trace!(
                "message {} in channel {} is not in a primary channel",
                msg.id,
                msg.channel_id
            );
            return 0;
        }

        let presentation = self.render(msg, now);
        let follow_up = presentation.follow_up();
        let targets = self.registry.relay_targets();
        let mut delivered = 0;

        for (server, channel) in &targets {
            let server_id = GuildId(server);
            let channel_id = ChannelId(channel);

            let mut copy = match send_primary(platform, channel_id, &presentation).await {
                Ok(message_id) => RelayedCopy::new(channel_id, message_id),
                Err(why) => {
                    self.handle_failure(server_id, channel_id, "relay message", &why);
                    continue;
                }
            };

            if let Some(links) = &follow_up {
                match platform.send_text(channel_id, links).await {
                    Ok(message_id) => copy.follow_up = Some(message_id),
                    Err(why) => {
                        self.handle_failure(server_id, channel_id, "send attachment links", &why)
                    }
                }
            }

            self.correlations.record(msg.id, server_id, copy);
            delivered += 1;
        }

        info!(
            "relayed message {} from server {} to {delivered}/{} channels",
            msg.id,
            msg.guild_id,
            targets.len()
        );
        delivered
    }
}
