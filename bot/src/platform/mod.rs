#[cfg(test)]
pub mod mock;

use crate::errors::{Error, Result};
use crate::structs::Presentation;

use serenity::async_trait;
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;

#[async_trait]
pub trait Platform: Send + Sync {
    async fn resolve_channel(&self, channel_id: ChannelId) -> Result<ChannelId>;

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        presentation: &Presentation,
    ) -> Result<MessageId>;

    async fn send_text(&self, channel_id: ChannelId, content: &str) -> Result<MessageId>;

    async fn edit_embed(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        presentation: &Presentation,
    ) -> Result<()>;

    async fn edit_text(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<()>;

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()>;
}

pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub const fn new(http: Arc<Http>) -> DiscordPlatform {
        DiscordPlatform { http }
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn resolve_channel(&self, channel_id: ChannelId) -> Result<ChannelId> {
        let channel = self.http.get_channel(*channel_id.as_u64()).await?;
        match channel.guild() {
            Some(guild_channel) => Ok(guild_channel.id),
            None => Err(Error::ConstStr("relay destination is not a server channel")),
        }
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        presentation: &Presentation,
    ) -> Result<MessageId> {
        let sent = channel_id
            .send_message(&self.http, |m| m.embed(|e| presentation.fill_embed(e)))
            .await?;
        Ok(sent.id)
    }

    async fn send_text(&self, channel_id: ChannelId, content: &str) -> Result<MessageId> {
        let sent = channel_id.say(&self.http, content).await?;
        Ok(sent.id)
    }

    async fn edit_embed(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        presentation: &Presentation,
    ) -> Result<()> {
        channel_id
            .edit_message(&self.http, message_id, |m| {
                m.embed(|e| presentation.fill_embed(e))
            })
            .await?;
        Ok(())
    }

    async fn edit_text(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<()> {
        channel_id
            .edit_message(&self.http, message_id, |m| m.content(content))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        channel_id.delete_message(&self.http, message_id).await?;
        Ok(())
    }
}
