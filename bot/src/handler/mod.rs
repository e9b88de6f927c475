mod commands;
pub mod footer;
pub mod relay;

use crate::config::Settings;
use crate::platform::DiscordPlatform;
use crate::structs::SourceMessage;
use relay::Relay;

use chrono::{DateTime, FixedOffset, Local};
use db::JsonFileStore;
use log::{debug, info, warn};
use serenity::{
    async_trait,
    model::{
        application::interaction::Interaction,
        channel::Message,
        event::MessageUpdateEvent,
        gateway::Ready,
        id::{ChannelId, GuildId, MessageId, UserId},
    },
    prelude::*,
};
use tokio::sync::Mutex;

pub struct Handler {
    relay: Mutex<Relay<JsonFileStore>>,
    settings: Settings,
}

impl Handler {
    pub fn new(settings: Settings) -> Handler {
        let registry = db::open_registry(&settings.channels_path);
        Handler {
            relay: Mutex::new(Relay::new(registry, settings.footer())),
            settings,
        }
    }

    async fn delete_relayed(&self, ctx: &Context, ids: &[MessageId]) {
        let platform = DiscordPlatform::new(ctx.http.clone());
        let mut relay = self.relay.lock().await;
        for id in ids {
            relay.sync_delete(&platform, *id).await;
        }
    }
}

fn now() -> DateTime<FixedOffset> {
    Local::now().into()
}

async fn member_nick(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Option<String> {
    match guild_id.member(ctx, user_id).await {
        Ok(member) => member.nick,
        Err(why) => {
            debug!("Failed to look up member {user_id} in server {guild_id}: {why}");
            None
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        // never relay our own copies
        if msg.author.id == ctx.cache.current_user_id() {
            return;
        }
        let guild_id = match msg.guild_id {
            Some(id) => id,
            None => return,
        };

        let source = SourceMessage::from_message(&msg, guild_id, None);
        let platform = DiscordPlatform::new(ctx.http.clone());
        self.relay
            .lock()
            .await
            .fan_out(&platform, &source, &now())
            .await;
    }

    async fn message_update(
        &self,
        ctx: Context,
        _old: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        if !self.relay.lock().await.correlations().contains(event.id) {
            return;
        }

        let msg = match new {
            Some(msg) => msg,
            None => match event.channel_id.message(&ctx.http, event.id).await {
                Ok(msg) => msg,
                Err(why) => {
                    warn!("Failed to fetch edited message {}: {why}", event.id);
                    return;
                }
            },
        };
        let guild_id = match event.guild_id.or(msg.guild_id) {
            Some(id) => id,
            None => return,
        };

        // http fetched messages have no member, look the nickname up instead
        let nick = match msg.member {
            Some(_) => None,
            None => member_nick(&ctx, guild_id, msg.author.id).await,
        };
        let source = SourceMessage::from_message(&msg, guild_id, nick);
        let platform = DiscordPlatform::new(ctx.http.clone());
        self.relay
            .lock()
            .await
            .sync_edit(&platform, &source, &now())
            .await;
    }

    async fn message_delete(
        &self,
        ctx: Context,
        _channel_id: ChannelId,
        deleted_message_id: MessageId,
        _guild_id: Option<GuildId>,
    ) {
        self.delete_relayed(&ctx, &[deleted_message_id]).await;
    }

    async fn message_delete_bulk(
        &self,
        ctx: Context,
        _channel_id: ChannelId,
        deleted_message_ids: Vec<MessageId>,
        _guild_id: Option<GuildId>,
    ) {
        debug!("bulk delete of {} messages", deleted_message_ids.len());
        self.delete_relayed(&ctx, &deleted_message_ids).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            commands::handle_command(&ctx, &command, &self.relay, &self.settings).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "{} is connected to {} servers, relaying to {} channels",
            ready.user.name,
            ready.guilds.len(),
            self.relay.lock().await.registry().relay_count()
        );
        commands::register_commands(&ctx, &self.settings).await;
    }
}
