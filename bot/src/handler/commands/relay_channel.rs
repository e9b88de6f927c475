use super::{invoker_permissions, is_admin, GUILD_ONLY};
use crate::errors::{Error, Result};
use crate::handler::relay::Relay;
use crate::structs::Reply;

use db::{ConfigStore, Registry};
use log::info;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOptionValue,
};
use serenity::model::channel::{ChannelType, PartialChannel};
use serenity::model::id::{ChannelId, GuildId};
use serenity::model::Permissions;
use serenity::prelude::Context;
use tokio::sync::Mutex;

pub const CHANNEL_OPTION: &str = "channel";

/// What the bot needs in a relay channel to post a relayed message
const REQUIRED_PERMISSIONS: [(Permissions, &str); 4] = [
    (Permissions::VIEW_CHANNEL, "View Channel"),
    (Permissions::SEND_MESSAGES, "Send Messages"),
    (Permissions::EMBED_LINKS, "Embed Links"),
    (Permissions::ATTACH_FILES, "Attach Files"),
];

pub fn is_text_channel(kind: ChannelType) -> bool {
    matches!(kind, ChannelType::Text | ChannelType::News)
}

pub fn missing_bot_permissions(permissions: Permissions) -> Vec<&'static str> {
    if permissions.contains(Permissions::ADMINISTRATOR) {
        return Vec::new();
    }
    REQUIRED_PERMISSIONS
        .iter()
        .filter(|(required, _)| !permissions.contains(*required))
        .map(|(_, name)| *name)
        .collect()
}

pub fn missing_permissions_reply(channel_id: ChannelId, missing: &[&str]) -> Reply {
    Reply::rejection(format!(
        "I am missing the following permissions in <#{channel_id}>: {}",
        missing.join(", ")
    ))
}

pub fn apply_set<S: ConfigStore>(
    registry: &mut Registry<S>,
    server_id: GuildId,
    channel_id: ChannelId,
) -> Result<Reply> {
    registry.set_relay(*server_id.as_u64(), *channel_id.as_u64())?;
    Ok(Reply::new(format!("Relay channel set to <#{channel_id}>")))
}

pub fn apply_remove<S: ConfigStore>(registry: &mut Registry<S>, server_id: GuildId) -> Result<Reply> {
    if registry.remove_relay(*server_id.as_u64())? {
        Ok(Reply::new_const("Relay channel has been removed."))
    } else {
        Ok(Reply::new_const("No relay channel is set for this server."))
    }
}

fn selected_channel(command: &ApplicationCommandInteraction) -> Option<&PartialChannel> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == CHANNEL_OPTION)
        .and_then(|option| option.resolved.as_ref())
        .and_then(|value| match value {
            CommandDataOptionValue::Channel(channel) => Some(channel),
            _ => None,
        })
}

async fn bot_permissions_in(ctx: &Context, channel_id: ChannelId) -> Result<Permissions> {
    let channel = match ctx.cache.guild_channel(channel_id) {
        Some(channel) => channel,
        None => channel_id
            .to_channel(ctx)
            .await?
            .guild()
            .ok_or(Error::ConstStr("relay channel is not in a server"))?,
    };
    Ok(channel.permissions_for_user(&ctx.cache, ctx.cache.current_user_id())?)
}

pub async fn set_channel<S: ConfigStore>(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    relay: &Mutex<Relay<S>>,
) -> Result<Reply> {
    let server_id = match command.guild_id {
        Some(id) => id,
        None => return Ok(Reply::rejection_const(GUILD_ONLY)),
    };
    if !is_admin(invoker_permissions(ctx, command).await?) {
        return Ok(Reply::rejection_const(
            "Only server administrators can set the relay channel.",
        ));
    }

    let channel = match selected_channel(command) {
        Some(channel) if is_text_channel(channel.kind) => channel,
        _ => return Ok(Reply::rejection_const("Please select a text channel!")),
    };

    let missing = missing_bot_permissions(bot_permissions_in(ctx, channel.id).await?);
    if !missing.is_empty() {
        return Ok(missing_permissions_reply(channel.id, &missing));
    }

    info!(
        "{} set the relay channel of server {server_id} to {}",
        command.user.id, channel.id
    );
    apply_set(relay.lock().await.registry_mut(), server_id, channel.id)
}

pub async fn remove_channel<S: ConfigStore>(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    relay: &Mutex<Relay<S>>,
) -> Result<Reply> {
    let server_id = match command.guild_id {
        Some(id) => id,
        None => return Ok(Reply::rejection_const(GUILD_ONLY)),
    };
    if !is_admin(invoker_permissions(ctx, command).await?) {
        return Ok(Reply::rejection_const(
            "Only server administrators can remove the relay channel.",
        ));
    }

    info!(
        "{} removed the relay channel of server {server_id}",
        command.user.id
    );
    apply_remove(relay.lock().await.registry_mut(), server_id)
}
