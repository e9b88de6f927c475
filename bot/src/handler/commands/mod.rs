mod relay_channel;
mod stats;

use crate::config::Settings;
use crate::errors::Result;
use crate::handler::relay::Relay;
use crate::structs::Reply;

use db::ConfigStore;
use log::{error, info, warn};
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::{Command, CommandOptionType};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::channel::ChannelType;
use serenity::model::Permissions;
use serenity::prelude::Context;
use tokio::sync::Mutex;

pub const SET_CHANNEL: &str = "setchannel";
pub const REMOVE_CHANNEL: &str = "removechannel";
pub const STATS: &str = "stats";

const GUILD_ONLY: &str = "This command can only be used within a server.";
const COMMAND_FAILED: &str = "Something went wrong while running that command.";

fn set_channel_command(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
    command
        .name(SET_CHANNEL)
        .description("Set the channel to receive relayed messages")
        .create_option(|option| {
            option
                .name(relay_channel::CHANNEL_OPTION)
                .description("The channel to relay messages to")
                .kind(CommandOptionType::Channel)
                .channel_types(&[ChannelType::Text, ChannelType::News])
                .required(true)
        })
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
}

fn remove_channel_command(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
    command
        .name(REMOVE_CHANNEL)
        .description("Remove the relay channel for this server")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
}

fn stats_command(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
    command
        .name(STATS)
        .description("Show the number of relay channels set and total servers the bot is in.")
        .default_member_permissions(Permissions::empty())
        .dm_permission(false)
}

pub async fn register_commands(ctx: &Context, settings: &Settings) {
    let owner_guild = settings.owner_guild_id;
    let global = Command::set_global_application_commands(&ctx.http, |commands| {
        commands
            .create_application_command(set_channel_command)
            .create_application_command(remove_channel_command);
        if owner_guild.is_none() {
            commands.create_application_command(stats_command);
        }
        commands
    })
    .await;
    match global {
        Ok(registered) => info!("registered {} global commands", registered.len()),
        Err(why) => error!("Failed to register global commands: {why}"),
    }

    if let Some(guild_id) = owner_guild {
        match guild_id
            .set_application_commands(&ctx.http, |commands| {
                commands.create_application_command(stats_command)
            })
            .await
        {
            Ok(_) => info!("registered /{STATS} in server {guild_id}"),
            Err(why) => error!("Failed to register /{STATS} in server {guild_id}: {why}"),
        }
    }
}

pub fn is_admin(permissions: Option<Permissions>) -> bool {
    permissions.map_or(false, |p| p.contains(Permissions::ADMINISTRATOR))
}

async fn invoker_permissions(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
) -> Result<Option<Permissions>> {
    if let Some(permissions) = command.member.as_ref().and_then(|m| m.permissions) {
        return Ok(Some(permissions));
    }
    let guild_id = match command.guild_id {
        Some(id) => id,
        None => return Ok(None),
    };
    let member = guild_id.member(ctx, command.user.id).await?;
    Ok(Some(member.permissions(&ctx.cache)?))
}

pub async fn handle_command<S: ConfigStore>(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    relay: &Mutex<Relay<S>>,
    settings: &Settings,
) {
    let name = command.data.name.as_str();
    let ret = match name {
        SET_CHANNEL => relay_channel::set_channel(ctx, command, relay).await,
        REMOVE_CHANNEL => relay_channel::remove_channel(ctx, command, relay).await,
        STATS => stats::stats(ctx, command, relay, settings).await,
        _ => Ok(Reply::rejection_const("Unrecognized command")),
    };

    let reply = match ret {
        Ok(reply) => reply,
        Err(why) => {
            warn!("Failed to process command /{name} with err: {why}");
            Reply::rejection_const(COMMAND_FAILED)
        }
    };
    if let Err(why) = reply.send(ctx, command).await {
        warn!("Failed to reply to /{name}: {why}");
    }
}
