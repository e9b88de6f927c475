use super::{invoker_permissions, is_admin};
use crate::config::Settings;
use crate::errors::Result;
use crate::handler::relay::Relay;
use crate::structs::Reply;

use db::ConfigStore;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::id::{RoleId, UserId};
use serenity::model::Permissions;
use serenity::prelude::Context;
use tokio::sync::Mutex;

const NOT_ALLOWED: &str = "You do not have permission to use this command.";

pub fn can_view_stats(
    settings: &Settings,
    user_id: UserId,
    permissions: Option<Permissions>,
    roles: &[RoleId],
) -> bool {
    settings.owner_id == Some(user_id)
        || is_admin(permissions)
        || settings
            .stats_role_id
            .map_or(false, |role| roles.contains(&role))
}

pub async fn stats<S: ConfigStore>(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    relay: &Mutex<Relay<S>>,
    settings: &Settings,
) -> Result<Reply> {
    let is_owner = settings.owner_id == Some(command.user.id);
    // outside a server only the owner gets through
    let allowed = is_owner
        || (command.guild_id.is_some()
            && can_view_stats(
                settings,
                command.user.id,
                invoker_permissions(ctx, command).await?,
                command
                    .member
                    .as_ref()
                    .map(|m| m.roles.as_slice())
                    .unwrap_or_default(),
            ));
    if !allowed {
        return Ok(Reply::rejection_const(NOT_ALLOWED));
    }

    let relay_channels = relay.lock().await.registry().relay_count();
    let servers = ctx.cache.guild_count();
    info!("stats: {relay_channels} relay channels, {servers} servers");
    Ok(Reply::stats(relay_channels, servers))
}
