use crate::errors::Result;

use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

const STATS_COLOUR: u32 = 0x00ae86;

#[derive(Debug, PartialEq, Eq)]
pub enum ReplyContents {
    String(String),
    ConstStr(&'static str),
    Stats { relay_channels: usize, servers: usize },
}

#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    contents: ReplyContents,
    ephemeral: bool,
}

impl Reply {
    pub const fn new(message: String) -> Reply {
        Reply {
            contents: ReplyContents::String(message),
            ephemeral: false,
        }
    }

    pub const fn new_const(message: &'static str) -> Reply {
        Reply {
            contents: ReplyContents::ConstStr(message),
            ephemeral: false,
        }
    }

    pub const fn rejection(message: String) -> Reply {
        Reply {
            contents: ReplyContents::String(message),
            ephemeral: true,
        }
    }

    pub const fn rejection_const(message: &'static str) -> Reply {
        Reply {
            contents: ReplyContents::ConstStr(message),
            ephemeral: true,
        }
    }

    pub const fn stats(relay_channels: usize, servers: usize) -> Reply {
        Reply {
            contents: ReplyContents::Stats {
                relay_channels,
                servers,
            },
            ephemeral: false,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.contents {
            ReplyContents::String(inner) => Some(inner),
            ReplyContents::ConstStr(inner) => Some(inner),
            ReplyContents::Stats { .. } => None,
        }
    }

    pub const fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    pub async fn send(&self, ctx: &Context, command: &ApplicationCommandInteraction) -> Result<()> {
        info!(
            "replying to /{} from {} (ephemeral: {})",
            command.data.name, command.user.id, self.ephemeral
        );
        command
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|data| {
                        match &self.contents {
                            ReplyContents::String(inner) => data.content(inner),
                            ReplyContents::ConstStr(inner) => data.content(inner),
                            ReplyContents::Stats {
                                relay_channels,
                                servers,
                            } => data.embed(|e| {
                                e.title("Bot Stats")
                                    .field("Total Relay Channels Set", relay_channels, true)
                                    .field("Total Servers", servers, true)
                                    .colour(STATS_COLOUR)
                            }),
                        };
                        data.ephemeral(self.ephemeral)
                    })
            })
            .await?;
        Ok(())
    }
}
