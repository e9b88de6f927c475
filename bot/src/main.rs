#![warn(
    clippy::cognitive_complexity,
    clippy::missing_const_for_fn,
    clippy::option_if_let_else
)]

mod config;
mod errors;
mod handler;
mod platform;
mod structs;

use log::LevelFilter;
use log::{error, info};
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use simple_logger::SimpleLogger;
use time::UtcOffset;

use std::process;

use config::Settings;
use handler::Handler;

fn init_logger() {
    let logger = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level("bot", LevelFilter::Debug)
        .with_module_level("db", LevelFilter::Debug)
        .with_utc_offset(UtcOffset::UTC)
        // RUST_LOG overrides the levels above
        .env();
    if let Err(why) = logger.init() {
        eprintln!("Failed to init logger: {why}");
        process::exit(-1);
    }
}

#[tokio::main]
async fn main() {
    // a missing .env is fine, everything can come from the real environment
    let _ = dotenvy::dotenv();
    init_logger();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(why) => {
            error!("Failed to load settings, exiting: {why}");
            process::exit(-1);
        }
    };
    info!(
        "relay channels at {}, day 1 is {}",
        settings.channels_path.display(),
        settings.start_date
    );

    let intents = GatewayIntents::GUILDS
        .union(GatewayIntents::GUILD_MESSAGES)
        .union(GatewayIntents::MESSAGE_CONTENT);

    let token = settings.token.clone();
    let mut client = match Client::builder(&token, intents)
        .event_handler(Handler::new(settings))
        .await
    {
        Ok(client) => client,
        Err(why) => {
            error!("Err creating client: {why}");
            process::exit(-1);
        }
    };

    // Shards will automatically attempt to reconnect, and will perform
    // exponential backoff until it reconnects.
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
