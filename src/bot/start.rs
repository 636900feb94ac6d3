use serenity::all::{Client, GatewayIntents, ShardManager};
use serenity::prelude::TypeMapKey;
use std::sync::Arc;

use crate::{bot::handler::Handler, config::Config, error::AppError, state::BotState};

/// Shard manager handle stored in the client's data map so `/stats` can read latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Builds the Discord client without connecting to the gateway.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - Shared bot state handed to the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError::DiscordErr)` - Invalid token or client construction failure
pub async fn init_bot(config: &Config, state: BotState) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;

    client
        .data
        .write()
        .await
        .insert::<ShardManagerContainer>(client.shard_manager.clone());

    Ok(client)
}

/// Connects to the gateway and processes events until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
