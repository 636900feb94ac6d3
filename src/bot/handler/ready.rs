//! Ready event handler for bot initialization.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Register the application commands, to the development guild when one is configured
//!   (instant updates) or globally otherwise

use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::{bot::command, state::BotState};

/// Handles the ready event when the bot connects to Discord.
///
/// Fires again after every reconnect; re-registering the same commands is idempotent.
pub async fn handle_ready(state: &BotState, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::custom("/help")));

    let commands = command::all();
    let result = match state.dev_guild_id {
        Some(guild_id) => GuildId::new(guild_id).set_commands(&ctx.http, commands).await,
        None => Command::set_global_commands(&ctx.http, commands).await,
    };

    match result {
        Ok(registered) => tracing::info!(
            "Registered {} commands {}",
            registered.len(),
            match state.dev_guild_id {
                Some(guild_id) => format!("to guild {}", guild_id),
                None => "globally".to_string(),
            }
        ),
        Err(e) => tracing::error!("Failed to register commands: {}", e),
    }
}
