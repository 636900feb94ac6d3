//! Slash commands and the user context-menu command.
//!
//! Each module registers its commands and implements their handlers. Handlers return
//! `Result<(), AppError>`; the interaction handler turns errors into replies.

pub mod fun;
pub mod greet;
pub mod info;
pub mod moderation;
pub mod modlog;
pub mod options;
pub mod poll;
pub mod utility;

use serenity::all::{
    ChannelId, CommandInteraction, Context, CreateCommand, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, GuildId,
};

use crate::{error::AppError, state::BotState};

/// Every command the bot registers with Discord.
pub fn all() -> Vec<CreateCommand> {
    let mut commands = Vec::new();
    commands.extend(fun::register());
    commands.extend(utility::register());
    commands.push(poll::register());
    commands.extend(info::register());
    commands.extend(moderation::register());
    commands.push(modlog::register());
    commands.push(greet::register());
    commands
}

/// Routes an invoked command to its handler.
pub async fn dispatch(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        "cat" => fun::cat(state, ctx, command).await,
        "meme" => fun::meme(state, ctx, command).await,
        "dog" => fun::dog(state, ctx, command).await,
        "quote" => fun::quote(state, ctx, command).await,
        "eightball" => fun::eightball(state, ctx, command).await,
        "roll" => fun::roll(state, ctx, command).await,
        "userinfo" => utility::userinfo(ctx, command).await,
        "serverinfo" => utility::serverinfo(ctx, command).await,
        "remindme" => utility::remindme(state, ctx, command).await,
        "define" => utility::define(state, ctx, command).await,
        "poll" => poll::run(state, ctx, command).await,
        "stats" => info::stats(state, ctx, command).await,
        "help" => info::help(ctx, command).await,
        "purge" => moderation::purge(state, ctx, command).await,
        "slowmode" => moderation::slowmode(state, ctx, command).await,
        "say" => moderation::say(state, ctx, command).await,
        "kick" => moderation::kick(state, ctx, command).await,
        "ban" => moderation::ban(state, ctx, command).await,
        "warn" => moderation::warn(state, ctx, command).await,
        "warnings" => moderation::warnings(state, ctx, command).await,
        "clearwarnings" => moderation::clearwarnings(state, ctx, command).await,
        "timeout" => moderation::timeout(state, ctx, command).await,
        "untimeout" => moderation::untimeout(state, ctx, command).await,
        "modlog" => modlog::run(state, ctx, command).await,
        greet::NAME => greet::run(ctx, command).await,
        other => {
            tracing::warn!("Received unknown command {}", other);
            Err(AppError::NotFound(
                "I don't know that command anymore.".to_string(),
            ))
        }
    }
}

/// Guild the command was used in; refuses commands used in DMs.
fn require_guild(command: &CommandInteraction) -> Result<GuildId, AppError> {
    command
        .guild_id
        .ok_or_else(|| AppError::BadRequest("Use this in a server.".to_string()))
}

async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    message: CreateInteractionResponseMessage,
) -> Result<(), AppError> {
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

/// Replies with text only the invoking member sees.
async fn reply_ephemeral(
    ctx: &Context,
    command: &CommandInteraction,
    content: impl Into<String>,
) -> Result<(), AppError> {
    reply(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
    .await
}

async fn reply_embed(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
    ephemeral: bool,
) -> Result<(), AppError> {
    reply(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .ephemeral(ephemeral),
    )
    .await
}

/// Whether the channel is marked NSFW. Unknown channels and DMs count as not NSFW.
async fn channel_is_nsfw(ctx: &Context, channel_id: ChannelId) -> bool {
    match channel_id.to_channel(ctx).await {
        Ok(channel) => channel.guild().is_some_and(|channel| channel.nsfw),
        Err(e) => {
            tracing::debug!("Couldn't fetch channel {}: {}", channel_id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registered_names() -> Vec<String> {
        all()
            .into_iter()
            .map(|command| {
                serde_json::to_value(command).unwrap()["name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn command_names_are_unique() {
        let names = registered_names();
        let unique: HashSet<_> = names.iter().collect();

        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn help_lists_only_registered_commands() {
        let names = registered_names();

        for (_, entries) in info::HELP_SECTIONS {
            for (name, _) in *entries {
                let base = name.split_whitespace().next().unwrap();
                assert!(names.iter().any(|n| n == base), "{} is not registered", base);
            }
        }
    }
}
