//! Moderation commands.
//!
//! Every command is guild-only and hidden from members lacking the matching permission.
//! Successful actions are recorded in the guild's modlog channel when one is configured.

use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateAllowedMentions, CreateCommand,
    CreateCommandOption, CreateMessage, EditChannel, EditInteractionResponse,
    EditMember, GetMessages, GuildId, MessageId, Permissions, Timestamp, User,
};

use crate::{
    bot::command::{options::CommandOptions, reply_embed, reply_ephemeral, require_guild},
    error::{internal::InternalError, AppError},
    model::warning::CreateWarningParam,
    service::moderation::{
        audit_reason, check_target, check_warn_target,
        embed::{
            build_modlog_embed, build_warning_dm_embed, build_warnings_embed, Actor, ModlogEntry,
        },
        is_bulk_deletable,
        modlog::ModlogService,
        warning::WarningService,
        TargetedAction, MAX_PURGE,
    },
    state::BotState,
};

const DEFAULT_REASON: &str = "No reason provided.";

/// Discord fetches and bulk deletes at most this many messages per request.
const PURGE_BATCH: u64 = 100;

const MAX_SLOWMODE_SECS: i64 = 21_600;
const MAX_BAN_DELETE_DAYS: i64 = 7;
const MAX_TIMEOUT_MINUTES: i64 = 10_080;

fn moderation_command(name: &str, description: &str, permissions: Permissions) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .dm_permission(false)
        .default_member_permissions(permissions)
}

fn user_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "user", description).required(true)
}

fn reason_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "reason", description)
}

pub fn register() -> Vec<CreateCommand> {
    vec![
        moderation_command(
            "purge",
            "Delete a number of messages from this channel.",
            Permissions::MANAGE_MESSAGES,
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "amount",
                "How many messages to delete (max 500).",
            )
            .required(true)
            .min_int_value(1)
            .max_int_value(500),
        ),
        moderation_command(
            "slowmode",
            "Set slowmode delay for this channel.",
            Permissions::MANAGE_CHANNELS,
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "seconds",
                "Slowmode delay in seconds (0 = off, max 6h).",
            )
            .required(true)
            .min_int_value(0)
            .max_int_value(21_600),
        ),
        moderation_command(
            "say",
            "Make the bot say something in this channel.",
            Permissions::MANAGE_MESSAGES,
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "message",
                "What should the bot say?",
            )
            .required(true),
        ),
        moderation_command(
            "kick",
            "Kick a member from the server.",
            Permissions::KICK_MEMBERS,
        )
        .add_option(user_option("Member to kick."))
        .add_option(reason_option("Reason for kicking.")),
        moderation_command("ban", "Ban a member from the server.", Permissions::BAN_MEMBERS)
            .add_option(user_option("Member to ban."))
            .add_option(reason_option("Reason for banning."))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "delete_days",
                    "Delete message history from the last X days (0–7).",
                )
                .min_int_value(0)
                .max_int_value(7),
            ),
        moderation_command(
            "warn",
            "Warn a member; warning is stored.",
            Permissions::MODERATE_MEMBERS,
        )
        .add_option(user_option("Member to warn."))
        .add_option(reason_option("Reason for the warning."))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "dm_user",
            "DM the user about this warning?",
        )),
        moderation_command(
            "warnings",
            "Show warnings for a member.",
            Permissions::MODERATE_MEMBERS,
        )
        .add_option(user_option("Member to view warnings for.")),
        moderation_command(
            "clearwarnings",
            "Clear all warnings for a member.",
            Permissions::MODERATE_MEMBERS,
        )
        .add_option(user_option("Member whose warnings to clear.")),
        moderation_command(
            "timeout",
            "Timeout a member for a period of time.",
            Permissions::MODERATE_MEMBERS,
        )
        .add_option(user_option("Member to timeout."))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "minutes",
                "Duration in minutes (1–10080, up to 7 days).",
            )
            .required(true)
            .min_int_value(1)
            .max_int_value(10_080),
        )
        .add_option(reason_option("Reason for the timeout.")),
        moderation_command(
            "untimeout",
            "Remove a timeout from a member.",
            Permissions::MODERATE_MEMBERS,
        )
        .add_option(user_option("Member to remove timeout from."))
        .add_option(reason_option("Reason for removing the timeout.")),
    ]
}

fn moderator(command: &CommandInteraction) -> Actor {
    Actor::new(command.user.name.clone(), command.user.id.get())
}

fn target(user: &User) -> Actor {
    Actor::new(user.name.clone(), user.id.get())
}

async fn log_action(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
    entry: ModlogEntry,
) {
    let embed = build_modlog_embed(&entry, &moderator(command));
    ModlogService::new(&state.db)
        .post(&ctx.http, guild_id.get(), embed)
        .await;
}

fn bounded(value: i64, min: i64, max: i64, what: &str) -> Result<i64, AppError> {
    if !(min..=max).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{} must be between {} and {}.",
            what, min, max
        )));
    }

    Ok(value)
}

pub async fn purge(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let amount = bounded(
        CommandOptions::new(command).require_integer("amount")?,
        1,
        MAX_PURGE as i64,
        "Amount",
    )?
    .unsigned_abs();

    command.defer_ephemeral(&ctx.http).await?;

    let channel_id = command.channel_id;
    let now = Utc::now().timestamp();
    let mut remaining = amount;
    let mut before: Option<MessageId> = None;
    let mut deleted = 0usize;

    // Newest first; stop at the first message too old to bulk delete.
    while remaining > 0 {
        let limit = remaining.min(PURGE_BATCH);
        let mut request = GetMessages::new().limit(limit as u8);
        if let Some(before) = before {
            request = request.before(before);
        }

        let batch = channel_id.messages(&ctx.http, request).await?;
        let fetched = batch.len();
        before = batch.last().map(|message| message.id);

        let ids: Vec<MessageId> = batch
            .iter()
            .take_while(|message| is_bulk_deletable(message.timestamp.unix_timestamp(), now))
            .map(|message| message.id)
            .collect();

        match ids.as_slice() {
            [] => {}
            [id] => channel_id.delete_message(&ctx.http, *id).await?,
            ids => channel_id.delete_messages(&ctx.http, ids).await?,
        }
        deleted += ids.len();
        remaining -= fetched as u64;

        if ids.len() < fetched || (fetched as u64) < limit {
            break;
        }
    }

    tracing::info!(
        "{} purged {} messages in channel {}",
        command.user.id,
        deleted,
        channel_id
    );

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("🧹 Deleted **{}** messages.", deleted)),
        )
        .await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::Purged {
            channel_id: channel_id.get(),
            count: deleted,
        },
    )
    .await;

    Ok(())
}

pub async fn slowmode(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let seconds = bounded(
        CommandOptions::new(command).require_integer("seconds")?,
        0,
        MAX_SLOWMODE_SECS,
        "Slowmode",
    )?;
    let seconds = u16::try_from(seconds).unwrap_or(u16::MAX);

    command
        .channel_id
        .edit(&ctx.http, EditChannel::new().rate_limit_per_user(seconds))
        .await?;

    reply_ephemeral(
        ctx,
        command,
        format!("🐢 Slowmode set to **{} seconds**.", seconds),
    )
    .await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::SlowmodeSet {
            channel_id: command.channel_id.get(),
            seconds,
        },
    )
    .await;

    Ok(())
}

pub async fn say(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let message = CommandOptions::new(command).require_string("message")?;

    // Members and roles may be pinged; @everyone and @here may not.
    let mentions = CreateAllowedMentions::new()
        .all_users(true)
        .all_roles(true)
        .everyone(false);
    command
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content(message)
                .allowed_mentions(mentions),
        )
        .await?;

    reply_ephemeral(ctx, command, "✅ Sent.").await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::MessageSent {
            channel_id: command.channel_id.get(),
            content: message.to_string(),
        },
    )
    .await;

    Ok(())
}

pub async fn kick(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let options = CommandOptions::new(command);
    let user = options.require_user("user")?;
    let reason = options.string("reason").unwrap_or(DEFAULT_REASON);

    check_target(
        TargetedAction::Kick,
        command.user.id.get(),
        user.id.get(),
        ctx.cache.current_user().id.get(),
    )?;

    guild_id
        .kick_with_reason(
            &ctx.http,
            user.id,
            &audit_reason(&command.user.name, reason),
        )
        .await?;

    reply_ephemeral(ctx, command, format!("👢 Kicked **{}**.", user.name)).await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::Kicked {
            target: target(user),
            reason: reason.to_string(),
        },
    )
    .await;

    Ok(())
}

pub async fn ban(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let options = CommandOptions::new(command);
    let user = options.require_user("user")?;
    let reason = options.string("reason").unwrap_or(DEFAULT_REASON);
    let delete_days = bounded(
        options.integer("delete_days").unwrap_or(0),
        0,
        MAX_BAN_DELETE_DAYS,
        "Deleted days",
    )?;
    let delete_days = u8::try_from(delete_days).unwrap_or(0);

    check_target(
        TargetedAction::Ban,
        command.user.id.get(),
        user.id.get(),
        ctx.cache.current_user().id.get(),
    )?;

    guild_id
        .ban_with_reason(
            &ctx.http,
            user.id,
            delete_days,
            &audit_reason(&command.user.name, reason),
        )
        .await?;

    reply_ephemeral(ctx, command, format!("🔨 Banned **{}**.", user.name)).await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::Banned {
            target: target(user),
            reason: reason.to_string(),
            delete_days,
        },
    )
    .await;

    Ok(())
}

pub async fn warn(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let options = CommandOptions::new(command);
    let user = options.require_user("user")?;
    let reason = options.string("reason").unwrap_or(DEFAULT_REASON);
    let dm_user = options.boolean("dm_user").unwrap_or(true);

    check_warn_target(user.bot)?;

    let (_, total) = WarningService::new(&state.db)
        .issue(CreateWarningParam {
            guild_id: guild_id.get(),
            user_id: user.id.get(),
            moderator_id: command.user.id.get(),
            reason: reason.to_string(),
        })
        .await?;

    if dm_user {
        let guild_name = guild_id
            .name(&ctx.cache)
            .unwrap_or_else(|| "a server".to_string());
        let embed = build_warning_dm_embed(&guild_name, reason, &command.user.name);

        if let Err(e) = user
            .direct_message(&ctx.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::debug!("Couldn't DM warning to {}: {}", user.id, e);
        }
    }

    reply_ephemeral(
        ctx,
        command,
        format!(
            "⚠️ Warned **{}** for: `{}`.\nThis user now has **{}** warning(s).",
            user.name, reason, total
        ),
    )
    .await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::Warned {
            target: target(user),
            reason: reason.to_string(),
            total,
        },
    )
    .await;

    Ok(())
}

pub async fn warnings(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let user = CommandOptions::new(command).require_user("user")?;

    let warnings = WarningService::new(&state.db)
        .list(guild_id.get(), user.id.get())
        .await?;

    if warnings.is_empty() {
        return reply_ephemeral(
            ctx,
            command,
            format!("✅ **{}** has no warnings on record.", user.name),
        )
        .await;
    }

    reply_embed(
        ctx,
        command,
        build_warnings_embed(&user.name, &warnings),
        true,
    )
    .await
}

pub async fn clearwarnings(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let user = CommandOptions::new(command).require_user("user")?;

    let count = WarningService::new(&state.db)
        .clear(guild_id.get(), user.id.get())
        .await?;

    if count == 0 {
        return reply_ephemeral(ctx, command, format!("ℹ️ **{}** has no warnings.", user.name))
            .await;
    }

    reply_ephemeral(
        ctx,
        command,
        format!("🧽 Cleared **{}** warning(s) for **{}**.", count, user.name),
    )
    .await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::WarningsCleared {
            target: target(user),
            count,
        },
    )
    .await;

    Ok(())
}

pub async fn timeout(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let options = CommandOptions::new(command);
    let user = options.require_user("user")?;
    let minutes = bounded(
        options.require_integer("minutes")?,
        1,
        MAX_TIMEOUT_MINUTES,
        "Duration",
    )?;
    let reason = options.string("reason").unwrap_or(DEFAULT_REASON);

    check_target(
        TargetedAction::Timeout,
        command.user.id.get(),
        user.id.get(),
        ctx.cache.current_user().id.get(),
    )?;

    let until_unix = Utc::now().timestamp() + minutes * 60;
    let until = Timestamp::from_unix_timestamp(until_unix).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: until_unix,
            reason: e.to_string(),
        }
    })?;
    let audit = audit_reason(&command.user.name, reason);

    guild_id
        .edit_member(
            ctx,
            user.id,
            EditMember::new()
                .disable_communication_until_datetime(until)
                .audit_log_reason(&audit),
        )
        .await?;

    reply_ephemeral(
        ctx,
        command,
        format!(
            "⏰ Timed out **{}** for **{}** minute(s).",
            user.name, minutes
        ),
    )
    .await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::TimedOut {
            target: target(user),
            minutes,
            reason: reason.to_string(),
        },
    )
    .await;

    Ok(())
}

pub async fn untimeout(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;
    let options = CommandOptions::new(command);
    let user = options.require_user("user")?;
    let reason = options.string("reason").unwrap_or("Timeout ended.");
    let audit = audit_reason(&command.user.name, reason);

    guild_id
        .edit_member(
            ctx,
            user.id,
            EditMember::new()
                .enable_communication()
                .audit_log_reason(&audit),
        )
        .await?;

    reply_ephemeral(
        ctx,
        command,
        format!("✅ Removed timeout for **{}**.", user.name),
    )
    .await?;

    log_action(
        state,
        ctx,
        command,
        guild_id,
        ModlogEntry::TimeoutRemoved {
            target: target(user),
            reason: reason.to_string(),
        },
    )
    .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_guild_only_and_permissioned() {
        for command in register() {
            let json = serde_json::to_value(command).unwrap();

            assert_eq!(json["dm_permission"], false, "{}", json["name"]);
            assert!(
                !json["default_member_permissions"].is_null(),
                "{}",
                json["name"]
            );
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(bounded(0, 0, 7, "Days").unwrap(), 0);
        assert_eq!(bounded(7, 0, 7, "Days").unwrap(), 7);

        let err = bounded(8, 0, 7, "Days").unwrap_err();
        assert_eq!(err.user_message(), "Days must be between 0 and 7.");
    }

    #[test]
    fn actors_use_account_names() {
        let user = test_utils::serenity::user::create_test_user(99, "spammer", false);

        assert_eq!(target(&user), Actor::new("spammer", 99));
    }
}
