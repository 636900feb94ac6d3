//! Utility commands: member and server info, reminders and definitions.

use std::time::Duration;

use chrono::Utc;
use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateInteractionResponseFollowup,
    GuildId, Member, User,
};

use crate::{
    bot::command::{options::CommandOptions, reply_embed, reply_ephemeral, require_guild},
    error::AppError,
    scheduler::reminder::{schedule_reminder, Reminder},
    service::dictionary::{Definition, DictionaryService, Lookup},
    state::BotState,
    util::{
        text::truncate_chars,
        time::{relative_from_now, relative_timestamp},
    },
};

const EMBED_COLOR: u32 = 0x5865F2;

/// Longest reminder delay, one week.
const MAX_REMINDER_MINUTES: i64 = 10_080;

const MAX_FIELD_CHARS: usize = 1024;
const MAX_DESCRIPTION_CHARS: usize = 4000;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("userinfo")
            .description("Show info about a user.")
            .dm_permission(false)
            .add_option(CreateCommandOption::new(
                CommandOptionType::User,
                "user",
                "User to inspect",
            )),
        CreateCommand::new("serverinfo")
            .description("Show info about this server.")
            .dm_permission(false),
        CreateCommand::new("remindme")
            .description("Set a reminder.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "minutes",
                    "When to remind (minutes)",
                )
                .min_int_value(1)
                .max_int_value(10_080),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "message",
                "What to remind you about",
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "dm",
                "Send reminder via DM instead of this channel",
            )),
        CreateCommand::new("define")
            .description("Define an English word.")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "word", "Word to define")
                    .required(true),
            ),
    ]
}

/// What `/userinfo` shows about a member.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub id: u64,
    pub avatar_url: String,
    pub created_at: i64,
    pub joined_at: Option<i64>,
    pub role_ids: Vec<u64>,
    pub color: Option<u32>,
}

impl UserProfile {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            id: user.id.get(),
            avatar_url: user.face(),
            created_at: user.id.created_at().unix_timestamp(),
            joined_at: None,
            role_ids: Vec::new(),
            color: None,
        }
    }

    /// Adds server-specific details; the server avatar replaces the global one when set.
    pub fn with_member(mut self, member: &Member, color: Option<u32>) -> Self {
        self.avatar_url = member.face();
        self.joined_at = member.joined_at.map(|t| t.unix_timestamp());
        self.role_ids = member.roles.iter().map(|role| role.get()).collect();
        self.color = color;
        self
    }
}

pub async fn userinfo(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;

    let member = match CommandOptions::new(command).user("user") {
        Some(user) => match guild_id.member(ctx, user.id).await {
            Ok(member) => Some(member),
            Err(e) => {
                tracing::debug!("Couldn't fetch member {} in {}: {}", user.id, guild_id, e);
                None
            }
        },
        None => command.member.as_deref().cloned(),
    };

    let profile = match &member {
        Some(member) => {
            let color = member
                .colour(&ctx.cache)
                .map(|colour| colour.0)
                .filter(|c| *c != 0);
            UserProfile::from_user(&member.user).with_member(member, color)
        }
        None => {
            let user = CommandOptions::new(command)
                .user("user")
                .unwrap_or(&command.user);
            UserProfile::from_user(user)
        }
    };

    reply_embed(ctx, command, build_user_embed(&profile), false).await
}

/// Guild details read from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSummary {
    pub name: String,
    pub id: u64,
    pub icon_url: Option<String>,
    pub owner_id: u64,
    pub created_at: i64,
    /// Human and bot counts, unknown until members are cached.
    pub members: Option<(usize, usize)>,
    pub text_channels: usize,
    pub voice_channels: usize,
    pub roles: usize,
}

fn summarize_guild(ctx: &Context, guild_id: GuildId) -> Option<ServerSummary> {
    let guild = ctx.cache.guild(guild_id)?;

    let members = (!guild.members.is_empty()).then(|| {
        let bots = guild.members.values().filter(|m| m.user.bot).count();
        (guild.members.len() - bots, bots)
    });
    let count_kind = |kind: ChannelType| {
        guild
            .channels
            .values()
            .filter(|channel| channel.kind == kind)
            .count()
    };

    Some(ServerSummary {
        name: guild.name.clone(),
        id: guild.id.get(),
        icon_url: guild.icon_url(),
        owner_id: guild.owner_id.get(),
        created_at: guild.id.created_at().unix_timestamp(),
        members,
        text_channels: count_kind(ChannelType::Text),
        voice_channels: count_kind(ChannelType::Voice),
        roles: guild.roles.len(),
    })
}

pub async fn serverinfo(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;

    let summary = summarize_guild(ctx, guild_id).ok_or_else(|| {
        AppError::NotFound("I don't have this server cached yet. Try again shortly.".to_string())
    })?;

    reply_embed(ctx, command, build_server_embed(&summary), false).await
}

pub async fn remindme(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let options = CommandOptions::new(command);
    let minutes = options.integer("minutes").unwrap_or(10);
    if !(1..=MAX_REMINDER_MINUTES).contains(&minutes) {
        return Err(AppError::BadRequest(format!(
            "Pick between 1 and {} minutes.",
            MAX_REMINDER_MINUTES
        )));
    }
    let delay_secs = minutes * 60;

    let reminder = Reminder {
        user_id: command.user.id.get(),
        channel_id: command.channel_id.get(),
        message: options.string("message").unwrap_or("Reminder!").to_string(),
        requested_at: Utc::now().timestamp(),
        via_dm: options.boolean("dm").unwrap_or(true),
    };

    schedule_reminder(
        &state.scheduler,
        ctx.http.clone(),
        reminder,
        Duration::from_secs(delay_secs.unsigned_abs()),
    )
    .await?;

    tracing::debug!(
        "Scheduled reminder for {} in {} minutes",
        command.user.id,
        minutes
    );

    reply_ephemeral(
        ctx,
        command,
        format!("⏰ Reminding you {}.", relative_from_now(delay_secs)),
    )
    .await
}

pub async fn define(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let word = CommandOptions::new(command).require_string("word")?;

    reply_ephemeral(ctx, command, format!("Looking up **{}**...", word)).await?;

    let followup = match DictionaryService::new(&state.http_client)
        .define(word)
        .await
    {
        Lookup::Found(definition) => CreateInteractionResponseFollowup::new()
            .embed(build_definition_embed(word, &definition)),
        Lookup::NoDefinitions => CreateInteractionResponseFollowup::new()
            .content(format!("No definitions found for **{}**.", word)),
        Lookup::Unavailable => CreateInteractionResponseFollowup::new()
            .content(format!("Couldn't fetch a definition for **{}**.", word)),
    };

    command.create_followup(&ctx.http, followup).await?;

    Ok(())
}

fn build_user_embed(profile: &UserProfile) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("{} • User Info", profile.name))
        .color(profile.color.unwrap_or(EMBED_COLOR))
        .thumbnail(&profile.avatar_url)
        .field("ID", profile.id.to_string(), true)
        .field(
            "Joined Server",
            profile
                .joined_at
                .map(relative_timestamp)
                .unwrap_or_else(|| "Unknown".to_string()),
            true,
        )
        .field(
            "Account Created",
            relative_timestamp(profile.created_at),
            true,
        );

    if !profile.role_ids.is_empty() {
        let roles = profile
            .role_ids
            .iter()
            .map(|id| format!("<@&{}>", id))
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field(
            format!("Roles ({})", profile.role_ids.len()),
            truncate_chars(&roles, MAX_FIELD_CHARS),
            false,
        );
    }

    embed.footer(CreateEmbedFooter::new("Server avatar shown if set."))
}

fn build_server_embed(summary: &ServerSummary) -> CreateEmbed {
    let members = match summary.members {
        Some((humans, bots)) => format!("Humans: {}\nBots: {}", humans, bots),
        None => "Humans: —\nBots: —".to_string(),
    };

    let mut embed = CreateEmbed::new()
        .title(format!("{} • Server Info", summary.name))
        .color(EMBED_COLOR)
        .field("ID", summary.id.to_string(), true)
        .field("Owner", format!("<@{}>", summary.owner_id), true)
        .field("Created", relative_timestamp(summary.created_at), true)
        .field("Members", members, true)
        .field(
            "Channels",
            format!(
                "Text: {} • Voice: {}",
                summary.text_channels, summary.voice_channels
            ),
            true,
        )
        .field("Roles", summary.roles.to_string(), true);

    if let Some(icon_url) = &summary.icon_url {
        embed = embed.thumbnail(icon_url);
    }

    embed
}

fn build_definition_embed(word: &str, definition: &Definition) -> CreateEmbed {
    let text = definition.lines.join("\n");
    let description = if text.is_empty() {
        "No definition text."
    } else {
        truncate_chars(&text, MAX_DESCRIPTION_CHARS)
    };

    let mut embed = CreateEmbed::new()
        .title(format!("📚 {}", word))
        .description(description)
        .color(EMBED_COLOR);

    if let Some(phonetic) = &definition.phonetic {
        embed = embed.footer(CreateEmbedFooter::new(phonetic));
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::user::create_test_user;

    #[test]
    fn profile_from_user_has_no_server_details() {
        let user = create_test_user(175928847299117063, "quip", false);

        let profile = UserProfile::from_user(&user);

        assert_eq!(profile.name, "quip");
        assert_eq!(profile.id, 175928847299117063);
        assert_eq!(profile.created_at, user.id.created_at().unix_timestamp());
        assert_eq!(profile.joined_at, None);
        assert!(profile.role_ids.is_empty());
    }

    #[test]
    fn user_embed_lists_roles_and_unknown_join() {
        let profile = UserProfile {
            name: "quip".to_string(),
            id: 42,
            avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
            created_at: 1_600_000_000,
            joined_at: None,
            role_ids: vec![10, 20],
            color: Some(0xFF0000),
        };

        let json = serde_json::to_value(build_user_embed(&profile)).unwrap();

        assert_eq!(json["title"], "quip • User Info");
        assert_eq!(json["color"], 0xFF0000);
        assert_eq!(json["fields"][1]["value"], "Unknown");
        assert_eq!(json["fields"][2]["value"], "<t:1600000000:R>");
        assert_eq!(json["fields"][3]["name"], "Roles (2)");
        assert_eq!(json["fields"][3]["value"], "<@&10>, <@&20>");
    }

    #[test]
    fn user_embed_omits_roles_field_without_roles() {
        let profile = UserProfile {
            name: "quip".to_string(),
            id: 42,
            avatar_url: String::new(),
            created_at: 1_600_000_000,
            joined_at: Some(1_650_000_000),
            role_ids: Vec::new(),
            color: None,
        };

        let json = serde_json::to_value(build_user_embed(&profile)).unwrap();

        assert_eq!(json["fields"].as_array().unwrap().len(), 3);
        assert_eq!(json["fields"][1]["value"], "<t:1650000000:R>");
        assert_eq!(json["color"], EMBED_COLOR);
    }

    #[test]
    fn server_embed_marks_unknown_member_counts() {
        let summary = ServerSummary {
            name: "Quip HQ".to_string(),
            id: 1,
            icon_url: None,
            owner_id: 2,
            created_at: 1_500_000_000,
            members: None,
            text_channels: 4,
            voice_channels: 1,
            roles: 6,
        };

        let json = serde_json::to_value(build_server_embed(&summary)).unwrap();

        assert_eq!(json["title"], "Quip HQ • Server Info");
        assert_eq!(json["fields"][1]["value"], "<@2>");
        assert_eq!(json["fields"][3]["value"], "Humans: —\nBots: —");
        assert_eq!(json["fields"][4]["value"], "Text: 4 • Voice: 1");
        assert_eq!(json["fields"][5]["value"], "6");
        assert!(json["thumbnail"].is_null());
    }

    #[test]
    fn definition_embed_has_phonetic_footer() {
        let definition = Definition {
            lines: vec![
                "*noun*: A clever remark.".to_string(),
                "*verb*: To make a clever remark.".to_string(),
            ],
            phonetic: Some("/kwɪp/".to_string()),
        };

        let json = serde_json::to_value(build_definition_embed("quip", &definition)).unwrap();

        assert_eq!(json["title"], "📚 quip");
        assert_eq!(
            json["description"],
            "*noun*: A clever remark.\n*verb*: To make a clever remark."
        );
        assert_eq!(json["footer"]["text"], "/kwɪp/");
    }

    #[test]
    fn definition_embed_without_lines() {
        let definition = Definition {
            lines: Vec::new(),
            phonetic: None,
        };

        let json = serde_json::to_value(build_definition_embed("quip", &definition)).unwrap();

        assert_eq!(json["description"], "No definition text.");
        assert!(json["footer"].is_null());
    }
}
