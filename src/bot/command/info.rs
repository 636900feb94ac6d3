//! `/stats` and `/help`.

use std::time::Duration;

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateEmbed, CreateEmbedFooter,
    EditInteractionResponse, Timestamp,
};

use crate::{
    bot::{
        command::{reply_embed, require_guild},
        start::ShardManagerContainer,
    },
    error::AppError,
    state::BotState,
    util::time::format_uptime,
};

const STATS_COLOR: u32 = 0x5865F2;
const HELP_COLOR: u32 = 0x2ECC71;

/// Commands listed by `/help`, grouped by section, as `(usage, summary)`.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "🎉 Fun",
        &[
            ("cat", "random cat picture"),
            ("dog", "random dog picture"),
            ("meme", "random meme"),
            ("quote", "random quote"),
            ("eightball", "magic 8-ball"),
            ("roll", "roll dice, like `3d6`"),
        ],
    ),
    (
        "🛠 Utility",
        &[
            ("userinfo", "info about a member"),
            ("serverinfo", "info about this server"),
            ("remindme", "set a reminder"),
            ("poll", "quick button poll"),
            ("define", "define an English word"),
            ("stats", "bot stats"),
            ("help", "this message"),
        ],
    ),
    (
        "🛡 Moderation",
        &[
            ("purge", "delete messages"),
            ("slowmode", "set channel slowmode"),
            ("say", "bot sends a message"),
            ("kick", "kick a member"),
            ("ban", "ban a member"),
            ("warn", "add a warning"),
            ("warnings", "view warnings"),
            ("clearwarnings", "clear warnings"),
            ("timeout", "timeout a member"),
            ("untimeout", "remove timeout"),
            ("modlog set/disable/show", "configure mod logs"),
        ],
    ),
];

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("stats")
            .description("Show bot statistics.")
            .dm_permission(false),
        CreateCommand::new("help")
            .description("Show information about available commands.")
            .dm_permission(false),
    ]
}

/// Figures shown by `/stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct BotStats {
    pub uptime: Duration,
    /// Gateway heartbeat latency; unknown until the first heartbeat is acknowledged.
    pub latency: Option<Duration>,
    pub guilds: usize,
    pub users: usize,
    pub open_polls: usize,
}

pub async fn stats(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    require_guild(command)?;
    command.defer_ephemeral(&ctx.http).await?;

    let stats = BotStats {
        uptime: state.started_at.elapsed(),
        latency: gateway_latency(ctx).await,
        guilds: ctx.cache.guild_count(),
        users: ctx.cache.user_count(),
        open_polls: state.polls.open_count().await,
    };

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(build_stats_embed(&stats)),
        )
        .await?;

    Ok(())
}

async fn gateway_latency(ctx: &Context) -> Option<Duration> {
    let shard_manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>()?.clone()
    };

    let runners = shard_manager.runners.lock().await;
    runners.get(&ctx.shard_id)?.latency
}

pub async fn help(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_guild(command)?;

    reply_embed(ctx, command, build_help_embed(), true).await
}

fn build_stats_embed(stats: &BotStats) -> CreateEmbed {
    let latency = stats
        .latency
        .map(|latency| format!("{} ms", latency.as_millis()))
        .unwrap_or_else(|| "n/a".to_string());

    CreateEmbed::new()
        .title("Bot Statistics")
        .color(STATS_COLOR)
        .timestamp(Timestamp::now())
        .field("Uptime", format_uptime(stats.uptime), true)
        .field("Latency", latency, true)
        .field("Servers", stats.guilds.to_string(), true)
        .field("Users (approx.)", stats.users.to_string(), true)
        .field("Open polls", stats.open_polls.to_string(), true)
        .field("Version", env!("CARGO_PKG_VERSION"), true)
}

fn build_help_embed() -> CreateEmbed {
    HELP_SECTIONS
        .iter()
        .fold(
            CreateEmbed::new()
                .title("quipbot • Help")
                .description("Here's what I can do. Command names are shown without `/`.")
                .color(HELP_COLOR)
                .timestamp(Timestamp::now()),
            |embed, (section, entries)| {
                let lines = entries
                    .iter()
                    .map(|(usage, summary)| format!("`{}` – {}", usage, summary))
                    .collect::<Vec<_>>()
                    .join("\n");
                embed.field(*section, lines, false)
            },
        )
        .footer(CreateEmbedFooter::new(
            "Commands may be restricted by your server permissions.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_embed_formats_uptime_and_latency() {
        let stats = BotStats {
            uptime: Duration::from_secs(3_725),
            latency: Some(Duration::from_millis(42)),
            guilds: 3,
            users: 120,
            open_polls: 1,
        };

        let json = serde_json::to_value(build_stats_embed(&stats)).unwrap();

        assert_eq!(json["fields"][0]["value"], "1h 2m 5s");
        assert_eq!(json["fields"][1]["value"], "42 ms");
        assert_eq!(json["fields"][2]["value"], "3");
        assert_eq!(json["fields"][3]["value"], "120");
    }

    #[test]
    fn unknown_latency_is_marked() {
        let stats = BotStats {
            uptime: Duration::ZERO,
            latency: None,
            guilds: 0,
            users: 0,
            open_polls: 0,
        };

        let json = serde_json::to_value(build_stats_embed(&stats)).unwrap();

        assert_eq!(json["fields"][0]["value"], "0s");
        assert_eq!(json["fields"][1]["value"], "n/a");
    }

    #[test]
    fn help_embed_has_a_field_per_section() {
        let json = serde_json::to_value(build_help_embed()).unwrap();
        let fields = json["fields"].as_array().unwrap();

        assert_eq!(fields.len(), HELP_SECTIONS.len());
        assert_eq!(fields[0]["name"], "🎉 Fun");
        assert!(fields[2]["value"]
            .as_str()
            .unwrap()
            .contains("`modlog set/disable/show` – configure mod logs"));
    }
}
