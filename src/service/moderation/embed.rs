//! Embed builders for moderation actions.
//!
//! Modlog entries share a layout: a titled, colored embed with the affected user and the
//! moderator as `name (id)` fields, action-specific fields after, and the current time.

use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::{model::warning::Warning, util::text::truncate_chars};

pub const COLOR_BLURPLE: u32 = 0x5865F2;
pub const COLOR_RED: u32 = 0xE74C3C;
pub const COLOR_DARK_RED: u32 = 0x992D22;
pub const COLOR_ORANGE: u32 = 0xE67E22;
pub const COLOR_GREEN: u32 = 0x2ECC71;
pub const COLOR_DARK_GOLD: u32 = 0xC27C0E;

/// Discord's limit on fields in one embed.
const MAX_EMBED_FIELDS: usize = 25;

/// Discord's limit on an embed field value.
const MAX_FIELD_CHARS: usize = 1024;

/// A user shown in a modlog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub tag: String,
    pub id: u64,
}

impl Actor {
    pub fn new(tag: impl Into<String>, id: u64) -> Self {
        Self {
            tag: tag.into(),
            id,
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.tag, self.id)
    }
}

/// A moderation action to record in the modlog channel.
#[derive(Debug, Clone)]
pub enum ModlogEntry {
    Purged { channel_id: u64, count: usize },
    SlowmodeSet { channel_id: u64, seconds: u16 },
    MessageSent { channel_id: u64, content: String },
    Kicked { target: Actor, reason: String },
    Banned { target: Actor, reason: String, delete_days: u8 },
    Warned { target: Actor, reason: String, total: u64 },
    WarningsCleared { target: Actor, count: u64 },
    TimedOut { target: Actor, minutes: i64, reason: String },
    TimeoutRemoved { target: Actor, reason: String },
}

impl ModlogEntry {
    fn title(&self) -> &'static str {
        match self {
            Self::Purged { .. } => "Messages Purged",
            Self::SlowmodeSet { .. } => "Slowmode Updated",
            Self::MessageSent { .. } => "Bot Message Sent",
            Self::Kicked { .. } => "Member Kicked",
            Self::Banned { .. } => "Member Banned",
            Self::Warned { .. } => "Member Warned",
            Self::WarningsCleared { .. } => "Warnings Cleared",
            Self::TimedOut { .. } => "Member Timed Out",
            Self::TimeoutRemoved { .. } => "Timeout Removed",
        }
    }

    fn color(&self) -> u32 {
        match self {
            Self::Purged { .. } | Self::SlowmodeSet { .. } | Self::MessageSent { .. } => {
                COLOR_BLURPLE
            }
            Self::Kicked { .. } => COLOR_RED,
            Self::Banned { .. } => COLOR_DARK_RED,
            Self::Warned { .. } => COLOR_ORANGE,
            Self::WarningsCleared { .. } | Self::TimeoutRemoved { .. } => COLOR_GREEN,
            Self::TimedOut { .. } => COLOR_DARK_GOLD,
        }
    }
}

/// Builds the modlog embed for an action taken by `moderator`.
pub fn build_modlog_embed(entry: &ModlogEntry, moderator: &Actor) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title(entry.title())
        .color(entry.color())
        .timestamp(Timestamp::now());

    // Channel actions lead with the channel, member actions with the member
    let embed = match entry {
        ModlogEntry::Purged { channel_id, .. }
        | ModlogEntry::SlowmodeSet { channel_id, .. }
        | ModlogEntry::MessageSent { channel_id, .. } => {
            embed.field("Channel", format!("<#{}>", channel_id), true)
        }
        ModlogEntry::Kicked { target, .. }
        | ModlogEntry::Banned { target, .. }
        | ModlogEntry::Warned { target, .. }
        | ModlogEntry::WarningsCleared { target, .. }
        | ModlogEntry::TimedOut { target, .. }
        | ModlogEntry::TimeoutRemoved { target, .. } => embed.field("User", target.describe(), true),
    };
    let embed = embed.field("Moderator", moderator.describe(), true);

    match entry {
        ModlogEntry::Purged { count, .. } => embed.field("Amount", count.to_string(), true),
        ModlogEntry::SlowmodeSet { seconds, .. } => {
            embed.field("Slowmode", format!("{} seconds", seconds), true)
        }
        ModlogEntry::MessageSent { content, .. } => {
            embed.field("Content", truncate_chars(content, MAX_FIELD_CHARS), false)
        }
        ModlogEntry::Kicked { reason, .. } | ModlogEntry::TimeoutRemoved { reason, .. } => {
            embed.field("Reason", reason, false)
        }
        ModlogEntry::Banned {
            reason,
            delete_days,
            ..
        } => embed
            .field("Reason", reason, false)
            .field("Deleted Messages (days)", delete_days.to_string(), true),
        ModlogEntry::Warned { reason, total, .. } => embed
            .field("Reason", reason, false)
            .field("Total Warnings", total.to_string(), true),
        ModlogEntry::WarningsCleared { count, .. } => {
            embed.field("Cleared Count", count.to_string(), true)
        }
        ModlogEntry::TimedOut {
            minutes, reason, ..
        } => embed
            .field("Duration (min)", minutes.to_string(), true)
            .field("Reason", reason, false),
    }
}

/// Builds the DM sent to a warned member.
pub fn build_warning_dm_embed(guild_name: &str, reason: &str, moderator: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("You have received a warning in {}", guild_name))
        .description(reason)
        .color(COLOR_ORANGE)
        .footer(CreateEmbedFooter::new(format!("Issued by {}", moderator)))
        .timestamp(Timestamp::now())
}

/// Builds the list of a member's warnings, numbered from oldest.
///
/// Only the most recent 25 fit in one embed; older ones are summarized in the footer.
pub fn build_warnings_embed(user_tag: &str, warnings: &[Warning]) -> CreateEmbed {
    let skipped = warnings.len().saturating_sub(MAX_EMBED_FIELDS);

    let mut embed = CreateEmbed::new()
        .title(format!("Warnings for {}", user_tag))
        .color(COLOR_ORANGE)
        .timestamp(Timestamp::now());

    for (number, warning) in warnings.iter().enumerate().skip(skipped) {
        embed = embed.field(
            format!(
                "#{} • <t:{}:R>",
                number + 1,
                warning.created_at.timestamp()
            ),
            format!(
                "**Mod:** <@{}>\n**Reason:** {}",
                warning.moderator_id,
                truncate_chars(&warning.reason, 900)
            ),
            false,
        );
    }

    if skipped > 0 {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Showing the {} most recent of {} warnings.",
            MAX_EMBED_FIELDS,
            warnings.len()
        )));
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn moderator() -> Actor {
        Actor::new("mod", 1)
    }

    fn fields(embed: CreateEmbed) -> Vec<(String, String)> {
        let json = serde_json::to_value(embed).unwrap();
        json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| {
                (
                    f["name"].as_str().unwrap().to_string(),
                    f["value"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    fn warning(id: i32) -> Warning {
        Warning {
            id,
            guild_id: "10".to_string(),
            user_id: "20".to_string(),
            moderator_id: "1".to_string(),
            reason: format!("Reason {}", id),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn ban_entry_lists_user_moderator_reason_and_days() {
        let entry = ModlogEntry::Banned {
            target: Actor::new("spammer", 99),
            reason: "Spam".to_string(),
            delete_days: 7,
        };

        let embed = build_modlog_embed(&entry, &moderator());
        let json = serde_json::to_value(embed.clone()).unwrap();

        assert_eq!(json["title"], "Member Banned");
        assert_eq!(json["color"], Value::from(COLOR_DARK_RED));
        assert_eq!(
            fields(embed),
            vec![
                ("User".to_string(), "spammer (99)".to_string()),
                ("Moderator".to_string(), "mod (1)".to_string()),
                ("Reason".to_string(), "Spam".to_string()),
                ("Deleted Messages (days)".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn channel_entries_lead_with_channel_mention() {
        let entry = ModlogEntry::Purged {
            channel_id: 5,
            count: 42,
        };

        let fields = fields(build_modlog_embed(&entry, &moderator()));

        assert_eq!(fields[0], ("Channel".to_string(), "<#5>".to_string()));
        assert_eq!(fields[2], ("Amount".to_string(), "42".to_string()));
    }

    #[test]
    fn said_content_is_truncated() {
        let entry = ModlogEntry::MessageSent {
            channel_id: 5,
            content: "x".repeat(2000),
        };

        let fields = fields(build_modlog_embed(&entry, &moderator()));

        assert_eq!(fields[2].1.len(), 1024);
    }

    #[test]
    fn warning_dm_names_guild_and_moderator() {
        let json =
            serde_json::to_value(build_warning_dm_embed("My Server", "Be nice", "mod")).unwrap();

        assert_eq!(json["title"], "You have received a warning in My Server");
        assert_eq!(json["description"], "Be nice");
        assert_eq!(json["footer"]["text"], "Issued by mod");
    }

    #[test]
    fn warnings_are_numbered_from_oldest() {
        let fields = fields(build_warnings_embed("user", &[warning(1), warning(2)]));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "#1 • <t:1700000000:R>");
        assert_eq!(fields[1].1, "**Mod:** <@1>\n**Reason:** Reason 2");
    }

    #[test]
    fn long_histories_keep_most_recent_entries() {
        let warnings: Vec<_> = (1..=30).map(warning).collect();

        let embed = build_warnings_embed("user", &warnings);
        let json = serde_json::to_value(embed.clone()).unwrap();
        let fields = fields(embed);

        assert_eq!(fields.len(), 25);
        assert!(fields[0].0.starts_with("#6 "));
        assert_eq!(
            json["footer"]["text"],
            "Showing the 25 most recent of 30 warnings."
        );
    }
}
