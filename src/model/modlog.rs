//! Domain models for moderation log configuration.

use chrono::{DateTime, Utc};

/// The channel a guild's moderation actions are logged to.
#[derive(Debug, Clone, PartialEq)]
pub struct ModlogChannel {
    /// Discord guild ID (stored as String).
    pub guild_id: String,
    /// Discord channel ID receiving log embeds (stored as String).
    pub channel_id: String,
    /// When the channel was last configured.
    pub updated_at: DateTime<Utc>,
}

impl ModlogChannel {
    /// Converts an entity model to a modlog channel domain model at the repository boundary.
    pub fn from_entity(entity: entity::modlog_channel::Model) -> Self {
        Self {
            guild_id: entity.guild_id,
            channel_id: entity.channel_id,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for setting a guild's modlog channel.
#[derive(Debug, Clone)]
pub struct UpsertModlogChannelParam {
    pub guild_id: u64,
    pub channel_id: u64,
}
