//! Modlog service for configuring and delivering moderation logs.
//!
//! Delivery is best effort: a missing configuration, a deleted channel or a lack of
//! permissions never fails the moderation command that produced the entry.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage},
    http::Http,
};

use crate::{
    data::modlog_channel::ModlogChannelRepository,
    error::AppError,
    model::modlog::{ModlogChannel, UpsertModlogChannelParam},
    util::parse::parse_u64_from_string,
};

pub struct ModlogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModlogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the channel moderation actions are logged to.
    pub async fn set(&self, guild_id: u64, channel_id: u64) -> Result<ModlogChannel, AppError> {
        let modlog = ModlogChannelRepository::new(self.db)
            .upsert(UpsertModlogChannelParam {
                guild_id,
                channel_id,
            })
            .await?;

        tracing::info!("Modlog for guild {} set to {}", guild_id, channel_id);

        Ok(modlog)
    }

    /// Disables logging, returning whether a channel was configured.
    pub async fn disable(&self, guild_id: u64) -> Result<bool, AppError> {
        Ok(ModlogChannelRepository::new(self.db).delete(guild_id).await?)
    }

    /// Gets the configured modlog channel ID.
    ///
    /// # Returns
    /// - `Ok(Some(u64))` - Logging is enabled to this channel
    /// - `Ok(None)` - Logging is disabled
    /// - `Err(AppError)` - Database error or corrupt stored ID
    pub async fn channel_id(&self, guild_id: u64) -> Result<Option<u64>, AppError> {
        ModlogChannelRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?
            .map(|modlog| parse_u64_from_string(modlog.channel_id))
            .transpose()
    }

    /// Posts an entry to the guild's modlog channel, if one is configured.
    ///
    /// Failures are logged and swallowed.
    pub async fn post(&self, http: &Http, guild_id: u64, embed: CreateEmbed) {
        let channel_id = match self.channel_id(guild_id).await {
            Ok(Some(channel_id)) => channel_id,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Failed to look up modlog for guild {}: {}", guild_id, e);
                return;
            }
        };

        if let Err(e) = ChannelId::new(channel_id)
            .send_message(http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!(
                "Failed to post modlog entry to channel {} in guild {}: {}",
                channel_id,
                guild_id,
                e
            );
        }
    }
}
