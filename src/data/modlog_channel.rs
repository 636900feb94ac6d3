//! Modlog channel data repository for database operations.
//!
//! This module provides the `ModlogChannelRepository` for storing which channel each guild
//! wants its moderation actions logged to. A guild has at most one modlog channel.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::model::modlog::{ModlogChannel, UpsertModlogChannelParam};

/// Repository providing database operations for modlog channel configuration.
pub struct ModlogChannelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModlogChannelRepository<'a> {
    /// Creates a new ModlogChannelRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the modlog channel configured for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(ModlogChannel))` - Logging is enabled for the guild
    /// - `Ok(None)` - Logging is disabled
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Option<ModlogChannel>, DbErr> {
        let entity = entity::prelude::ModlogChannel::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(ModlogChannel::from_entity))
    }

    /// Sets the modlog channel for a guild, replacing any previous one.
    ///
    /// # Returns
    /// - `Ok(ModlogChannel)` - The stored configuration
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertModlogChannelParam) -> Result<ModlogChannel, DbErr> {
        let existing = self.get_by_guild(param.guild_id).await?;

        let active = entity::modlog_channel::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        };

        let entity = if existing.is_some() {
            active.update(self.db).await?
        } else {
            active.insert(self.db).await?
        };

        Ok(ModlogChannel::from_entity(entity))
    }

    /// Disables logging for a guild.
    ///
    /// # Returns
    /// - `Ok(true)` - A configured channel was removed
    /// - `Ok(false)` - Logging was already disabled
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, guild_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::ModlogChannel::delete_by_id(guild_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
