//! Modlog channel factory for creating test modlog configuration entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test modlog channel configurations.
pub struct ModlogChannelFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
}

impl<'a> ModlogChannelFactory<'a> {
    /// Creates a new ModlogChannelFactory with an auto-incremented channel ID.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            channel_id: next_id(),
        }
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    /// Builds and inserts the modlog channel entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::modlog_channel::Model)` - Created modlog channel entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::modlog_channel::Model, DbErr> {
        entity::modlog_channel::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Configures a modlog channel for a guild.
///
/// Shorthand for `ModlogChannelFactory::new(db, guild_id).channel_id(channel_id).build().await`.
pub async fn create_modlog_channel(
    db: &DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
) -> Result<entity::modlog_channel::Model, DbErr> {
    ModlogChannelFactory::new(db, guild_id)
        .channel_id(channel_id)
        .build()
        .await
}
