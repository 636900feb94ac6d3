//! Warning data repository for database operations.
//!
//! This module provides the `WarningRepository` for issuing, listing, counting, and clearing
//! member warnings. Warnings are scoped to a guild: the same member has an independent
//! history in every guild.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::warning::{CreateWarningParam, Warning};

/// Repository providing database operations for member warnings.
pub struct WarningRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarningRepository<'a> {
    /// Creates a new WarningRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new warning issued now.
    ///
    /// # Arguments
    /// - `param` - Guild, member, moderator and reason for the warning
    ///
    /// # Returns
    /// - `Ok(Warning)` - The stored warning with its assigned ID
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateWarningParam) -> Result<Warning, DbErr> {
        let entity = entity::warning::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            moderator_id: ActiveValue::Set(param.moderator_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(Warning::from_entity(entity))
    }

    /// Gets every warning of a member in a guild, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Warning>)` - Warnings in issue order, empty if the member has none
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_user(&self, guild_id: u64, user_id: u64) -> Result<Vec<Warning>, DbErr> {
        let entities = entity::prelude::Warning::find()
            .filter(entity::warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::warning::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(entity::warning::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Warning::from_entity).collect())
    }

    /// Counts the warnings of a member in a guild.
    pub async fn count_by_user(&self, guild_id: u64, user_id: u64) -> Result<u64, DbErr> {
        entity::prelude::Warning::find()
            .filter(entity::warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::warning::Column::UserId.eq(user_id.to_string()))
            .count(self.db)
            .await
    }

    /// Deletes every warning of a member in a guild.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of warnings removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_user(&self, guild_id: u64, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::Warning::delete_many()
            .filter(entity::warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::warning::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
