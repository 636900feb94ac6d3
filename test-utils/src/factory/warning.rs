//! Warning factory for creating test warning entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test warnings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::warning::WarningFactory;
///
/// let warning = WarningFactory::new(&db, guild_id, user_id)
///     .moderator_id(42)
///     .reason("Spamming")
///     .build()
///     .await?;
/// ```
pub struct WarningFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    moderator_id: u64,
    reason: String,
    created_at: DateTime<Utc>,
}

impl<'a> WarningFactory<'a> {
    /// Creates a new WarningFactory with default values.
    ///
    /// Defaults:
    /// - moderator_id: auto-incremented
    /// - reason: `"Warning {id}"`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, guild_id: u64, user_id: u64) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id,
            user_id,
            moderator_id: id,
            reason: format!("Warning {}", id),
            created_at: Utc::now(),
        }
    }

    pub fn moderator_id(mut self, moderator_id: u64) -> Self {
        self.moderator_id = moderator_id;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the warning entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::warning::Model)` - Created warning entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::warning::Model, DbErr> {
        entity::warning::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            user_id: ActiveValue::Set(self.user_id.to_string()),
            moderator_id: ActiveValue::Set(self.moderator_id.to_string()),
            reason: ActiveValue::Set(self.reason),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a warning with default values.
///
/// Shorthand for `WarningFactory::new(db, guild_id, user_id).build().await`.
pub async fn create_warning(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> Result<entity::warning::Model, DbErr> {
    WarningFactory::new(db, guild_id, user_id).build().await
}
