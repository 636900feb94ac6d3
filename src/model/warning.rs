//! Domain models for member warnings.

use chrono::{DateTime, Utc};

/// A warning issued to a member of a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    /// Unique identifier, increasing in issue order.
    pub id: i32,
    /// Discord guild ID (stored as String).
    pub guild_id: String,
    /// Discord ID of the warned member (stored as String).
    pub user_id: String,
    /// Discord ID of the moderator who issued the warning (stored as String).
    pub moderator_id: String,
    /// Reason given by the moderator.
    pub reason: String,
    /// When the warning was issued.
    pub created_at: DateTime<Utc>,
}

impl Warning {
    /// Converts an entity model to a warning domain model at the repository boundary.
    pub fn from_entity(entity: entity::warning::Model) -> Self {
        Self {
            id: entity.id,
            guild_id: entity.guild_id,
            user_id: entity.user_id,
            moderator_id: entity.moderator_id,
            reason: entity.reason,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for issuing a new warning.
#[derive(Debug, Clone)]
pub struct CreateWarningParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
}
