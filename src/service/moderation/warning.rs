//! Warning service for issuing and reviewing member warnings.

use sea_orm::DatabaseConnection;

use crate::{
    data::warning::WarningRepository,
    error::AppError,
    model::warning::{CreateWarningParam, Warning},
};

pub struct WarningService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarningService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a warning.
    ///
    /// # Returns
    /// - `Ok((Warning, u64))` - The stored warning and the member's total in this guild
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn issue(&self, param: CreateWarningParam) -> Result<(Warning, u64), AppError> {
        let repo = WarningRepository::new(self.db);

        let (guild_id, user_id) = (param.guild_id, param.user_id);
        let warning = repo.create(param).await?;
        let total = repo.count_by_user(guild_id, user_id).await?;

        tracing::info!(
            "Warning {} issued to {} in guild {} (total {})",
            warning.id,
            user_id,
            guild_id,
            total
        );

        Ok((warning, total))
    }

    /// Lists a member's warnings, oldest first.
    pub async fn list(&self, guild_id: u64, user_id: u64) -> Result<Vec<Warning>, AppError> {
        Ok(WarningRepository::new(self.db)
            .get_by_user(guild_id, user_id)
            .await?)
    }

    /// Clears a member's warnings, returning how many were removed.
    pub async fn clear(&self, guild_id: u64, user_id: u64) -> Result<u64, AppError> {
        let removed = WarningRepository::new(self.db)
            .delete_by_user(guild_id, user_id)
            .await?;

        if removed > 0 {
            tracing::info!(
                "Cleared {} warnings of {} in guild {}",
                removed,
                user_id,
                guild_id
            );
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn param(reason: &str) -> CreateWarningParam {
        CreateWarningParam {
            guild_id: 1,
            user_id: 2,
            moderator_id: 3,
            reason: reason.to_string(),
        }
    }

    #[tokio::test]
    async fn issue_reports_running_total() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::warning::create_warning(db, 1, 2).await?;

        let service = WarningService::new(db);
        let (warning, total) = service.issue(param("Spam")).await?;

        assert_eq!(warning.reason, "Spam");
        assert_eq!(total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn clear_then_list_is_empty() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = WarningService::new(db);
        service.issue(param("One")).await?;
        service.issue(param("Two")).await?;

        assert_eq!(service.clear(1, 2).await?, 2);
        assert!(service.list(1, 2).await?.is_empty());
        assert_eq!(service.clear(1, 2).await?, 0);

        Ok(())
    }
}
