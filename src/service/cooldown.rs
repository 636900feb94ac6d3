//! Per-user command cooldowns.
//!
//! Fun commands that hit third-party APIs are rate limited per member. The `CooldownService`
//! remembers when each member last used each limited command and rejects calls arriving
//! before the command's period has elapsed. Entries live only in memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::AppError;

/// Service tracking when each member last used each rate-limited command.
#[derive(Clone)]
pub struct CooldownService {
    /// Last accepted use, keyed by command name and user ID.
    last_used: Arc<RwLock<HashMap<(&'static str, u64), Instant>>>,
}

impl CooldownService {
    /// Creates a service with no recorded uses.
    pub fn new() -> Self {
        Self {
            last_used: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Records a use of `command` by `user_id` unless it is still on cooldown.
    ///
    /// A rejected call does not reset the cooldown.
    ///
    /// # Arguments
    /// - `command` - Name of the rate-limited command
    /// - `user_id` - Discord ID of the invoking member
    /// - `period` - Minimum time between two accepted uses
    ///
    /// # Returns
    /// - `Ok(())` - Use accepted and recorded
    /// - `Err(AppError::Cooldown)` - Still on cooldown, carrying the remaining wait
    pub async fn check(
        &self,
        command: &'static str,
        user_id: u64,
        period: Duration,
    ) -> Result<(), AppError> {
        let now = Instant::now();
        let mut last_used = self.last_used.write().await;

        if let Some(previous) = last_used.get(&(command, user_id)) {
            let elapsed = now.duration_since(*previous);
            if elapsed < period {
                return Err(AppError::Cooldown(period - elapsed));
            }
        }

        last_used.insert((command, user_id), now);

        Ok(())
    }
}

impl Default for CooldownService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn second_use_within_period_is_rejected() {
        let service = CooldownService::new();

        service.check("cat", 1, PERIOD).await.unwrap();
        let result = service.check("cat", 1, PERIOD).await;

        match result {
            Err(AppError::Cooldown(remaining)) => assert!(remaining <= PERIOD),
            other => panic!("expected cooldown, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn cooldowns_are_per_user_and_per_command() {
        let service = CooldownService::new();

        service.check("cat", 1, PERIOD).await.unwrap();

        assert!(service.check("cat", 2, PERIOD).await.is_ok());
        assert!(service.check("meme", 1, PERIOD).await.is_ok());
    }

    #[tokio::test]
    async fn use_is_accepted_after_period() {
        let service = CooldownService::new();
        let period = Duration::from_millis(20);

        service.check("dog", 1, period).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(service.check("dog", 1, period).await.is_ok());
    }
}
