//! Moderation rules shared by the moderation commands.
//!
//! Target guards, audit-log reasons and purge eligibility live here so they can be tested
//! without Discord. Warning storage and modlog delivery have their own services.

pub mod embed;
pub mod modlog;
pub mod warning;

use crate::error::AppError;

/// Discord refuses to bulk delete messages older than this.
pub const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Most messages `/purge` removes in one invocation.
pub const MAX_PURGE: u64 = 500;

/// Actions a moderator may not aim at themselves or at the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetedAction {
    Kick,
    Ban,
    Timeout,
}

impl TargetedAction {
    fn self_target_message(self) -> &'static str {
        match self {
            Self::Kick => "You can't kick yourself, touch grass instead.",
            Self::Ban => "You can't ban yourself. Therapy maybe, but not ban.",
            Self::Timeout => "Timing yourself out is just called going to bed.",
        }
    }

    fn bot_target_message(self) -> &'static str {
        match self {
            Self::Kick => "I'm not kicking myself out of the server.",
            Self::Ban => "I'm not banning myself. That's your job.",
            Self::Timeout => "I'm not timing myself out.",
        }
    }
}

/// Refuses actions aimed at the moderator themselves or at the bot.
///
/// # Returns
/// - `Ok(())` - Target is someone else
/// - `Err(AppError::BadRequest)` - Target is the moderator or the bot
pub fn check_target(
    action: TargetedAction,
    moderator_id: u64,
    target_id: u64,
    bot_id: u64,
) -> Result<(), AppError> {
    if target_id == moderator_id {
        return Err(AppError::BadRequest(action.self_target_message().to_string()));
    }
    if target_id == bot_id {
        return Err(AppError::BadRequest(action.bot_target_message().to_string()));
    }

    Ok(())
}

/// Refuses to warn bot accounts.
pub fn check_warn_target(target_is_bot: bool) -> Result<(), AppError> {
    if target_is_bot {
        return Err(AppError::BadRequest(
            "I'm not warning other bots. They're already suffering.".to_string(),
        ));
    }

    Ok(())
}

/// Reason recorded in the guild's audit log: `"{moderator} | {reason}"`.
pub fn audit_reason(moderator: &str, reason: &str) -> String {
    format!("{} | {}", moderator, reason)
}

/// Whether a message created at `created_at` can still be bulk deleted at `now`.
pub fn is_bulk_deletable(created_at: i64, now: i64) -> bool {
    now - created_at < BULK_DELETE_MAX_AGE_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOD: u64 = 1;
    const BOT: u64 = 2;

    #[test]
    fn refuses_self_and_bot_targets() {
        let err = check_target(TargetedAction::Kick, MOD, MOD, BOT).unwrap_err();
        assert_eq!(
            err.user_message(),
            "You can't kick yourself, touch grass instead."
        );

        let err = check_target(TargetedAction::Ban, MOD, BOT, BOT).unwrap_err();
        assert_eq!(err.user_message(), "I'm not banning myself. That's your job.");

        assert!(check_target(TargetedAction::Timeout, MOD, 3, BOT).is_ok());
    }

    #[test]
    fn refuses_to_warn_bots() {
        assert!(matches!(check_warn_target(true), Err(AppError::BadRequest(_))));
        assert!(check_warn_target(false).is_ok());
    }

    #[test]
    fn formats_audit_reason() {
        assert_eq!(audit_reason("mod#0001", "Spam"), "mod#0001 | Spam");
    }

    #[test]
    fn bulk_delete_window_is_fourteen_days() {
        let now = 2_000_000_000;

        assert!(is_bulk_deletable(now - 60, now));
        assert!(!is_bulk_deletable(now - BULK_DELETE_MAX_AGE_SECS, now));
    }
}
