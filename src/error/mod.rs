//! Error types and user-facing error replies.
//!
//! `AppError` is the top-level error type returned by every command handler. It wraps the
//! domain-specific errors and knows how to describe itself to the member who triggered the
//! interaction. The interaction dispatcher is the only place that turns an `AppError` into a
//! reply; internal failures are logged there and replaced by a generic message.

pub mod config;
pub mod internal;
pub mod poll;

use std::time::Duration;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, poll::PollError};

/// Reply shown for failures the member can't do anything about.
const GENERIC_FAILURE: &str = "Something went wrong on my end. Try again in a bit.";

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Poll engine rejection; its message is shown to the member as-is.
    #[error(transparent)]
    PollErr(#[from] PollError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Job scheduler error while scheduling poll closures or reminders.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error indicating a bug or unexpected data.
    #[error(transparent)]
    InternalError(#[from] InternalError),

    /// The member invoked a command too quickly after the last use.
    #[error("Command on cooldown for another {0:?}")]
    Cooldown(Duration),

    /// Requested resource doesn't exist.
    ///
    /// # Fields
    /// - Message shown to the member
    #[error("{0}")]
    NotFound(String),

    /// The member asked for something the bot refuses to do.
    ///
    /// # Fields
    /// - Message shown to the member
    #[error("{0}")]
    BadRequest(String),
}

/// Boxes the error to keep `AppError` small, as `serenity::Error` is very large.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Text shown ephemerally to the member whose interaction failed.
    ///
    /// Validation-style errors carry their own message. Everything else is logged with full
    /// detail and replaced by a generic message to avoid leaking internals.
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            Self::PollErr(err @ PollError::InvalidOptionIndex { .. }) => {
                tracing::error!("Poll received an impossible vote: {}", err);
                GENERIC_FAILURE.to_string()
            }
            Self::PollErr(err) => err.to_string(),
            Self::Cooldown(remaining) => format!(
                "Slow down! Try again in {:.1}s.",
                remaining.as_secs_f32().max(0.1)
            ),
            err => {
                tracing::error!("{}", err);
                GENERIC_FAILURE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_shown_verbatim() {
        let err = AppError::BadRequest("You can't kick yourself.".to_string());
        assert_eq!(err.user_message(), "You can't kick yourself.");

        let err = AppError::NotFound("No modlog channel is configured.".to_string());
        assert_eq!(err.user_message(), "No modlog channel is configured.");
    }

    #[test]
    fn poll_errors_explain_themselves() {
        let err = AppError::from(PollError::PollClosed);
        assert_eq!(err.user_message(), "This poll is closed.");

        let err = AppError::from(PollError::InvalidOptions { min: 2, given: 1 });
        assert_eq!(err.user_message(), "A poll needs at least 2 options, got 1.");
    }

    #[test]
    fn internal_errors_are_hidden() {
        let err = AppError::from(PollError::InvalidOptionIndex { index: 9, len: 2 });
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = AppError::from(InternalError::MissingOption("user".to_string()));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn cooldown_reports_remaining_time() {
        let err = AppError::Cooldown(Duration::from_millis(2500));
        assert_eq!(err.user_message(), "Slow down! Try again in 2.5s.");
    }
}
