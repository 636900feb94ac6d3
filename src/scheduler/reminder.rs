use serenity::{
    all::{ChannelId, CreateAllowedMentions, CreateMessage, UserId},
    http::Http,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, util::time::relative_timestamp};

/// A reminder requested with `/remindme`.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub user_id: u64,
    /// Channel the reminder was requested in, used when DMs are off or fail.
    pub channel_id: u64,
    pub message: String,
    /// Unix timestamp of the request.
    pub requested_at: i64,
    pub via_dm: bool,
}

/// Text of a delivered reminder.
pub fn reminder_content(message: &str, requested_at: i64) -> String {
    format!(
        "⏰ **Reminder:** {}\nRequested {}.",
        message,
        relative_timestamp(requested_at)
    )
}

/// Schedules a reminder for delivery after `delay`.
pub async fn schedule_reminder(
    scheduler: &JobScheduler,
    discord_http: Arc<Http>,
    reminder: Reminder,
    delay: Duration,
) -> Result<(), AppError> {
    let job = Job::new_one_shot_async(delay, move |_uuid, _lock| {
        let http = discord_http.clone();
        let reminder = reminder.clone();

        Box::pin(async move {
            deliver(http, &reminder).await;
        })
    })?;

    scheduler.add(job).await?;

    Ok(())
}

/// Delivers by DM when requested, falling back to the original channel.
async fn deliver(http: Arc<Http>, reminder: &Reminder) {
    let content = reminder_content(&reminder.message, reminder.requested_at);
    let user_id = UserId::new(reminder.user_id);

    if reminder.via_dm {
        match user_id
            .direct_message(&http, CreateMessage::new().content(&content))
            .await
        {
            Ok(_) => return,
            Err(e) => tracing::debug!(
                "Couldn't DM reminder to {}, falling back to channel: {}",
                reminder.user_id,
                e
            ),
        }
    }

    let message = CreateMessage::new()
        .content(format!("<@{}> {}", reminder.user_id, content))
        .allowed_mentions(CreateAllowedMentions::new().users(vec![user_id]));

    if let Err(e) = ChannelId::new(reminder.channel_id)
        .send_message(&http, message)
        .await
    {
        tracing::warn!(
            "Failed to deliver reminder to {} in channel {}: {}",
            reminder.user_id,
            reminder.channel_id,
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_quotes_message_and_request_time() {
        assert_eq!(
            reminder_content("Stretch", 1_700_000_000),
            "⏰ **Reminder:** Stretch\nRequested <t:1700000000:R>."
        );
    }
}
