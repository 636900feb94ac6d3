use serenity::http::Http;
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::poll::{render::DiscordPollRenderer, PollService},
};

/// Schedules the closure of a poll once its open window has elapsed.
///
/// The job closes the poll and edits its message to show the results. If the poll was
/// already closed the job does nothing.
///
/// # Arguments
/// - `scheduler` - Running job scheduler
/// - `polls` - Registry holding the poll
/// - `discord_http` - Discord HTTP client for editing the poll message
/// - `poll_id` - Poll to close
/// - `after` - How long the poll stays open
pub async fn schedule_poll_close(
    scheduler: &JobScheduler,
    polls: PollService,
    discord_http: Arc<Http>,
    poll_id: u64,
    after: Duration,
) -> Result<(), AppError> {
    let job = Job::new_one_shot_async(after, move |_uuid, _lock| {
        let polls = polls.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            let renderer = DiscordPollRenderer::new(http);
            polls.close_and_render(poll_id, &renderer).await;
        })
    })?;

    scheduler.add(job).await?;

    tracing::debug!("Poll {} closes in {}s", poll_id, after.as_secs());

    Ok(())
}
