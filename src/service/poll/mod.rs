//! Poll service managing every open poll.
//!
//! This module provides the `PollService`, a registry of open polls keyed by poll ID (the ID
//! of the interaction that created the poll). Each poll sits behind its own mutex, which is
//! the serialization point for votes and closure: two toggles, or a toggle and the closure,
//! never interleave on the same poll. Polls are independent and never share mutable state.
//!
//! Polls live only in memory. A restart before closure loses the poll; its buttons then
//! answer that the poll is closed.

pub mod render;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::{
    error::poll::PollError,
    model::poll::{Poll, PollResults, VoteReceipt},
};

use self::render::PollRenderer;

/// Shortest accepted open window in seconds.
pub const MIN_POLL_DURATION_SECS: u64 = 15;

/// Longest accepted open window in seconds.
pub const MAX_POLL_DURATION_SECS: u64 = 3600;

/// Location of the message displaying a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollMessage {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Everything a renderer needs to redraw a poll once it has closed.
#[derive(Debug, Clone)]
pub struct ClosedPoll {
    pub poll_id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub message: Option<PollMessage>,
    pub results: PollResults,
}

/// A registered poll and where it is displayed.
struct PollEntry {
    poll: Poll,
    message: Option<PollMessage>,
}

/// Service owning all open polls.
///
/// Cloning is cheap; clones share the same registry.
#[derive(Clone)]
pub struct PollService {
    polls: Arc<RwLock<HashMap<u64, Arc<Mutex<PollEntry>>>>>,
}

impl PollService {
    /// Creates a service with no open polls.
    pub fn new() -> Self {
        Self {
            polls: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Validates and registers a new poll.
    ///
    /// # Arguments
    /// - `poll_id` - Unique ID for the poll, used in its button custom IDs
    /// - `question` - The poll question
    /// - `options` - Option labels; blanks are ignored
    /// - `duration_secs` - Open window, between 15 and 3600 seconds
    ///
    /// # Returns
    /// - `Ok(Poll)` - Snapshot of the newly opened poll, for rendering the creation message
    /// - `Err(PollError::InvalidDuration)` - Duration outside the accepted bounds
    /// - `Err(PollError::InvalidOptions)` - Fewer than two usable options
    pub async fn open(
        &self,
        poll_id: u64,
        question: impl Into<String>,
        options: Vec<String>,
        duration_secs: u64,
    ) -> Result<Poll, PollError> {
        if !(MIN_POLL_DURATION_SECS..=MAX_POLL_DURATION_SECS).contains(&duration_secs) {
            return Err(PollError::InvalidDuration {
                min: MIN_POLL_DURATION_SECS,
                max: MAX_POLL_DURATION_SECS,
                given: duration_secs,
            });
        }

        let poll = Poll::create(question, options, Duration::from_secs(duration_secs))?;
        let snapshot = poll.clone();

        self.polls.write().await.insert(
            poll_id,
            Arc::new(Mutex::new(PollEntry {
                poll,
                message: None,
            })),
        );

        tracing::debug!(
            "Opened poll {} with {} options for {}s",
            poll_id,
            snapshot.options().len(),
            duration_secs
        );

        Ok(snapshot)
    }

    /// Records which message displays the poll so closure can edit it.
    ///
    /// # Returns
    /// - `true` - Message attached
    /// - `false` - Poll is no longer open
    pub async fn attach_message(&self, poll_id: u64, message: PollMessage) -> bool {
        let Some(entry) = self.entry(poll_id).await else {
            return false;
        };

        let mut entry = entry.lock().await;
        if entry.poll.is_closed() {
            return false;
        }
        entry.message = Some(message);

        true
    }

    /// Toggles a member's vote on a poll.
    ///
    /// # Arguments
    /// - `poll_id` - Poll the button belongs to
    /// - `user_id` - Discord ID of the voter
    /// - `index` - Index of the pressed option
    ///
    /// # Returns
    /// - `Ok(VoteReceipt)` - Outcome for the private acknowledgment
    /// - `Err(PollError::PollClosed)` - Poll closed or unknown (e.g. lost in a restart)
    /// - `Err(PollError::InvalidOptionIndex)` - Button index outside the poll's options
    pub async fn vote(
        &self,
        poll_id: u64,
        user_id: u64,
        index: usize,
    ) -> Result<VoteReceipt, PollError> {
        let entry = self.entry(poll_id).await.ok_or(PollError::PollClosed)?;

        let mut entry = entry.lock().await;
        entry.poll.toggle_vote(user_id, index)
    }

    /// Closes a poll and returns what is needed to display its results.
    ///
    /// The poll leaves the registry first, then is closed under its own lock, so a vote racing
    /// with closure is either counted or rejected, never lost. Returns `None` if the poll was
    /// already closed, which makes a second timer firing harmless.
    pub async fn close(&self, poll_id: u64) -> Option<ClosedPoll> {
        let entry = self.polls.write().await.remove(&poll_id)?;

        let mut entry = entry.lock().await;
        let results = entry.poll.close()?;

        Some(ClosedPoll {
            poll_id,
            question: entry.poll.question().to_string(),
            options: entry.poll.options().to_vec(),
            message: entry.message,
            results,
        })
    }

    /// Closes a poll and hands its results to the renderer.
    ///
    /// The renderer runs after the poll's lock has been released. Rendering failures (such as
    /// the poll message having been deleted) are logged; the poll stays closed either way.
    ///
    /// # Returns
    /// - `Some(PollResults)` - The poll was closed by this call
    /// - `None` - The poll was already closed
    pub async fn close_and_render(
        &self,
        poll_id: u64,
        renderer: &dyn PollRenderer,
    ) -> Option<PollResults> {
        let closed = self.close(poll_id).await?;

        tracing::info!(
            "Closed poll {} with {} votes",
            poll_id,
            closed.results.total()
        );

        if let Err(e) = renderer.render_results(&closed).await {
            tracing::error!("Failed to render results for poll {}: {}", poll_id, e);
        }

        Some(closed.results)
    }

    /// Drops a poll whose creation message could not be sent.
    pub async fn discard(&self, poll_id: u64) {
        self.polls.write().await.remove(&poll_id);
    }

    /// Number of polls currently open.
    pub async fn open_count(&self) -> usize {
        self.polls.read().await.len()
    }

    async fn entry(&self, poll_id: u64) -> Option<Arc<Mutex<PollEntry>>> {
        self.polls.read().await.get(&poll_id).cloned()
    }
}

impl Default for PollService {
    fn default() -> Self {
        Self::new()
    }
}
