//! Drawing polls on Discord.
//!
//! The poll engine knows nothing about Discord. This module turns polls into embeds and
//! button rows, and provides the `PollRenderer` seam the service calls when a poll closes so
//! the closure path can be exercised without a gateway connection.

use std::sync::Arc;

use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
        EditMessage, MessageId,
    },
    async_trait,
    http::Http,
};

use crate::{
    error::AppError,
    service::poll::ClosedPoll,
    util::{parse::poll_custom_id, time::relative_timestamp},
};

/// Embed color for polls (Discord blurple).
pub const POLL_COLOR: u32 = 0x5865F2;

const POLL_TITLE: &str = "📊 Poll";

/// Displays the results of a closed poll.
#[async_trait]
pub trait PollRenderer: Send + Sync {
    async fn render_results(&self, closed: &ClosedPoll) -> Result<(), AppError>;
}

/// Renderer editing the original poll message in place.
pub struct DiscordPollRenderer {
    http: Arc<Http>,
}

impl DiscordPollRenderer {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PollRenderer for DiscordPollRenderer {
    /// Replaces the poll message with the results and disables every button.
    ///
    /// # Returns
    /// - `Ok(())` - Message edited, or the poll never got a message to edit
    /// - `Err(AppError::DiscordErr)` - Message deleted or the bot lost access to the channel
    async fn render_results(&self, closed: &ClosedPoll) -> Result<(), AppError> {
        let Some(message) = closed.message else {
            tracing::warn!(
                "Poll {} closed without a message to display results on",
                closed.poll_id
            );
            return Ok(());
        };

        let edit = EditMessage::new()
            .embed(build_results_embed(closed))
            .components(build_vote_buttons(closed.poll_id, &closed.options, true));

        ChannelId::new(message.channel_id)
            .edit_message(&self.http, MessageId::new(message.message_id), edit)
            .await?;

        Ok(())
    }
}

/// Builds the embed posted when a poll opens.
///
/// # Arguments
/// - `question` - The poll question, used as the description
/// - `closes_at` - Unix timestamp of the scheduled closure
pub fn build_poll_embed(question: &str, closes_at: i64) -> CreateEmbed {
    CreateEmbed::new()
        .title(POLL_TITLE)
        .description(question)
        .color(POLL_COLOR)
        .footer(CreateEmbedFooter::new(format!(
            "Closes {}",
            relative_timestamp(closes_at)
        )))
}

/// Builds the embed replacing the poll once it has closed.
pub fn build_results_embed(closed: &ClosedPoll) -> CreateEmbed {
    CreateEmbed::new()
        .title(POLL_TITLE)
        .description(&closed.question)
        .color(POLL_COLOR)
        .field("Results", closed.results.markdown_summary(), false)
        .footer(CreateEmbedFooter::new("Poll closed"))
}

/// Builds one button per option, in option order.
///
/// Custom IDs follow `poll:{poll_id}:{index}` so votes can be routed back to the poll.
pub fn build_vote_buttons(poll_id: u64, options: &[String], disabled: bool) -> Vec<CreateActionRow> {
    let buttons = options
        .iter()
        .enumerate()
        .map(|(index, label)| {
            CreateButton::new(poll_custom_id(poll_id, index))
                .label(label)
                .style(ButtonStyle::Primary)
                .disabled(disabled)
        })
        .collect();

    vec![CreateActionRow::Buttons(buttons)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::poll::PollResults;
    use serde_json::Value;

    fn closed_poll() -> ClosedPoll {
        ClosedPoll {
            poll_id: 7,
            question: "Lunch?".to_string(),
            options: vec!["Pizza".to_string(), "Tacos".to_string()],
            message: None,
            results: PollResults {
                counts: vec![("Pizza".to_string(), 1), ("Tacos".to_string(), 2)],
            },
        }
    }

    #[test]
    fn poll_embed_shows_question_and_closing_time() {
        let json = serde_json::to_value(build_poll_embed("Lunch?", 1_700_000_000)).unwrap();

        assert_eq!(json["title"], "📊 Poll");
        assert_eq!(json["description"], "Lunch?");
        assert_eq!(json["footer"]["text"], "Closes <t:1700000000:R>");
    }

    #[test]
    fn results_embed_lists_counts_in_option_order() {
        let json = serde_json::to_value(build_results_embed(&closed_poll())).unwrap();

        assert_eq!(json["fields"][0]["name"], "Results");
        assert_eq!(json["fields"][0]["value"], "**Pizza** — 1\n**Tacos** — 2");
    }

    #[test]
    fn buttons_carry_routable_ids() {
        let options = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let rows = serde_json::to_value(build_vote_buttons(9, &options, false)).unwrap();

        let buttons = rows[0]["components"].as_array().unwrap();
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[2]["custom_id"], "poll:9:2");
        assert_eq!(buttons[2]["label"], "C");
        assert_ne!(buttons[0]["disabled"], Value::Bool(true));
    }

    #[test]
    fn closed_buttons_are_disabled() {
        let options = vec!["A".to_string(), "B".to_string()];
        let rows = serde_json::to_value(build_vote_buttons(9, &options, true)).unwrap();

        for button in rows[0]["components"].as_array().unwrap() {
            assert_eq!(button["disabled"], Value::Bool(true));
        }
    }
}
