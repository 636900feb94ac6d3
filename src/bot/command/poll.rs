//! `/poll` and the vote buttons it posts.

use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, ComponentInteraction, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::{
    bot::command::{options::CommandOptions, reply},
    error::AppError,
    scheduler::poll_close::schedule_poll_close,
    service::poll::{
        render::{build_poll_embed, build_vote_buttons, DiscordPollRenderer},
        PollMessage,
    },
    state::BotState,
};

const DEFAULT_DURATION_SECS: i64 = 60;

const OPTION_NAMES: [&str; 5] = ["option1", "option2", "option3", "option4", "option5"];

pub fn register() -> CreateCommand {
    let command = CreateCommand::new("poll")
        .description("Create a quick button poll (auto-closes).")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "question",
                "What are we voting on?",
            )
            .required(true),
        );

    OPTION_NAMES
        .iter()
        .enumerate()
        .fold(command, |command, (i, name)| {
            let description = if i < 2 {
                format!("Option {}", i + 1)
            } else {
                format!("Option {} (optional)", i + 1)
            };
            command.add_option(
                CreateCommandOption::new(CommandOptionType::String, *name, description)
                    .required(i < 2),
            )
        })
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "duration_seconds",
                "How long the poll runs",
            )
            .min_int_value(15)
            .max_int_value(3600),
        )
}

/// Opens a poll, posts it with one button per option and schedules its closure.
pub async fn run(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let options = CommandOptions::new(command);
    let question = options.require_string("question")?;
    let labels: Vec<String> = OPTION_NAMES
        .iter()
        .filter_map(|name| options.string(name))
        .map(str::to_string)
        .collect();
    let duration_secs = options
        .integer("duration_seconds")
        .unwrap_or(DEFAULT_DURATION_SECS);
    // Negative durations fall through to the engine's bounds check.
    let duration_secs = u64::try_from(duration_secs).unwrap_or(0);

    let poll_id = command.id.get();
    let poll = state
        .polls
        .open(poll_id, question, labels, duration_secs)
        .await?;

    let closes_at = Utc::now().timestamp() + poll.duration().as_secs() as i64;
    let message = CreateInteractionResponseMessage::new()
        .embed(build_poll_embed(poll.question(), closes_at))
        .components(build_vote_buttons(poll_id, poll.options(), false));

    if let Err(e) = reply(ctx, command, message).await {
        state.polls.discard(poll_id).await;
        return Err(e);
    }

    match command.get_response(&ctx.http).await {
        Ok(message) => {
            state
                .polls
                .attach_message(
                    poll_id,
                    PollMessage {
                        channel_id: message.channel_id.get(),
                        message_id: message.id.get(),
                    },
                )
                .await;
        }
        Err(e) => tracing::warn!(
            "Couldn't fetch message for poll {}, results won't be shown: {}",
            poll_id,
            e
        ),
    }

    if let Err(e) = schedule_poll_close(
        &state.scheduler,
        state.polls.clone(),
        ctx.http.clone(),
        poll_id,
        poll.duration(),
    )
    .await
    {
        let renderer = DiscordPollRenderer::new(ctx.http.clone());
        state.polls.close_and_render(poll_id, &renderer).await;
        return Err(e);
    }

    tracing::info!(
        "Poll {} opened by {} with {} options",
        poll_id,
        command.user.id,
        poll.options().len()
    );

    Ok(())
}

/// Applies a button press and privately tells the voter what happened.
pub async fn handle_vote(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
    poll_id: u64,
    index: usize,
) {
    let content = match state
        .polls
        .vote(poll_id, component.user.id.get(), index)
        .await
    {
        Ok(receipt) => receipt.acknowledgment(),
        Err(e) => AppError::from(e).user_message(),
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    // The vote already counts; a failed acknowledgment only loses the confirmation.
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::warn!(
            "Failed to acknowledge vote on poll {} by {}: {}",
            poll_id,
            component.user.id,
            e
        );
    }
}
