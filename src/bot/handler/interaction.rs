//! Interaction routing and error replies.
//!
//! Every command handler returns `Result<(), AppError>`; this is the only place an error
//! becomes a message to the member.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, Interaction,
};

use crate::{
    bot::command,
    error::AppError,
    state::BotState,
    util::parse::parse_poll_custom_id,
};

pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            tracing::debug!(
                "/{} invoked by {} in channel {}",
                command.data.name,
                command.user.id,
                command.channel_id
            );

            if let Err(e) = command::dispatch(state, &ctx, &command).await {
                reply_with_error(&ctx, &command, &e).await;
            }
        }
        Interaction::Component(component) => {
            match parse_poll_custom_id(&component.data.custom_id) {
                Some((poll_id, index)) => {
                    command::poll::handle_vote(state, &ctx, &component, poll_id, index).await;
                }
                None => tracing::debug!(
                    "Ignoring component with unknown custom id {}",
                    component.data.custom_id
                ),
            }
        }
        _ => {}
    }
}

/// Tells the member their command failed.
///
/// Commands that already acknowledged the interaction (deferred or replied) get their
/// original response replaced instead.
async fn reply_with_error(ctx: &Context, command: &CommandInteraction, err: &AppError) {
    let message = err.user_message();

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(&message)
            .ephemeral(true),
    );
    if command.create_response(&ctx.http, response).await.is_ok() {
        return;
    }

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(message))
        .await
    {
        tracing::warn!(
            "Failed to report error for /{} to {}: {}",
            command.data.name,
            command.user.id,
            e
        );
    }
}
