//! "Greet" user context-menu command.

use serenity::all::{
    CommandInteraction, CommandType, Context, CreateAllowedMentions, CreateCommand,
    CreateInteractionResponseMessage, ResolvedTarget,
};

use crate::{
    bot::command::reply,
    error::{internal::InternalError, AppError},
};

pub const NAME: &str = "Greet";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).kind(CommandType::User)
}

pub async fn run(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let Some(ResolvedTarget::User(user, _)) = command.data.target() else {
        return Err(InternalError::MissingOption("target user".to_string()).into());
    };

    reply(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .content(greeting(user.id.get()))
            .allowed_mentions(CreateAllowedMentions::new().users(vec![user.id])),
    )
    .await
}

fn greeting(user_id: u64) -> String {
    format!("Hey <@{}>!", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_by_mention() {
        assert_eq!(greeting(42), "Hey <@42>!");
    }

    #[test]
    fn registers_as_user_context_menu() {
        let json = serde_json::to_value(register()).unwrap();

        assert_eq!(json["name"], "Greet");
        assert_eq!(json["type"], 2);
    }
}
