//! `/modlog set | disable | show`.

use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, Permissions,
};

use crate::{
    bot::command::{options::CommandOptions, reply_ephemeral, require_guild},
    error::{internal::InternalError, AppError},
    service::moderation::modlog::ModlogService,
    state::BotState,
};

pub fn register() -> CreateCommand {
    CreateCommand::new("modlog")
        .description("Configure moderation logging.")
        .dm_permission(false)
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "set",
                "Set the channel where moderation logs will be sent.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel to use for moderation logs.",
                )
                .required(true)
                .channel_types(vec![ChannelType::Text]),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "disable",
            "Disable moderation logging for this server.",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "show",
            "Show the current modlog channel.",
        ))
}

pub async fn run(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();
    let modlog = ModlogService::new(&state.db);

    let Some((subcommand, options)) = CommandOptions::new(command).subcommand() else {
        return Err(InternalError::MissingOption("subcommand".to_string()).into());
    };

    let content = match subcommand {
        "set" => {
            let channel = options.require_channel("channel")?;
            modlog.set(guild_id, channel.id.get()).await?;
            format!("📝 Modlog channel set to <#{}>.", channel.id)
        }
        "disable" => {
            if modlog.disable(guild_id).await? {
                "🛑 Modlog disabled for this server.".to_string()
            } else {
                "ℹ️ No modlog was configured for this server.".to_string()
            }
        }
        "show" => match modlog.channel_id(guild_id).await? {
            None => "ℹ️ No modlog channel is configured for this server.".to_string(),
            Some(channel_id) => match ChannelId::new(channel_id).to_channel(ctx).await {
                Ok(_) => format!("📜 Current modlog channel: <#{}>", channel_id),
                Err(e) => {
                    tracing::debug!("Modlog channel {} unreachable: {}", channel_id, e);
                    format!(
                        "⚠️ A modlog channel is configured, but I can't see it or it no longer exists (ID: `{}`).",
                        channel_id
                    )
                }
            },
        },
        other => return Err(InternalError::MissingOption(format!("modlog {}", other)).into()),
    };

    reply_ephemeral(ctx, command, content).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_three_subcommands() {
        let json = serde_json::to_value(register()).unwrap();
        let names: Vec<_> = json["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|option| option["name"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["set", "disable", "show"]);
        assert_eq!(json["options"][0]["options"][0]["name"], "channel");
    }
}
