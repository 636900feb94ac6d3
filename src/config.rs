use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://quipbot.db?mode=rwc";

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,

    /// Guild to register slash commands in instead of globally.
    ///
    /// Guild commands update instantly, which is handy while developing; global
    /// commands can take up to an hour to propagate.
    pub dev_guild_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            dev_guild_id: parse_optional_id("DISCORD_DEV_GUILD_ID")?,
        })
    }
}

fn parse_optional_id(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}
