//! Discord gateway client, event handling and slash commands.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, channel and role data for `/serverinfo` and channel checks
//! - `GUILD_MESSAGES` - Message events for the channels the bot moderates
//! - `GUILD_MEMBERS` - Member cache for `/serverinfo` counts (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
