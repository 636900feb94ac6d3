//! SeaORM entity definitions for the bot's persistent tables.

pub mod prelude;

pub mod modlog_channel;
pub mod warning;
