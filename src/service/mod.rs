//! Business logic between the command handlers and the data layer or external APIs.

pub mod content;
pub mod cooldown;
pub mod dictionary;
pub mod game;
pub mod http;
pub mod moderation;
pub mod poll;
pub mod quote;
pub mod reddit;
