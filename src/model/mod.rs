//! Domain models and third-party API payloads.

pub mod content;
pub mod modlog;
pub mod poll;
pub mod reddit;
pub mod warning;
