//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models, keeping the
//! storage representation (snowflakes as strings) out of the command handlers.

pub mod modlog_channel;
pub mod warning;

#[cfg(test)]
mod test;
