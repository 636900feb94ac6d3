pub use super::modlog_channel::Entity as ModlogChannel;
pub use super::warning::Entity as Warning;
