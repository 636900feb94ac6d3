use crate::{
    data::modlog_channel::ModlogChannelRepository, error::AppError,
    model::modlog::UpsertModlogChannelParam,
};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_by_guild;
mod upsert;
