use crate::{
    data::warning::WarningRepository, error::AppError, model::warning::CreateWarningParam,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod count_by_user;
mod create;
mod delete_by_user;
mod get_by_user;
