mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use crate::{config::Config, error::AppError, state::BotState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_logging();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let scheduler = startup::start_scheduler().await?;

    let state = BotState::new(db, http_client, scheduler, config.dev_guild_id);

    let client = bot::start::init_bot(&config, state).await?;
    bot::start::start_bot(client).await?;

    Ok(())
}
