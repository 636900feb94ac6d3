//! Bot state shared across all interaction handlers.
//!
//! `BotState` is initialized once during startup, owned by the event handler, and cloned
//! into background jobs. Every field is cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `reqwest::Client` uses an `Arc` internally
//! - `PollService` and `CooldownService` share their maps through `Arc`
//! - `JobScheduler` is a handle to the running scheduler

use std::time::Instant;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::JobScheduler;

use crate::service::{cooldown::CooldownService, poll::PollService};

#[derive(Clone)]
pub struct BotState {
    /// Database connection pool for warnings and modlog configuration.
    pub db: DatabaseConnection,

    /// HTTP client for third-party content APIs (Reddit, dog, quote, dictionary).
    pub http_client: reqwest::Client,

    /// Registry of open polls.
    pub polls: PollService,

    /// Per-user command cooldowns.
    pub cooldowns: CooldownService,

    /// Scheduler running poll closures and reminders.
    pub scheduler: JobScheduler,

    /// When the process started; read by `/stats` for uptime.
    pub started_at: Instant,

    /// Guild slash commands are registered to instead of globally.
    pub dev_guild_id: Option<u64>,
}

impl BotState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        scheduler: JobScheduler,
        dev_guild_id: Option<u64>,
    ) -> Self {
        Self {
            db,
            http_client,
            polls: PollService::new(),
            cooldowns: CooldownService::new(),
            scheduler,
            started_at: Instant::now(),
            dev_guild_id,
        }
    }
}
