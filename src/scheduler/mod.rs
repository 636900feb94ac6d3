//! One-shot jobs on the shared `JobScheduler`.
//!
//! Poll closures and reminders are scheduled as one-shot jobs when the command runs. Jobs
//! live only in memory and are lost on restart.

pub mod poll_close;
pub mod reminder;
