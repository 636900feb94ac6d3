//! Quipbot Test Utils
//!
//! Shared testing utilities for the bot's repository and service tests. This crate offers a
//! builder for creating test contexts backed by in-memory SQLite databases, factories that
//! insert entities with sensible defaults, and factories for Serenity model objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Errors that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Warning;
//!
//! #[tokio::test]
//! async fn test_warning_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Warning)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
