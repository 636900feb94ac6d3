//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let warning = factory::warning::create_warning(&db, 1, 2).await?;
//!
//!     let warning = factory::warning::WarningFactory::new(&db, 1, 2)
//!         .reason("Spamming")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `warning` - Create warning entities
//! - `modlog_channel` - Create modlog channel entities

pub mod helpers;
pub mod modlog_channel;
pub mod warning;

pub use helpers::next_id;
