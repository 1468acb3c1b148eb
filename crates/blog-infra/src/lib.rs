//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `sqlite` (default) - SQLite storage via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::InMemoryPostRepository;

#[cfg(feature = "sqlite")]
pub use database::{BlogDatabase, DatabaseConfig, SqlPostRepository};
