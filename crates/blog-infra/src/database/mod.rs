//! Post storage: SeaORM adapters and the in-memory fallback.

mod memory;

#[cfg(feature = "sqlite")]
mod connections;
#[cfg(feature = "sqlite")]
pub mod entity;
#[cfg(feature = "sqlite")]
mod sql_base;
#[cfg(feature = "sqlite")]
mod sql_repo;

pub use memory::InMemoryPostRepository;

#[cfg(feature = "sqlite")]
pub use connections::{BlogDatabase, DatabaseConfig};
#[cfg(feature = "sqlite")]
pub use sql_base::SqlBaseRepository;
#[cfg(feature = "sqlite")]
pub use sql_repo::SqlPostRepository;
