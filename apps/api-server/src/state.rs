//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

#[cfg(feature = "sqlite")]
use blog_infra::{BlogDatabase, DatabaseConfig, SqlPostRepository};
#[cfg(feature = "sqlite")]
use migration::{Migrator, MigratorTrait};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "sqlite")]
        let state = match &config.database {
            Some(db_config) => match Self::open_database(db_config).await {
                Ok(repo) => Self::with_repository(repo),
                Err(e) => {
                    tracing::error!(
                        "Failed to open database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "sqlite"))]
        let state = {
            tracing::info!("Running without sqlite feature - using in-memory repository");
            Self::in_memory()
        };

        if config.seed_posts {
            if let Err(e) = state.posts.seed_if_empty().await {
                tracing::error!(error = %e, "Failed to seed posts");
            }
        }

        tracing::info!("Application state initialized");
        state
    }

    /// Connect, bring the schema up to date and wrap the pool in a repository.
    #[cfg(feature = "sqlite")]
    async fn open_database(
        config: &DatabaseConfig,
    ) -> Result<Arc<dyn PostRepository>, sea_orm::DbErr> {
        let db = BlogDatabase::connect(config).await?;
        Migrator::up(&db.conn, None).await?;
        tracing::info!("Database migrations applied");

        Ok(Arc::new(SqlPostRepository::new(db.conn)))
    }
}
