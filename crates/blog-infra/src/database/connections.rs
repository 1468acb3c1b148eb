use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SeaORM connection URL, e.g. `sqlite://data/blog.db?mode=rwc`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection handle for the posts database.
pub struct BlogDatabase {
    pub conn: DbConn,
}

impl BlogDatabase {
    /// Open the connection pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Opening posts database...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Posts database connected (pool: {})",
            config.max_connections
        );

        Ok(Self { conn })
    }

    /// Close the pool, waiting for in-flight queries.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
