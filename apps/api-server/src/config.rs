//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "sqlite")]
use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "sqlite")]
    pub database: Option<DatabaseConfig>,
    /// Insert the starter posts into an empty store.
    pub seed_posts: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "sqlite")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(1),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(3001),
            #[cfg(feature = "sqlite")]
            database,
            seed_posts: env::var("SEED_POSTS")
                .map(|v| is_enabled(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

fn is_enabled(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert!(is_enabled("true"));
        assert!(is_enabled("1"));
        assert!(!is_enabled("false"));
        assert!(!is_enabled(" OFF "));
        assert!(!is_enabled("0"));
    }
}
