//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "postgres")]
use gambit_infra::DatabaseConfig;
#[cfg(feature = "supabase")]
use gambit_infra::SupabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "supabase")]
    pub storage: Option<SupabaseConfig>,
    /// Public base URL of post pages; rendered images link back to it.
    pub post_url_base: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database,
            #[cfg(feature = "supabase")]
            storage: SupabaseConfig::from_env(),
            post_url_base: env::var("POST_URL_BASE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}
