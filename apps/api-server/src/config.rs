//! Application configuration loaded from environment variables.

use std::env;

use quill_core::domain::AdminAllowList;
use quill_infra::DatabaseConfig;
use quill_infra::JwtConfig;
use quill_infra::blob::LocalBlobConfig;

#[cfg(feature = "rate-limit")]
use quill_infra::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Read once here and handed to whatever resolves roles.
    pub admins: AdminAllowList,
    pub jwt: JwtConfig,
    /// `None` keeps cover images in memory.
    pub uploads: Option<LocalBlobConfig>,
    /// Base URL for blobs when no upload directory is set.
    pub asset_base_url: String,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let admins = AdminAllowList::parse(&env::var("ADMIN_EMAILS").unwrap_or_default());
        if admins.is_empty() {
            tracing::warn!("ADMIN_EMAILS is empty - nobody can moderate posts");
        } else {
            tracing::info!(admins = admins.len(), "Admin allow-list loaded");
        }

        Self {
            asset_base_url: env::var("ASSET_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}/assets")),
            host,
            port,
            database: DatabaseConfig::from_env(),
            admins,
            jwt: JwtConfig::from_env(),
            uploads: LocalBlobConfig::from_env(),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
