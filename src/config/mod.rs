use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub pagination: PaginationConfig,
    pub external: ExternalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Origin allowed by CORS; the clinic front-end.
    pub frontend_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Rows per page for every paginated listing.
    pub page_size: i64,
    /// Cap on the auxiliary patient picker list returned beside listings.
    pub picker_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    /// Base URL of the churn-scoring service; empty disables churn lookups.
    pub churn_service_url: String,
    pub churn_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("FRONTEND_URL") {
            self.server.frontend_origin = v;
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        if let Ok(v) = env::var("JWT_SECRET_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        if let Ok(v) = env::var("PAGINATION_PAGE_SIZE") {
            self.pagination.page_size = v.parse().unwrap_or(self.pagination.page_size);
        }
        if let Ok(v) = env::var("PAGINATION_PICKER_LIMIT") {
            self.pagination.picker_limit = v.parse().unwrap_or(self.pagination.picker_limit);
        }

        if let Ok(v) = env::var("CHURN_SERVICE_URL") {
            self.external.churn_service_url = v;
        }
        if let Ok(v) = env::var("CHURN_TIMEOUT_SECS") {
            self.external.churn_timeout_secs = v.parse().unwrap_or(self.external.churn_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                frontend_origin: "http://localhost:5173".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: "dev-jwt-secret-change-me".to_string(),
                jwt_expiry_hours: 24,
            },
            pagination: PaginationConfig {
                page_size: 10,
                picker_limit: 100,
            },
            external: ExternalConfig {
                churn_service_url: String::new(),
                churn_timeout_secs: 5,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                frontend_origin: "https://app.example.com".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET_KEY; token issuance refuses an empty secret.
                jwt_secret: String::new(),
                jwt_expiry_hours: 12,
            },
            pagination: PaginationConfig {
                page_size: 10,
                picker_limit: 100,
            },
            external: ExternalConfig {
                churn_service_url: String::new(),
                churn_timeout_secs: 5,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.security.jwt_secret, "dev-jwt-secret-change-me");
        assert_eq!(config.security.jwt_expiry_hours, 24);
        assert_eq!(config.pagination.page_size, 10);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.security.jwt_expiry_hours, 12);
        assert_eq!(config.pagination.picker_limit, 100);
    }
}
