//! Application configuration
//!
//! Layered loading: built-in defaults, then an optional `crewflow.toml`
//! next to the binary, then `CREWFLOW__`-prefixed environment variables
//! (for example `CREWFLOW__DATABASE__URL`, `CREWFLOW__GITHUB__TOKEN`).
//! Plain `DATABASE_URL` and `GITHUB_TOKEN` are honored as fallbacks for
//! the two values people set most often.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseSettings,

    /// GitHub import configuration
    pub github: GithubSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database connection URL; required for anything that touches storage
    pub url: Option<String>,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GithubSettings {
    /// Organization whose repositories are imported
    pub organization: String,
    /// GitHub API base URL
    pub api_url: String,
    /// Personal access token; unauthenticated requests work but are
    /// rate-limited to 60/hour
    pub token: Option<String>,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            organization: "one-project-one-month".to_string(),
            api_url: "https://api.github.com".to_string(),
            token: None,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("no database URL configured (set DATABASE_URL or CREWFLOW__DATABASE__URL)")]
    MissingDatabaseUrl,
}

impl AppConfig {
    /// Load configuration from `crewflow.toml` (optional) and the
    /// environment
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("crewflow").required(false))
            .add_source(
                config::Environment::with_prefix("CREWFLOW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: AppConfig = settings.try_deserialize()?;

        if app.database.url.is_none() {
            app.database.url = std::env::var("DATABASE_URL").ok();
        }
        if app.github.token.is_none() {
            app.github.token = std::env::var("GITHUB_TOKEN").ok();
        }

        Ok(app)
    }

    /// The configured database URL, or an error if none is set
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.github.organization, "one-project-one-month");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_database_url_missing() {
        let config = AppConfig::default();
        assert!(matches!(
            config.database_url(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn test_database_url_present() {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://localhost/crewflow".to_string());
        assert_eq!(
            config.database_url().unwrap(),
            "postgres://localhost/crewflow"
        );
    }
}
