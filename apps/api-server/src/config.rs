//! Application configuration loaded from environment variables.

use std::env;

use folio_infra::database::DatabaseConfig;
use folio_infra::{AccessConfig, GitHubConfig};

/// Configuration errors raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
    pub media: Option<MediaConfig>,
}

/// Authentication strategy selected by `AUTH_MODE`.
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// GitHub OAuth login issuing a signed session cookie.
    Session {
        secret: String,
        admin_email: String,
        github: GitHubConfig,
    },
    /// Identity supplied by the upstream access proxy.
    Access(AccessConfig),
}

/// S3-compatible bucket settings.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = match optional("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS", 10)?,
                min_connections: parsed("DB_MIN_CONNECTIONS", 1)?,
            }),
            None => None,
        };

        let media = optional("MEDIA_BUCKET").map(|bucket| MediaConfig {
            bucket,
            endpoint: optional("S3_ENDPOINT"),
            region: optional("S3_REGION").unwrap_or_else(|| "auto".to_string()),
            access_key_id: optional("S3_ACCESS_KEY_ID"),
            secret_access_key: optional("S3_SECRET_ACCESS_KEY"),
        });

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080)?,
            database,
            auth: AuthConfig::from_env()?,
            media,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mode = optional("AUTH_MODE").unwrap_or_else(|| "session".to_string());

        match mode.to_lowercase().as_str() {
            "session" => Ok(AuthConfig::Session {
                secret: required("SESSION_SECRET")?,
                admin_email: required("ADMIN_EMAIL")?,
                github: GitHubConfig {
                    client_id: required("GITHUB_CLIENT_ID")?,
                    client_secret: required("GITHUB_CLIENT_SECRET")?,
                },
            }),
            "access" => Ok(AuthConfig::Access(AccessConfig {
                team_domain: required("ACCESS_TEAM_DOMAIN")?,
                audience: required("ACCESS_AUD")?,
            })),
            _ => Err(ConfigError::Invalid {
                name: "AUTH_MODE",
                value: mode,
            }),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            AuthConfig::Session { .. } => "session",
            AuthConfig::Access(_) => "access",
        }
    }
}
