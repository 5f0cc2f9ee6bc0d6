use std::path::PathBuf;

use axum::http::HeaderValue;
use mythos_core::image::DEFAULT_MAX_IMAGE_SIZE_MB;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded image files are written to.
    pub image_storage_dir: PathBuf,
    /// Upload size cap in megabytes (default: `10`).
    pub max_image_size_mb: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `IMAGE_STORAGE_DIR`    | `./storage/images`         |
    /// | `MAX_IMAGE_SIZE_MB`    | `10`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = parse_env("PORT", "3000")?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", "30")?;
        let image_storage_dir = PathBuf::from(env_or("IMAGE_STORAGE_DIR", "./storage/images"));
        let max_image_size_mb: u64 =
            parse_env("MAX_IMAGE_SIZE_MB", &DEFAULT_MAX_IMAGE_SIZE_MB.to_string())?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            image_storage_dir,
            max_image_size_mb,
        })
    }

    /// Largest request body accepted, leaving room for multipart framing.
    pub fn max_body_bytes(&self) -> usize {
        (self.max_image_size_mb as usize + 1) * 1024 * 1024
    }
}

/// The `DATABASE_URL` connection string.
pub fn database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing {
        name: "DATABASE_URL",
    })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env_or(name, default);
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_to_default() {
        let value: u64 = parse_env("MYTHOS_TEST_UNSET_VARIABLE", "42").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn parse_env_reports_bad_default() {
        let err = parse_env::<u16>("MYTHOS_TEST_UNSET_VARIABLE", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("MYTHOS_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn body_limit_exceeds_image_cap() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            image_storage_dir: PathBuf::from("/tmp"),
            max_image_size_mb: 10,
        };
        assert!(config.max_body_bytes() > 10 * 1024 * 1024);
    }
}
