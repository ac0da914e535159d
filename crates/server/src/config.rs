//! Server configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names, in one place so error messages and docs agree.
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MODEL_PATH: &str = "MODEL_PATH";
pub const ENV_CORS_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
pub const ENV_PREDICT_TIMEOUT_MS: &str = "PREDICT_TIMEOUT_MS";

/// Configuration error naming the offending variable.
#[derive(Debug, Error)]
#[error("Invalid {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

/// Origins allowed to make cross-origin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin.
    Any,
    /// An explicit origin list.
    List(Vec<String>),
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub cors_origins: CorsOrigins,
    pub predict_timeout: Duration,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a lookup function (tests pin values here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(ENV_HOST).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup(ENV_PORT) {
            None => 8080,
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError {
                var: ENV_PORT,
                reason: format!("'{raw}' is not a port number"),
            })?,
        };

        // The artifact location is deployment configuration, never a
        // developer's local path baked into the binary.
        let model_path = lookup(ENV_MODEL_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("model/price_model.json"));

        let cors_origins = match lookup(ENV_CORS_ORIGINS) {
            None => CorsOrigins::Any,
            Some(raw) => parse_origins(&raw),
        };

        let predict_timeout = match lookup(ENV_PREDICT_TIMEOUT_MS) {
            None => Duration::from_millis(1000),
            Some(raw) => {
                let millis = raw.parse::<u64>().map_err(|_| ConfigError {
                    var: ENV_PREDICT_TIMEOUT_MS,
                    reason: format!("'{raw}' is not a number of milliseconds"),
                })?;
                if millis == 0 {
                    return Err(ConfigError {
                        var: ENV_PREDICT_TIMEOUT_MS,
                        reason: "timeout must be positive".to_string(),
                    });
                }
                Duration::from_millis(millis)
            }
        };

        Ok(Self {
            host,
            port,
            model_path,
            cors_origins,
            predict_timeout,
        })
    }
}

fn parse_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
