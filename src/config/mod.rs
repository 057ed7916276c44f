//! Configuration handling for the preview pipeline.
//!
//! Everything is read from environment variables with development defaults.
//! `Config::from_env` validates the raw strings so that a bad deployment
//! value fails at startup instead of on the first request.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::metadata::{Source, SourcePriority};

/// Environment variable names. Public so tests and demos can refer to them.
pub const ENV_USER_AGENT: &str = "LINKCARD_USER_AGENT";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "LINKCARD_CONNECT_TIMEOUT_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "LINKCARD_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_BODY_BYTES: &str = "LINKCARD_MAX_BODY_BYTES";
pub const ENV_MAX_REDIRECTS: &str = "LINKCARD_MAX_REDIRECTS";
pub const ENV_SOURCE_PRIORITY: &str = "LINKCARD_SOURCE_PRIORITY";
pub const ENV_LOG_FORMAT: &str = "LINKCARD_LOG_FORMAT";

const DEFAULT_USER_AGENT: &str = "LinkcardBot/0.1 (+https://linkcard.example.com)";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024; // 5MB
const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Runtime configuration for the HTTP fetcher and the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    user_agent: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    max_body_bytes: u64,
    max_redirects: usize,
    source_priority: SourcePriority,
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            source_priority: SourcePriority::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let user_agent = match env::var(ENV_USER_AGENT) {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_USER_AGENT,
                    reason: "must not be empty".to_string(),
                });
            }
            Ok(value) => value,
            Err(_) => defaults.user_agent,
        };

        let connect_timeout = read_parsed::<u64>(ENV_CONNECT_TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.connect_timeout);
        let request_timeout = read_parsed::<u64>(ENV_REQUEST_TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        if request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: ENV_REQUEST_TIMEOUT_SECS,
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_body_bytes =
            read_parsed::<u64>(ENV_MAX_BODY_BYTES)?.unwrap_or(defaults.max_body_bytes);
        let max_redirects =
            read_parsed::<usize>(ENV_MAX_REDIRECTS)?.unwrap_or(defaults.max_redirects);

        let source_priority = match env::var(ENV_SOURCE_PRIORITY) {
            Ok(value) => parse_priority(&value)?,
            Err(_) => defaults.source_priority,
        };

        let log_format = read_parsed::<LogFormat>(ENV_LOG_FORMAT)?.unwrap_or(defaults.log_format);

        Ok(Self {
            user_agent,
            connect_timeout,
            request_timeout,
            max_body_bytes,
            max_redirects,
            source_priority,
            log_format,
        })
    }

    /// Value sent in the `User-Agent` header.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
    /// Upper bound for the whole request, body download included.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
    /// Order in which metadata sources override each other.
    pub fn source_priority(&self) -> &SourcePriority {
        &self.source_priority
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_source_priority(mut self, source_priority: SourcePriority) -> Self {
        self.source_priority = source_priority;
        self
    }
}

fn read_parsed<T>(field: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(field) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn parse_priority(raw: &str) -> Result<SourcePriority, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: ENV_SOURCE_PRIORITY,
        reason,
    };

    let mut order = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let source = name.parse::<Source>().map_err(invalid)?;
        if order.contains(&source) {
            return Err(invalid(format!("`{name}` listed twice")));
        }
        order.push(source);
    }

    if order.is_empty() {
        return Err(invalid("at least one source is required".to_string()));
    }
    Ok(SourcePriority::new(order))
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
