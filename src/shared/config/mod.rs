//! Application configuration module
//!
//! Provides the explicitly constructed configuration that is passed into every
//! component at startup. Nothing in the service reads process-wide state after
//! [`AppConfig::load`] returns.
//!
//! # Sources
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file named by `SWAPP_CONFIG`
//! 3. Environment variables (a `.env` file is loaded by the binary first)
//!
//! | Variable | Field |
//! |---|---|
//! | `SERVER_HOST`, `SERVER_PORT`, `API_PREFIX` | `server.*` |
//! | `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` | `database.*` |
//! | `JWT_SECRET`, `ACCESS_TOKEN_TTL_SECS`, `REFRESH_TOKEN_TTL_SECS`, `BCRYPT_COST` | `auth.*` |
//! | `MAIL_TRANSPORT`, `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_STARTTLS`, `MAIL_FROM` | `mail.*` |
//! | `NOTIFICATION_WORKERS`, `NOTIFICATION_QUEUE_CAPACITY`, `NOTIFICATION_MAX_ATTEMPTS`, `NOTIFICATION_RETRY_BASE_DELAY_MS`, `NOTIFICATION_RETRY_MAX_DELAY_MS` | `notifications.*` |
//! | `MAX_IMAGE_BYTES`, `MAX_REQUEST_BYTES` | `uploads.*` |

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Secret string whose `Debug` output is redacted
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub notifications: NotificationConfig,
    pub uploads: UploadConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix under which the user endpoints are mounted
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_prefix: "/api/v1/users".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://swapp_auth.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Token signing and password hashing settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Secret,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::default(),
            access_token_ttl_secs: 5 * 60,
            refresh_token_ttl_secs: 24 * 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Longest accepted token lifetime (ten years)
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

impl AuthConfig {
    pub fn access_token_ttl(&self) -> chrono::Duration {
        ttl_from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        ttl_from_secs(self.refresh_token_ttl_secs)
    }
}

/// Out-of-range values saturate at `Duration::MAX`
fn ttl_from_secs(secs: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX)
}

/// Outbound mail transport selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransportKind {
    /// Deliver through an SMTP relay
    Smtp,
    /// Log rendered messages instead of sending them
    #[default]
    Log,
}

impl FromStr for MailTransportKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(Self::Smtp),
            "log" => Ok(Self::Log),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub transport: MailTransportKind,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<Secret>,
    pub starttls: bool,
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransportKind::Log,
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            starttls: true,
            from_address: "SwApp <no-reply@swapp.com>".to_string(),
        }
    }
}

/// Background notification worker pool settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub workers: usize,
    pub queue_capacity: usize,
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            queue_capacity: 256,
            max_attempts: 3,
            retry_base_delay_ms: 500,
            retry_max_delay_ms: 30_000,
        }
    }
}

impl NotificationConfig {
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn retry_max_delay(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }
}

/// Request body limits
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted profile picture
    pub max_image_bytes: usize,
    /// Largest accepted request body (multipart envelope included)
    pub max_request_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 2 * 1024 * 1024,
            max_request_bytes: 3 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from defaults, `SWAPP_CONFIG` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("SWAPP_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Overlay values found through `lookup` (normally the process environment)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT") {
            self.server.port = parse_var("SERVER_PORT", v)?;
        }
        if let Some(v) = lookup("API_PREFIX") {
            self.server.api_prefix = v;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = Secret::new(v);
        }
        if let Some(v) = lookup("ACCESS_TOKEN_TTL_SECS") {
            self.auth.access_token_ttl_secs = parse_var("ACCESS_TOKEN_TTL_SECS", v)?;
        }
        if let Some(v) = lookup("REFRESH_TOKEN_TTL_SECS") {
            self.auth.refresh_token_ttl_secs = parse_var("REFRESH_TOKEN_TTL_SECS", v)?;
        }
        if let Some(v) = lookup("BCRYPT_COST") {
            self.auth.bcrypt_cost = parse_var("BCRYPT_COST", v)?;
        }
        if let Some(v) = lookup("MAIL_TRANSPORT") {
            self.mail.transport = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "MAIL_TRANSPORT", value: v })?;
        }
        if let Some(v) = lookup("SMTP_HOST") {
            self.mail.smtp_host = v;
        }
        if let Some(v) = lookup("SMTP_PORT") {
            self.mail.smtp_port = parse_var("SMTP_PORT", v)?;
        }
        if let Some(v) = lookup("SMTP_USERNAME") {
            self.mail.smtp_username = Some(v);
        }
        if let Some(v) = lookup("SMTP_PASSWORD") {
            self.mail.smtp_password = Some(Secret::new(v));
        }
        if let Some(v) = lookup("SMTP_STARTTLS") {
            self.mail.starttls = parse_var("SMTP_STARTTLS", v)?;
        }
        if let Some(v) = lookup("MAIL_FROM") {
            self.mail.from_address = v;
        }
        if let Some(v) = lookup("NOTIFICATION_WORKERS") {
            self.notifications.workers = parse_var("NOTIFICATION_WORKERS", v)?;
        }
        if let Some(v) = lookup("NOTIFICATION_QUEUE_CAPACITY") {
            self.notifications.queue_capacity = parse_var("NOTIFICATION_QUEUE_CAPACITY", v)?;
        }
        if let Some(v) = lookup("NOTIFICATION_MAX_ATTEMPTS") {
            self.notifications.max_attempts = parse_var("NOTIFICATION_MAX_ATTEMPTS", v)?;
        }
        if let Some(v) = lookup("NOTIFICATION_RETRY_BASE_DELAY_MS") {
            self.notifications.retry_base_delay_ms =
                parse_var("NOTIFICATION_RETRY_BASE_DELAY_MS", v)?;
        }
        if let Some(v) = lookup("NOTIFICATION_RETRY_MAX_DELAY_MS") {
            self.notifications.retry_max_delay_ms =
                parse_var("NOTIFICATION_RETRY_MAX_DELAY_MS", v)?;
        }
        if let Some(v) = lookup("MAX_IMAGE_BYTES") {
            self.uploads.max_image_bytes = parse_var("MAX_IMAGE_BYTES", v)?;
        }
        if let Some(v) = lookup("MAX_REQUEST_BYTES") {
            self.uploads.max_request_bytes = parse_var("MAX_REQUEST_BYTES", v)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Invalid("bcrypt cost must be between 4 and 31".into()));
        }
        if self.auth.access_token_ttl_secs == 0 || self.auth.refresh_token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("token lifetimes must be positive".into()));
        }
        if self.auth.access_token_ttl_secs > MAX_TOKEN_TTL_SECS
            || self.auth.refresh_token_ttl_secs > MAX_TOKEN_TTL_SECS
        {
            return Err(ConfigError::Invalid(format!(
                "token lifetimes must not exceed {} seconds",
                MAX_TOKEN_TTL_SECS
            )));
        }
        if !self.server.api_prefix.starts_with('/')
            || self.server.api_prefix.trim_end_matches('/').is_empty()
        {
            return Err(ConfigError::Invalid(format!(
                "api prefix must start with '/' and name a path: {:?}",
                self.server.api_prefix
            )));
        }
        if self.notifications.workers == 0 || self.notifications.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "notification workers and queue capacity must be positive".into(),
            ));
        }
        if self.notifications.max_attempts == 0 {
            return Err(ConfigError::Invalid("notification attempts must be positive".into()));
        }
        if self.uploads.max_image_bytes > self.uploads.max_request_bytes {
            return Err(ConfigError::Invalid(
                "max image size cannot exceed the request body limit".into(),
            ));
        }
        if self.mail.transport == MailTransportKind::Smtp && self.mail.smtp_host.trim().is_empty() {
            return Err(ConfigError::MissingValue("SMTP_HOST"));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database.url = url.into();
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.config.database.max_connections = max;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.auth.jwt_secret = Secret::new(secret);
        self
    }

    pub fn token_ttls(mut self, access_secs: u64, refresh_secs: u64) -> Self {
        self.config.auth.access_token_ttl_secs = access_secs;
        self.config.auth.refresh_token_ttl_secs = refresh_secs;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.auth.bcrypt_cost = cost;
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.server.api_prefix = prefix.into();
        self
    }

    /// Attempts and backoff for notification delivery
    pub fn notification_retry(mut self, max_attempts: u32, base_delay_ms: u64) -> Self {
        self.config.notifications.max_attempts = max_attempts;
        self.config.notifications.retry_base_delay_ms = base_delay_ms;
        self
    }

    pub fn max_image_bytes(mut self, bytes: usize) -> Self {
        self.config.uploads.max_image_bytes = bytes;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file: {0}")]
    Toml(#[from] toml::de::Error),
}
