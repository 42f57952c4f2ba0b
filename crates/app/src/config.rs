//! Client configuration

use std::{sync::Arc, time::Duration};

use clap::{Args, ValueEnum};
use rusty_money::{Findable, iso::Currency};
use thiserror::Error;

use crate::api::{BearerToken, HttpCommerceApiConfig, RequestSigner, Unsigned};

/// Errors raised while interpreting configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured currency is not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Storefront client configuration.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Commerce API connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Commerce API connection settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Commerce API base address
    #[arg(long, env = "COMMERCE_API_URL")]
    pub api_url: String,

    /// Bearer token of the signed-in customer; anonymous when omitted
    #[arg(long, env = "COMMERCE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds; the transport default applies when omitted
    #[arg(long, env = "COMMERCE_API_TIMEOUT_SECONDS")]
    pub api_timeout_seconds: Option<u64>,

    /// ISO 4217 currency used for the empty cart
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "GBP")]
    pub currency: String,
}

impl ApiConfig {
    /// HTTP client settings.
    #[must_use]
    pub fn http(&self) -> HttpCommerceApiConfig {
        HttpCommerceApiConfig {
            base_url: self.api_url.clone(),
            timeout: self.api_timeout_seconds.map(Duration::from_secs),
        }
    }

    /// Signer for the configured credential.
    #[must_use]
    pub fn signer(&self) -> Arc<dyn RequestSigner> {
        match self.api_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Arc::new(BearerToken::new(token)),
            Some(_) | None => Arc::new(Unsigned),
        }
    }

    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for codes outside ISO 4217.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        let code = self.currency.trim().to_ascii_uppercase();

        Currency::find(&code).ok_or(ConfigError::UnknownCurrency(code))
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
