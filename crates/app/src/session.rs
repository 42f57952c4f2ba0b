//! Session Context

use std::{fmt, sync::Arc};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    api::{CommerceApi, CommerceApiError, HttpCommerceApi},
    config::{ApiConfig, ConfigError},
    domain::carts::CartManager,
};

/// Errors raised while starting a session.
#[derive(Debug, Error)]
pub enum SessionInitError {
    /// A configuration value could not be interpreted.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build commerce api client")]
    Api(#[source] CommerceApiError),
}

/// Everything one browsing session needs, built once at session start and
/// handed by reference to whatever renders or mutates the cart.
#[derive(Clone)]
pub struct Session {
    /// Commerce API client shared by every consumer.
    pub api: Arc<dyn CommerceApi>,
    /// The session's single cart state manager.
    pub cart: Arc<CartManager>,
}

impl Session {
    /// Start a session against the configured commerce API.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency or when the HTTP client cannot be built.
    pub fn start(config: &ApiConfig) -> Result<Self, SessionInitError> {
        let currency = config.currency()?;

        let api = HttpCommerceApi::new(config.http(), config.signer())
            .map_err(SessionInitError::Api)?;

        Ok(Self::with_api(Arc::new(api), currency))
    }

    /// Start a session over an existing API client.
    #[must_use]
    pub fn with_api(api: Arc<dyn CommerceApi>, currency: &'static Currency) -> Self {
        let cart = Arc::new(CartManager::new(Arc::clone(&api), currency));

        info!(currency = currency.iso_alpha_code, "session started");

        Self { api, cart }
    }

    /// End the session. Every holder of the cart manager sees it emptied.
    pub fn end(self) {
        self.cart.reset();

        info!("session ended");
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}
