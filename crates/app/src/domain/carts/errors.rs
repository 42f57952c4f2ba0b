//! Cart manager errors.

use thiserror::Error;

use storefront::{CartLineUuid, QuantityError};

use crate::api::CommerceApiError;

/// Errors returned by cart manager operations.
#[derive(Debug, Error)]
pub enum CartManagerError {
    /// The commerce API refused or failed the request. Local state is unchanged.
    #[error("cart request failed")]
    Api(#[from] CommerceApiError),

    /// The mutation was applied remotely but the cart could not be re-fetched,
    /// so the displayed cart may be behind. Do not retry the mutation.
    #[error("cart was updated but could not be reloaded")]
    RefreshAfterMutation(#[source] CommerceApiError),

    /// The line is not part of the cart currently held.
    #[error("cart line {0} not found")]
    UnknownLine(CartLineUuid),

    /// The requested quantity cannot be represented.
    #[error("invalid quantity")]
    InvalidQuantity(#[from] QuantityError),
}

impl CartManagerError {
    /// The underlying API failure, if any.
    pub fn api_error(&self) -> Option<&CommerceApiError> {
        match self {
            Self::Api(error) | Self::RefreshAfterMutation(error) => Some(error),
            Self::UnknownLine(_) | Self::InvalidQuantity(_) => None,
        }
    }
}
