//! Commerce API service boundary.

use async_trait::async_trait;
use mockall::automock;

use storefront::{
    Cart, CartLineUuid, CheckoutOutcome, NewCartLine, NewCheckout, Product, ProductUuid, Quantity,
};

use crate::api::CommerceApiError;

/// Remote commerce backend as seen by one storefront session.
#[automock]
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Retrieve the session's cart. Fails with [`CommerceApiError::NotFound`]
    /// when the session has no cart yet.
    async fn get_cart(&self) -> Result<Cart, CommerceApiError>;

    /// Add a product to the session's cart, creating the cart if needed.
    async fn add_item(&self, line: NewCartLine) -> Result<(), CommerceApiError>;

    /// Replace the quantity of an existing line.
    async fn update_item(
        &self,
        line: CartLineUuid,
        quantity: Quantity,
    ) -> Result<(), CommerceApiError>;

    /// Remove a line from the cart.
    async fn remove_item(&self, line: CartLineUuid) -> Result<(), CommerceApiError>;

    /// Remove every line from the cart.
    async fn clear_cart(&self) -> Result<(), CommerceApiError>;

    /// Place an order for the session's cart.
    async fn checkout(&self, checkout: NewCheckout) -> Result<CheckoutOutcome, CommerceApiError>;

    /// List the product catalog.
    async fn list_products(&self) -> Result<Vec<Product>, CommerceApiError>;

    /// Retrieve a single product.
    async fn get_product(&self, uuid: ProductUuid) -> Result<Product, CommerceApiError>;
}
