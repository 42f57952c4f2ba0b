//! Commerce API response bodies.

use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;

use storefront::{
    Cart, CartLine, CartLineUuid, CartUuid, CheckoutOutcome, OrderUuid, Product, ProductUuid,
    Quantity,
};

use crate::api::CommerceApiError;

fn find_currency(code: &str) -> Result<&'static Currency, CommerceApiError> {
    Currency::find(code)
        .ok_or_else(|| CommerceApiError::InvalidResponse(format!("unknown currency {code}")))
}

/// Cart Response
#[derive(Debug, Deserialize)]
pub(crate) struct CartResponse {
    pub uuid: CartUuid,
    pub currency: String,
    #[serde(default)]
    pub items: Vec<CartItemResponse>,
}

/// Cart Item Response
#[derive(Debug, Deserialize)]
pub(crate) struct CartItemResponse {
    pub uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub quantity: Quantity,
    pub price: i64,
}

impl TryFrom<CartResponse> for Cart {
    type Error = CommerceApiError;

    fn try_from(response: CartResponse) -> Result<Self, Self::Error> {
        let currency = find_currency(&response.currency)?;

        let lines = response.items.into_iter().map(|item| CartLine {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            quantity: item.quantity,
            unit_price: Money::from_minor(item.price, currency),
        });

        Cart::with_lines(response.uuid, lines, currency)
            .map_err(|error| CommerceApiError::InvalidResponse(error.to_string()))
    }
}

/// Product Response
#[derive(Debug, Deserialize)]
pub(crate) struct ProductResponse {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: i64,
    pub currency: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

impl TryFrom<ProductResponse> for Product {
    type Error = CommerceApiError;

    fn try_from(response: ProductResponse) -> Result<Self, Self::Error> {
        Ok(Product {
            uuid: response.uuid,
            name: response.name,
            price: Money::from_minor(response.price, find_currency(&response.currency)?),
            category: response.category,
            available: response.available,
        })
    }
}

/// Checkout Response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CheckoutResponse {
    #[serde(default)]
    pub order_uuid: Option<OrderUuid>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl From<CheckoutResponse> for CheckoutOutcome {
    fn from(response: CheckoutResponse) -> Self {
        Self {
            order_uuid: response.order_uuid,
            redirect_url: response.redirect_url,
        }
    }
}
