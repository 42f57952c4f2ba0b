//! Test Helpers

use std::sync::Arc;

use rusty_money::{Money, iso};

use storefront::{
    Cart, CartError, CartLine, CartLineUuid, CartUuid, ProductUuid, Quantity, QuantityError,
    ShippingAddress,
};

use crate::{
    api::{CommerceApiError, MockCommerceApi},
    domain::carts::CartManager,
};

pub(crate) fn line(price: i64, quantity: u32) -> Result<CartLine, QuantityError> {
    Ok(CartLine {
        uuid: CartLineUuid::now_v7(),
        product_uuid: ProductUuid::now_v7(),
        quantity: Quantity::new(quantity)?,
        unit_price: Money::from_minor(price, iso::GBP),
    })
}

pub(crate) fn cart_with(lines: impl IntoIterator<Item = CartLine>) -> Result<Cart, CartError> {
    Cart::with_lines(CartUuid::now_v7(), lines, iso::GBP)
}

pub(crate) fn manager(api: MockCommerceApi) -> CartManager {
    CartManager::new(Arc::new(api), iso::GBP)
}

pub(crate) fn server_error() -> CommerceApiError {
    CommerceApiError::Server {
        status: 500,
        message: "internal server error".to_string(),
    }
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        name: "Grace Hopper".to_string(),
        line1: "1 Harbour Street".to_string(),
        line2: None,
        city: "Arlington".to_string(),
        postcode: "22201".to_string(),
        country: "US".to_string(),
    }
}
