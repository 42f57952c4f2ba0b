//! Commerce API request bodies.

use serde::Serialize;

use storefront::{
    CartUuid, NewCartLine, NewCheckout, PaymentMethod, ProductUuid, Quantity, ShippingAddress,
};

/// Add Item Request
#[derive(Debug, Serialize)]
pub(crate) struct AddItemRequest {
    pub product_uuid: ProductUuid,
    pub quantity: Quantity,
}

impl From<NewCartLine> for AddItemRequest {
    fn from(line: NewCartLine) -> Self {
        Self {
            product_uuid: line.product_uuid,
            quantity: line.quantity,
        }
    }
}

/// Update Item Request
#[derive(Debug, Serialize)]
pub(crate) struct UpdateItemRequest {
    pub quantity: Quantity,
}

/// Checkout Request
#[derive(Debug, Serialize)]
pub(crate) struct CheckoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_uuid: Option<CartUuid>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

impl From<NewCheckout> for CheckoutRequest {
    fn from(checkout: NewCheckout) -> Self {
        Self {
            cart_uuid: checkout.cart_uuid,
            shipping_address: checkout.shipping_address,
            payment_method: checkout.payment_method,
        }
    }
}
