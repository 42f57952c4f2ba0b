//! Checkout

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{carts::CartUuid, uuids::TypedUuid};

/// Marker for order identifiers. Orders are owned by the commerce backend.
#[derive(Debug)]
pub enum Order {}

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Where the order should be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name
    pub name: String,

    /// First address line
    pub line1: String,

    /// Optional second address line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    /// Town or city
    pub city: String,

    /// Postal code
    pub postcode: String,

    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

/// How the customer intends to pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment, taken by the payment provider.
    Card,

    /// `PayPal` redirect flow.
    #[serde(rename = "paypal")]
    PayPal,

    /// Pay the courier on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Wire name of the payment method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayPal => "paypal",
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unknown payment method name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::PayPal),
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Checkout request for the session's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckout {
    /// Cart being checked out, when one has been loaded.
    pub cart_uuid: Option<CartUuid>,

    /// Delivery address
    pub shipping_address: ShippingAddress,

    /// Chosen payment method
    pub payment_method: PaymentMethod,
}

/// What the backend returned for an accepted checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Order created for the checked-out cart, when reported.
    pub order_uuid: Option<OrderUuid>,

    /// Where to send the customer next (e.g. a payment page), when required.
    pub redirect_url: Option<String>,
}
