//! Storefront
//!
//! Domain types for a storefront client: typed identifiers, cart read model,
//! product references and checkout data. Nothing here performs I/O.

pub mod carts;
pub mod checkout;
pub mod products;
pub mod quantity;
pub mod uuids;

pub use carts::{Cart, CartError, CartLine, CartLineUuid, CartUuid, NewCartLine};
pub use checkout::{
    CheckoutOutcome, NewCheckout, OrderUuid, PaymentMethod, ShippingAddress, UnknownPaymentMethod,
};
pub use products::{Product, ProductUuid};
pub use quantity::{Quantity, QuantityError};
