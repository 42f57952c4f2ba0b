//! Products

use rusty_money::{Money, iso::Currency};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// A read-only catalog entry.
///
/// Carts hold a [`ProductUuid`] and a price snapshot, never the product itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub uuid: ProductUuid,

    /// Display name
    pub name: String,

    /// Current catalog price
    pub price: Money<'static, Currency>,

    /// Catalog category
    pub category: String,

    /// Whether the product can currently be added to a cart
    pub available: bool,
}
