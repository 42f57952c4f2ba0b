//! Cart View

use storefront::Cart;

/// What the presentation layer sees of the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    /// Last applied server state; `None` until the first load of a session.
    pub cart: Option<Cart>,

    /// Whether any cart operation is in flight.
    pub busy: bool,

    /// Message of the last failed operation, cleared when the next one begins.
    pub last_error: Option<String>,

    /// Ticket of the fetch that produced `cart`.
    pub version: u64,
}

impl CartView {
    /// Whether a cart has been loaded in this session.
    pub fn is_loaded(&self) -> bool {
        self.cart.is_some()
    }

    /// Total units in the held cart, zero when nothing is loaded.
    pub fn item_count(&self) -> u64 {
        self.cart.as_ref().map_or(0, Cart::item_count)
    }
}
