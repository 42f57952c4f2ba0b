//! Carts

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{products::ProductUuid, quantity::Quantity, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLine>;

/// Errors related to cart construction or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A line's price currency differs from the cart currency (line, line currency, cart currency).
    #[error("line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(CartLineUuid, &'static str, &'static str),

    /// Two lines share an identifier.
    #[error("line {0} appears more than once")]
    DuplicateLine(CartLineUuid),

    /// A line or cart total does not fit in minor units.
    #[error("cart total overflowed")]
    Overflow,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One product-quantity-price entry within a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Line identifier, unique within the cart
    pub uuid: CartLineUuid,

    /// The product this line refers to
    pub product_uuid: ProductUuid,

    /// Units on this line
    pub quantity: Quantity,

    /// Unit price captured when the product was added
    pub unit_price: Money<'static, Currency>,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the product does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity.get()))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// New Cart Line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    /// Product to add
    pub product_uuid: ProductUuid,

    /// Units to add
    pub quantity: Quantity,
}

/// Read model of the session's cart, as last reported by the commerce backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    uuid: Option<CartUuid>,
    lines: FxHashMap<CartLineUuid, CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// The explicit empty cart, used when the backend holds no cart for the session.
    pub fn empty(currency: &'static Currency) -> Self {
        Self {
            uuid: None,
            lines: FxHashMap::default(),
            currency,
        }
    }

    /// Build a cart from its lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line is priced in another currency or two
    /// lines share an identifier.
    pub fn with_lines(
        uuid: CartUuid,
        lines: impl IntoIterator<Item = CartLine>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut by_uuid = FxHashMap::default();

        for line in lines {
            let line_currency = line.unit_price.currency();

            if line_currency != currency {
                return Err(CartError::CurrencyMismatch(
                    line.uuid,
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            match by_uuid.entry(line.uuid) {
                Entry::Occupied(_) => return Err(CartError::DuplicateLine(line.uuid)),
                Entry::Vacant(slot) => {
                    slot.insert(line);
                }
            }
        }

        Ok(Self {
            uuid: Some(uuid),
            lines: by_uuid,
            currency,
        })
    }

    /// Backend identifier, absent for the empty cart.
    pub fn uuid(&self) -> Option<CartUuid> {
        self.uuid
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Look up a line by identifier.
    pub fn line(&self, uuid: CartLineUuid) -> Option<&CartLine> {
        self.lines.get(&uuid)
    }

    /// Lines in no particular order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Lines ordered by identifier, for stable display.
    pub fn lines_sorted(&self) -> Vec<&CartLine> {
        let mut lines: Vec<_> = self.lines.values().collect();

        lines.sort_by_key(|line| line.uuid);

        lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .values()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of every line's price multiplied by its quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] on minor unit overflow.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, CartError> {
        self.lines
            .values()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(line.line_total()?)?)
            })
    }
}
