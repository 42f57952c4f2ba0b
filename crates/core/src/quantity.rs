//! Quantities

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::{NonZeroU32, ParseIntError},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`Quantity`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// A line can never hold zero units; remove it instead.
    #[error("quantity must be at least 1")]
    Zero,

    /// The quantity does not fit in a `u32`.
    #[error("quantity is too large")]
    Overflow,

    /// The input was not a whole number.
    #[error("quantity is not a whole number: {0}")]
    Invalid(#[from] ParseIntError),
}

/// Number of units on a cart line. Always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] when `value` is zero.
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(value).map(Self).ok_or(QuantityError::Zero)
    }

    /// The number of units.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add `units` to this quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Overflow`] if the sum does not fit.
    pub fn checked_add(self, units: u32) -> Result<Self, QuantityError> {
        self.0
            .checked_add(units)
            .map(Self)
            .ok_or(QuantityError::Overflow)
    }

    /// One unit fewer, or `None` when the line should be removed instead.
    pub fn decrement(self) -> Option<Self> {
        NonZeroU32::new(self.get() - 1).map(Self)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().parse()?)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}
