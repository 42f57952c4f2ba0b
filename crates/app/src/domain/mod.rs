//! Storefront Client Domain Concerns

pub mod carts;
