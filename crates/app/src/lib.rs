//! Storefront client: Commerce API access and the session cart state manager.

pub mod api;
pub mod config;
pub mod domain;
pub mod observability;
pub mod session;

#[cfg(test)]
mod test;
