//! Carts

pub mod errors;
pub mod manager;
pub mod view;

pub use errors::CartManagerError;
pub use manager::CartManager;
pub use view::CartView;
