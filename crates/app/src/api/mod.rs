//! Commerce API

mod errors;
pub mod http;
mod requests;
mod responses;
mod service;
mod signing;

pub use errors::CommerceApiError;
pub use http::{HttpCommerceApi, HttpCommerceApiConfig};
pub use service::*;
pub use signing::{BearerToken, RequestSigner, Unsigned};
