//! Request signing.

use std::fmt;

use reqwest::RequestBuilder;
use zeroize::Zeroizing;

/// Attaches credentials to outgoing commerce API requests.
pub trait RequestSigner: Send + Sync + fmt::Debug {
    /// Return `request` with whatever credentials this signer carries.
    fn sign(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Bearer token credential for an authenticated session.
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")?;
        Ok(())
    }
}

impl RequestSigner for BearerToken {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.0.as_str())
    }
}

/// Anonymous session: requests go out without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsigned;

impl RequestSigner for Unsigned {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}
