//! IP-intelligence provider port.
//!
//! Each provider owns the URL it is queried at and the parser for its
//! response body. Parsing is the validation boundary: a body that does not
//! match the provider's schema is rejected here, and the identity probe moves
//! on to the next provider instead of storing malformed data.

use thiserror::Error;

use crate::domain::IdentityInfo;

/// Reasons a provider body could not be turned into an [`IdentityInfo`].
#[derive(Debug, Error)]
pub enum ProviderParseError {
    #[error("{provider}: body is not valid JSON: {source}")]
    Json {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider}: missing required field '{field}'")]
    MissingField { provider: String, field: String },

    #[error("{provider}: provider reported failure: {message}")]
    ProviderFailure { provider: String, message: String },
}

/// A source of IP, geolocation and (optionally) anonymizer flags.
pub trait IdentityProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Endpoint that returns the caller's own IP record.
    fn url(&self) -> &str;

    /// Parse a successful response body.
    ///
    /// Providers without anonymizer detection must set the VPN, proxy and
    /// hosting flags to `false`.
    fn parse(&self, body: &[u8]) -> Result<IdentityInfo, ProviderParseError>;
}
