//! Error types for chain data operations.

use thiserror::Error;

use crate::models::ChainFamily;

/// Errors that can occur while fetching transfer history.
///
/// All variants are infrastructure errors from the caller's perspective:
/// the core surfaces them without retrying. Retry/backoff policy, if any,
/// lives with the provider implementations.
#[derive(Error, Debug)]
pub enum ChainDataError {
    /// The provider could not be reached or answered with a server error.
    #[error("Provider unavailable: {provider} - {message}")]
    Unavailable { provider: String, message: String },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// The provider answered with a payload we could not interpret.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// No provider is configured for the requested chain family.
    #[error("No provider configured for chain family {0}")]
    UnsupportedChain(ChainFamily),
}
