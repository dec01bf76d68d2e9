use async_trait::async_trait;

use crate::errors::ChainDataError;
use crate::models::RawTransfer;

/// Trait implemented by every transfer history source.
///
/// A provider serves exactly one chain family; the registry pairs providers
/// with families. Implementations own their transport, authentication and
/// retry behavior.
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// Stable identifier used in logs and error messages (e.g. "ETHERSCAN").
    fn provider_id(&self) -> &'static str;

    /// Fetches all known transfers touching `address`.
    ///
    /// An address with no history resolves to an empty list, not an error.
    async fn fetch_transfers(&self, address: &str) -> Result<Vec<RawTransfer>, ChainDataError>;
}
