//! Provider registry: one transfer source per chain family.

use std::sync::Arc;

use crate::errors::ChainDataError;
use crate::models::ChainFamily;
use crate::provider::fixture::FixtureChainProvider;
use crate::provider::ChainDataProvider;

/// Holds the configured provider for each supported chain family.
pub struct ProviderRegistry {
    evm: Option<Arc<dyn ChainDataProvider>>,
    solana: Option<Arc<dyn ChainDataProvider>>,
}

impl ProviderRegistry {
    pub fn new(
        evm: Option<Arc<dyn ChainDataProvider>>,
        solana: Option<Arc<dyn ChainDataProvider>>,
    ) -> Self {
        Self { evm, solana }
    }

    /// Registry serving every family from a single fixture provider.
    pub fn fixture(provider: Arc<FixtureChainProvider>) -> Self {
        Self {
            evm: Some(provider.clone()),
            solana: Some(provider),
        }
    }

    pub fn provider_for(
        &self,
        family: ChainFamily,
    ) -> Result<Arc<dyn ChainDataProvider>, ChainDataError> {
        let slot = match family {
            ChainFamily::Evm => &self.evm,
            ChainFamily::Solana => &self.solana,
        };
        slot.clone().ok_or(ChainDataError::UnsupportedChain(family))
    }
}
