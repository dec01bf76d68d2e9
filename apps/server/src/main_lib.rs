use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::AuthManager;
use crate::config::Config;
use walletlens_chain_data::{
    ChainDataProvider, ChainFamily, DemoChainProvider, EtherscanProvider, ProviderRegistry,
};
use walletlens_core::wallets::{WalletAnalysisService, WalletAnalysisServiceTrait};
use walletlens_storage_sqlite::db::{self, write_actor};
use walletlens_storage_sqlite::wallets::WalletRepository;

pub struct AppState {
    pub wallet_service: Arc<dyn WalletAnalysisServiceTrait + Send + Sync>,
    pub auth: Option<Arc<AuthManager>>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("WL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let wallet_repository = Arc::new(WalletRepository::new(pool.clone(), writer.clone()));

    let evm_provider: Arc<dyn ChainDataProvider> = match &config.etherscan {
        Some(etherscan) => {
            tracing::info!("Using Etherscan-compatible EVM provider at {}", etherscan.api_url);
            Arc::new(EtherscanProvider::new(
                etherscan.api_url.clone(),
                etherscan.api_key.clone(),
            ))
        }
        None => {
            tracing::warn!("No EVM provider credentials configured, serving demo histories");
            Arc::new(DemoChainProvider::new(ChainFamily::Evm))
        }
    };
    let solana_provider: Arc<dyn ChainDataProvider> =
        Arc::new(DemoChainProvider::new(ChainFamily::Solana));
    let providers = Arc::new(ProviderRegistry::new(
        Some(evm_provider),
        Some(solana_provider),
    ));

    let wallet_service: Arc<dyn WalletAnalysisServiceTrait + Send + Sync> =
        Arc::new(WalletAnalysisService::new(wallet_repository, providers));

    let auth = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()?
        .map(Arc::new);

    Ok(Arc::new(AppState {
        wallet_service,
        auth,
        db_path,
    }))
}
