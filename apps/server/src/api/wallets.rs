use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{WalletAnalysis, WalletRecordDto},
};
use walletlens_core::addresses;

/// Runs the full pipeline for an address: classify, fetch, normalize, merge,
/// recompute, persist. The address format is validated before the domain is
/// entered, so a bad address never reaches a provider.
async fn analyze_wallet(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<WalletAnalysis>> {
    let chain_family = addresses::classify(&address)?;
    let summary = state.wallet_service.analyze(&address, chain_family).await?;
    let record = state.wallet_service.get_wallet(&address)?;

    Ok(Json(WalletAnalysis {
        address,
        chain_family: chain_family.as_str().to_string(),
        summary: summary.into(),
        ledger: record.ledger.into_iter().map(Into::into).collect(),
    }))
}

/// Returns the stored record without refreshing it; 404 for an address that
/// was never analyzed.
async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<WalletRecordDto>> {
    let record = state.wallet_service.get_wallet(&address)?;
    Ok(Json(record.into()))
}

async fn list_wallets(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<WalletRecordDto>>> {
    let records = state.wallet_service.list_wallets()?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallets", get(list_wallets))
        .route("/wallets/{address}", get(get_wallet))
        .route("/wallets/{address}/analyze", post(analyze_wallet))
}
