//! EVM transfer history via Etherscan-compatible APIs.
//!
//! Works against etherscan.io and the many explorers exposing the same
//! `module=account&action=txlist` surface. Values arrive in wei and are
//! converted to native token units before leaving this module.

use async_trait::async_trait;
use chrono::DateTime;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ChainDataError;
use crate::models::RawTransfer;
use crate::provider::ChainDataProvider;

const PROVIDER_ID: &str = "ETHERSCAN";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 10^18 wei per native unit.
const WEI_PER_NATIVE: Decimal = dec!(1000000000000000000);

/// Etherscan `txlist` envelope. `status` is "1" on success and "0" both for
/// errors and for the empty-history case, which the API reports as
/// "No transactions found".
#[derive(Deserialize)]
struct TxListResponse {
    status: String,
    message: String,
    result: serde_json::Value,
}

#[derive(Deserialize)]
struct TxRecord {
    hash: Option<String>,
    #[serde(rename = "timeStamp")]
    time_stamp: Option<String>,
    from: Option<String>,
    to: Option<String>,
    value: Option<String>,
}

pub struct EtherscanProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtherscanProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ChainDataError {
        if err.is_timeout() {
            ChainDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            ChainDataError::Unavailable {
                provider: PROVIDER_ID.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Converts a wei amount string to native units, preserving it as a
    /// decimal string. Unparseable values pass through as None so the
    /// consumer can flag the record instead of us guessing.
    fn wei_to_native(value: Option<String>) -> Option<String> {
        let raw = value?;
        match Decimal::from_str(&raw) {
            Ok(wei) => Some((wei / WEI_PER_NATIVE).normalize().to_string()),
            Err(_) => None,
        }
    }

    fn parse_timestamp(raw: Option<String>) -> Option<chrono::DateTime<chrono::Utc>> {
        let secs = raw?.parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

#[async_trait]
impl ChainDataProvider for EtherscanProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_transfers(&self, address: &str) -> Result<Vec<RawTransfer>, ChainDataError> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "asc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChainDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(ChainDataError::Unavailable {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let envelope: TxListResponse = response
            .json()
            .await
            .map_err(|e| ChainDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        if envelope.status != "1" {
            // Empty history is not an error on this API.
            if envelope.message.starts_with("No transactions found") {
                debug!("No transfers for {} on {}", address, PROVIDER_ID);
                return Ok(Vec::new());
            }
            return Err(ChainDataError::Unavailable {
                provider: PROVIDER_ID.to_string(),
                message: envelope.message,
            });
        }

        let records: Vec<TxRecord> = serde_json::from_value(envelope.result).map_err(|e| {
            ChainDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        })?;

        debug!(
            "Fetched {} transfers for {} from {}",
            records.len(),
            address,
            PROVIDER_ID
        );

        Ok(records
            .into_iter()
            .map(|tx| RawTransfer {
                hash: tx.hash,
                timestamp: Self::parse_timestamp(tx.time_stamp),
                value: Self::wei_to_native(tx.value),
                from: tx.from.unwrap_or_default(),
                to: tx.to.unwrap_or_default(),
            })
            .collect())
    }
}
