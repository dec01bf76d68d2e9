//! Shared chain data models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chain family a wallet address belongs to.
///
/// The family decides which provider serves the address and how addresses
/// compare (EVM hex addresses are case-insensitive, Solana base58 addresses
/// are not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainFamily {
    Evm,
    Solana,
}

impl ChainFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainFamily::Evm => "EVM",
            ChainFamily::Solana => "SOLANA",
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EVM" => Ok(ChainFamily::Evm),
            "SOLANA" => Ok(ChainFamily::Solana),
            other => Err(format!("Unknown chain family: {}", other)),
        }
    }
}

/// Provider-native transfer record.
///
/// Fields are optional on purpose: providers return whatever the chain gave
/// them, and the consuming normalizer decides what counts as malformed. The
/// `value` is a decimal string in native token units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransfer {
    pub hash: Option<String>,
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    pub value: Option<String>,
    pub from: String,
    pub to: String,
}
