//! Server configuration from the environment.
//!
//! Secrets (JWT signing key, password hash) and infrastructure settings are
//! explicit configuration passed at process start, never module constants.

use std::env;

/// Authentication settings. Present only when the operator configured a
/// password; without it the API runs open (local/desktop mode).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Argon2 PHC string of the access password.
    pub password_hash: String,
    /// Base64-encoded JWT signing secret.
    pub secret_key: Option<String>,
}

/// Live EVM provider settings. Without them the server falls back to the
/// built-in demo provider.
#[derive(Debug, Clone)]
pub struct EtherscanConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub auth: Option<AuthConfig>,
    pub etherscan: Option<EtherscanConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr =
            env::var("WL_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let db_path =
            env::var("WL_DB_PATH").unwrap_or_else(|_| "data/walletlens.db".to_string());

        let auth = env::var("WL_AUTH_PASSWORD_HASH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|password_hash| AuthConfig {
                password_hash,
                secret_key: env::var("WL_SECRET_KEY").ok(),
            });

        let etherscan = env::var("WL_ETHERSCAN_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|api_key| EtherscanConfig {
                api_url: env::var("WL_ETHERSCAN_API_URL")
                    .unwrap_or_else(|_| "https://api.etherscan.io/api".to_string()),
                api_key,
            });

        Self {
            listen_addr,
            db_path,
            auth,
            etherscan,
        }
    }
}
