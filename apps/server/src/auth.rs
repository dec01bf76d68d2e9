//! Password login and Bearer-token verification.

use anyhow::Context;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::main_lib::AppState;

const TOKEN_TTL_SECS: u64 = 3600;

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    exp: u64,
}

/// Verifies the configured access password and issues/validates the session
/// tokens protected routes require.
pub struct AuthManager {
    password_hash: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        // Fail closed: a password without a signing secret is a misconfiguration.
        let secret_b64 = config
            .secret_key
            .as_deref()
            .context("WL_SECRET_KEY is required when WL_AUTH_PASSWORD_HASH is set")?;
        let secret = BASE64
            .decode(secret_b64)
            .context("WL_SECRET_KEY is not valid base64")?;

        // Reject obviously weak signing keys up front.
        anyhow::ensure!(
            secret.len() >= 32,
            "WL_SECRET_KEY must decode to at least 32 bytes"
        );

        PasswordHash::new(&config.password_hash)
            .map_err(|e| anyhow::anyhow!("WL_AUTH_PASSWORD_HASH is not a valid hash: {}", e))?;

        Ok(Self {
            password_hash: config.password_hash.clone(),
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn issue_token(&self) -> anyhow::Result<String> {
        let now = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            sub: "walletlens".to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to sign access token")
    }

    pub fn verify_token(&self, token: &str) -> bool {
        decode::<Claims>(token, &self.decoding_key, &Validation::default()).is_ok()
    }
}

/// Middleware guarding protected routes. Passes everything through when no
/// auth is configured.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth) = state.auth.as_ref() else {
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if auth.verify_token(token) => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
