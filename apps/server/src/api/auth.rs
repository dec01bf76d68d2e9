use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::main_lib::AppState;

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

async fn login(State(state): State<Arc<AppState>>, Json(body): Json<LoginRequest>) -> Response {
    let Some(auth) = state.auth.as_ref() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Authentication is not enabled" })),
        )
            .into_response();
    };

    if !auth.verify_password(&body.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }

    match auth.issue_token() {
        Ok(access_token) => Json(LoginResponse { access_token }).into_response(),
        Err(err) => {
            tracing::error!("Failed to issue access token: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to issue access token" })),
            )
                .into_response()
        }
    }
}

async fn auth_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({ "requiresPassword": state.auth.is_some() }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/status", get(auth_status))
}
