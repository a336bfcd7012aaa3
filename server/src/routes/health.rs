//! Liveness and client-config endpoints.

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::config::ServerConfig;

/// Body of `GET /api/client-config`.
#[derive(Debug, Serialize)]
pub struct ClientConfigBody {
    pub api_base_url: String,
    pub ws_url: String,
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// The backend endpoints this host hands to browsers. Tools use it to
/// point at the same backend as the dashboard.
pub async fn client_config(State(config): State<ServerConfig>) -> Json<ClientConfigBody> {
    Json(ClientConfigBody {
        api_base_url: config.client.api_base_url,
        ws_url: config.client.ws_url,
    })
}
