// src/server/mod.rs

//! HTTP request surfaces for the collector and pusher roles.

pub mod collect;
pub mod push;

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use crate::error::{AppError, Result};

/// Health endpoint body shared by both surfaces.
pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Format(_)
            | AppError::NoTargets
            | AppError::Validation(_)
            | AppError::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Bind `host:port` and serve `router` until the process is stopped.
pub async fn serve(router: Router, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::config(format!("Invalid bind address {host}:{port}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_faults_map_to_bad_request() {
        let response = AppError::NoTargets.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "detail": "No available targets" }));

        let response = AppError::processor("dedup", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_bind_address() {
        let err = serve(Router::new(), "not a host", 1).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
