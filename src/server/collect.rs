// src/server/collect.rs

//! Collector role: `/collect` routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::CollectionResult;
use crate::services::Collector;

/// Body of `POST /collect`.
///
/// A missing or zero `concurrency` falls back to `fetch.max_concurrency`.
#[derive(Debug, Deserialize)]
pub struct CollectRequest {
    pub sources: Vec<String>,
    #[serde(default)]
    pub concurrency: Option<usize>,
}

pub fn router(collector: Arc<Collector>) -> Router {
    Router::new()
        .route("/collect", post(collect))
        .route("/collect/sources", get(list_sources))
        .route("/collect/health", get(super::health))
        .with_state(collector)
}

async fn collect(
    State(collector): State<Arc<Collector>>,
    Json(request): Json<CollectRequest>,
) -> Json<CollectionResult> {
    let concurrency = request.concurrency.filter(|&n| n > 0);
    Json(collector.collect(&request.sources, concurrency).await)
}

async fn list_sources(State(collector): State<Arc<Collector>>) -> Json<Value> {
    Json(json!({ "sources": collector.sources().names() }))
}
