// src/server/push.rs

//! Pusher role: `/push` routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::models::{Item, PushResult};
use crate::services::Dispatcher;

#[derive(Debug, Deserialize)]
pub struct PushRequest {
    pub items: Vec<Item>,
    pub targets: Vec<String>,
}

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/push", post(push))
        .route("/push/targets", get(list_targets))
        .route("/push/health", get(super::health))
        .with_state(dispatcher)
}

async fn push(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(request): Json<PushRequest>,
) -> Result<Json<PushResult>> {
    let result = dispatcher.push(&request.items, &request.targets).await?;
    Ok(Json(result))
}

async fn list_targets(State(dispatcher): State<Arc<Dispatcher>>) -> Json<Value> {
    Json(json!({ "targets": dispatcher.targets().infos() }))
}
