//! HTTP surface: `POST /chatbot` and `GET /ping`.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::dispatcher::{ChatError, ChatResponse, Dispatcher};

pub fn build_router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/chatbot", post(handle_chatbot))
        .route("/ping", get(handle_ping))
        .with_state(dispatcher)
}

async fn handle_ping() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"success": true, "data": "pong"})))
}

async fn handle_chatbot(
    State(dispatcher): State<Arc<Dispatcher>>,
    body: Bytes,
) -> impl IntoResponse {
    let response = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => {
            // Client calls block on ureq and may sleep between retries
            match tokio::task::spawn_blocking(move || dispatcher.handle(&payload)).await {
                Ok(response) => response,
                Err(err) => {
                    error!(error = %err, "chat handler panicked");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"success": false, "message": "Internal server error"})),
                    );
                }
            }
        }
        Err(err) => {
            let mut errors = BTreeMap::new();
            errors.insert(
                "non_field_errors".to_string(),
                vec![format!("JSON parse error - {err}")],
            );
            ChatResponse::from(Err(ChatError::PayloadInvalid(errors)))
        }
    };

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::to_value(&response.body).unwrap_or(Value::Null);
    (status, Json(body))
}

/// Serve until ctrl-c
pub async fn serve(bind: &str, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "chat endpoint listening");

    axum::serve(listener, build_router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("chat server failed")?;

    info!("chat endpoint stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
    }
}
