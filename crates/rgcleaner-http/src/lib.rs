//! rgcleaner HTTP server
//!
//! Serves the cleaner tools over HTTP:
//!
//! - `POST /api/mcp`: MCP-style JSON endpoint (custom shape, JSON-RPC 2.0, direct calls)
//! - `POST /{functionName}`: Azure Functions custom handler routes
//! - `GET /health`: liveness check

pub mod function;
pub mod mcp;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
};
use rgcleaner_core::CleanerTools;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

/// Port the Functions host hands to custom handlers
pub const FUNCTIONS_PORT_ENV: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<dyn CleanerTools>,
}

/// Build the router with every route mounted
pub fn router(tools: Arc<dyn CleanerTools>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/mcp", post(mcp::endpoint))
        .route("/{function}", post(function::endpoint))
        .with_state(AppState { tools })
}

async fn health() -> &'static str {
    "ok"
}

/// `{error}` body for a request axum could not read as JSON
pub(crate) fn rejection_response(rejection: JsonRejection) -> (StatusCode, Json<Value>) {
    let message = rejection.body_text();
    tracing::warn!("Rejected request body: {}", message);
    (rejection.status(), Json(json!({ "error": message })))
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: SocketAddr, tools: Arc<dyn CleanerTools>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

    tracing::info!("rgcleaner HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(tools))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rgcleaner HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Listen address: `FUNCTIONS_CUSTOMHANDLER_PORT` when running under the
/// Functions host, otherwise `default`
pub fn listen_addr(default: SocketAddr) -> SocketAddr {
    match std::env::var(FUNCTIONS_PORT_ENV)
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
    {
        Some(port) => SocketAddr::from(([0, 0, 0, 0], port)),
        None => default,
    }
}
