//! Agent Hub HTTP REST API
//!
//! Axum-based HTTP server exposing agent registration and analytics
//! reporting over the embedded SQLite database.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to a
//! pure inner function. The inner functions are directly testable without
//! axum dispatch machinery.
//!
//! Endpoints:
//! - GET  /health                  — health check with DB status
//! - GET  /api/agents              — list agents, newest first
//! - POST /api/agents              — register an agent (echoes the input)
//! - GET  /api/analytics/global    — today's cross-agent aggregate
//! - GET  /api/analytics/:agent_id — per-agent analytics in a date range

use std::sync::Arc;

use agenthub_core::models::Agent;
use agenthub_core::{db, store, HubConfig};
use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

/// Shared state for all HTTP handlers — the storage handle travels with
/// every request instead of living in a module-level global.
#[derive(Clone)]
pub struct HttpState {
    pub pool: SqlitePool,
    pub config: HubConfig,
}

/// Build the Axum router with all endpoints.
pub fn build_router(state: Arc<HttpState>) -> Router {
    // Cross-origin requests are unconditionally permitted from any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/agents",
            get(list_agents_handler).post(create_agent_handler),
        )
        // The static segment wins over the :agent_id capture, so both
        // analytics routes are reachable.
        .route("/api/analytics/global", get(global_analytics_handler))
        .route("/api/analytics/:agent_id", get(agent_analytics_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    pool: SqlitePool,
    config: HubConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState { pool, config });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Agent Hub API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Date-range filter for per-agent analytics. Either bound may be absent,
/// in which case that side of the range is unconstrained.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner health check — probes the database and returns (status_code, json_body).
pub async fn health_inner(pool: &SqlitePool, db_path: &str) -> (StatusCode, serde_json::Value) {
    let sqlite_ver = match db::health_check(pool).await {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({
                    "status": "unhealthy",
                    "error": e.to_string(),
                }),
            );
        }
    };

    (
        StatusCode::OK,
        serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "sqlite": sqlite_ver,
            "database": db_path,
        }),
    )
}

/// Inner list — all agents, newest first.
pub async fn list_agents_inner(pool: &SqlitePool) -> (StatusCode, serde_json::Value) {
    match store::list_agents(pool).await {
        Ok(agents) => (StatusCode::OK, serde_json::json!(agents)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({
                "error": e.to_string(),
                "status": "error",
            }),
        ),
    }
}

/// Inner create — inserts the record verbatim and echoes it back. No id or
/// timestamp generation, no validation beyond what the schema enforces.
pub async fn create_agent_inner(
    pool: &SqlitePool,
    agent: Agent,
) -> (StatusCode, serde_json::Value) {
    match store::insert_agent(pool, &agent).await {
        Ok(()) => (StatusCode::OK, serde_json::json!(agent)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({
                "error": e.to_string(),
                "status": "error",
            }),
        ),
    }
}

/// Inner per-agent analytics — rows within the inclusive date range,
/// newest first. No matching rows yields an empty array, not an error.
pub async fn agent_analytics_inner(
    pool: &SqlitePool,
    agent_id: &str,
    range: AnalyticsRange,
) -> (StatusCode, serde_json::Value) {
    match store::list_agent_analytics(
        pool,
        agent_id,
        range.start_date.as_deref(),
        range.end_date.as_deref(),
    )
    .await
    {
        Ok(records) => (StatusCode::OK, serde_json::json!(records)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({
                "error": e.to_string(),
                "status": "error",
            }),
        ),
    }
}

/// Inner global analytics — today's cross-agent aggregate.
pub async fn global_analytics_inner(pool: &SqlitePool) -> (StatusCode, serde_json::Value) {
    match store::global_stats(pool).await {
        Ok(stats) => (StatusCode::OK, serde_json::json!(stats)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({
                "error": e.to_string(),
                "status": "error",
            }),
        ),
    }
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(&state.pool, &state.config.database.path).await;
    (status, Json(body))
}

pub async fn list_agents_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = list_agents_inner(&state.pool).await;
    (status, Json(body))
}

pub async fn create_agent_handler(
    State(state): State<Arc<HttpState>>,
    Json(agent): Json<Agent>,
) -> impl IntoResponse {
    let (status, body) = create_agent_inner(&state.pool, agent).await;
    (status, Json(body))
}

pub async fn agent_analytics_handler(
    State(state): State<Arc<HttpState>>,
    Path(agent_id): Path<String>,
    Query(range): Query<AnalyticsRange>,
) -> impl IntoResponse {
    let (status, body) = agent_analytics_inner(&state.pool, &agent_id, range).await;
    (status, Json(body))
}

pub async fn global_analytics_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = global_analytics_inner(&state.pool).await;
    (status, Json(body))
}

// ============================================================================
// Unit Tests — call inner functions directly
// ============================================================================
