/*!
 * # Health Check Module
 *
 * `GET /health` reports whether the service can reach its store. The
 * database is pinged on every call; an unreachable store turns the overall
 * status to `down` and the response to 503.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use metrics::gauge;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::warn;
use utoipa::ToSchema;

use crate::db;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Health check detail
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthDetail {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Overall health information
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub details: HashMap<String, HealthDetail>,
}

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub db_pool: Arc<DatabaseConnection>,
    pub start_time: SystemTime,
}

impl HealthState {
    pub fn new(db_pool: Arc<DatabaseConnection>) -> Self {
        Self {
            db_pool,
            start_time: SystemTime::now(),
        }
    }

    /// Calculate system uptime
    pub fn uptime(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs()
    }

    /// Probe every dependency and fold the results into one report
    pub async fn check(&self) -> HealthInfo {
        let mut details = HashMap::new();

        let database = match db::check_connection(&self.db_pool).await {
            Ok(()) => HealthDetail {
                status: HealthStatus::Up,
                message: None,
                timestamp: Utc::now(),
            },
            Err(e) => HealthDetail {
                status: HealthStatus::Down,
                message: Some(e.to_string()),
                timestamp: Utc::now(),
            },
        };
        details.insert("database".to_string(), database);

        let status = if details.values().any(|d| d.status == HealthStatus::Down) {
            HealthStatus::Down
        } else {
            HealthStatus::Up
        };

        let uptime_seconds = self.uptime();
        gauge!("vending_api.uptime_seconds", uptime_seconds as f64);

        HealthInfo {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            uptime_seconds,
            details,
        }
    }
}

/// Service health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthInfo),
        (status = 503, description = "A dependency is down", body = HealthInfo)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let health = state.check().await;

    let status_code = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => {
            warn!("Health check failed: {:?}", health.details);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status_code, Json(health))
}

/// Creates router with health check endpoints
pub fn health_routes(db_pool: Arc<DatabaseConnection>) -> Router {
    let health_state = Arc::new(HealthState::new(db_pool));

    Router::new()
        .route("/health", get(health_check))
        .with_state(health_state)
}
