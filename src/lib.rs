//! Vending API Library
//!
//! Locations host vending machines, machines sell items. This crate holds the
//! storage layer, the HTTP handlers and the router that ties them together.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod tracing;

use axum::{http::HeaderValue, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::repositories::{ItemRepository, LocationRepository, MachineRepository};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub locations: LocationRepository,
    pub machines: MachineRepository,
    pub items: ItemRepository,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        Self {
            locations: LocationRepository::new(db.clone()),
            machines: MachineRepository::new(db.clone()),
            items: ItemRepository::new(db.clone()),
            db,
            config,
        }
    }
}

/// CORS policy for the configured environment.
///
/// Development, and deployments without an explicit origin list, accept any
/// origin. Otherwise only the listed origins are allowed.
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if cfg.is_development() || origins.is_empty() {
        ::tracing::info!(
            "Using permissive CORS ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "no origins configured"
            }
        );
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Full application router: banner, API, health and Swagger UI, wrapped in
/// the tracing, CORS and request-id layers.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let health = health::health_routes(state.db.clone());

    Router::<AppState>::new()
        .route("/", get(handlers::root))
        .merge(handlers::api_routes())
        .with_state(state)
        .merge(health)
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}
