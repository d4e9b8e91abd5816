#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use vending_api::{
    config::AppConfig,
    db::{self, DbConfig},
    dto::{
        CreateItemRequest, CreateLocationRequest, CreateMachineRequest, ItemAction,
        UpdateMachineItemsRequest,
    },
    AppState,
};

/// Helper harness for spinning up the application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

/// Status and decoded JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // Every pooled connection to `sqlite::memory:` is a separate database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_with_config(&DbConfig::from(&cfg))
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = vending_api::app(state.clone());

        Self { router, state }
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    /// Send a raw body with an optional content type.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    /// Bodiless request carrying extra headers.
    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).expect("failed to build request"))
            .await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn seed_location(&self, name: &str) -> i32 {
        self.state
            .locations
            .create(CreateLocationRequest {
                location: name.to_string(),
            })
            .await
            .expect("seed location")
            .id
    }

    pub async fn seed_machine(&self, location_id: i32, coordinate: &str, status: bool, brbs: bool) -> i32 {
        self.state
            .machines
            .create(
                location_id,
                CreateMachineRequest {
                    coordinate: coordinate.to_string(),
                    status,
                    brbs,
                    itemtype: "snack".to_string(),
                },
            )
            .await
            .expect("seed machine")
            .id
    }

    pub async fn seed_item(&self, name: &str) -> i32 {
        self.state
            .items
            .create(CreateItemRequest {
                name: name.to_string(),
            })
            .await
            .expect("seed item")
            .id
    }

    pub async fn link(&self, machine_id: i32, item_id: i32) {
        self.state
            .machines
            .update_items(
                machine_id,
                UpdateMachineItemsRequest {
                    item_id,
                    action: ItemAction::Add,
                },
            )
            .await
            .expect("link item to machine");
    }
}

/// Ids of the objects in a JSON array
pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|v| v["id"].as_i64().expect("object without id"))
        .collect()
}
