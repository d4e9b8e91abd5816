pub mod common;
pub mod items;
pub mod locations;
pub mod machines;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Banner served at the root path
#[derive(Debug, Serialize, ToSchema)]
pub struct RootBanner {
    pub message: String,
    pub version: String,
}

pub async fn root() -> Json<RootBanner> {
    Json(RootBanner {
        message: "Vending API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Every `/api` route.
///
/// A path segment such as `/api/machines/:id/` is shared between methods, so
/// the parameter means "machine" for GET and DELETE but "location" for POST.
/// Static segments like `working` take priority over the parameter.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/machines/", get(machines::list_machines))
        .route("/api/machines/working/", get(machines::list_working_machines))
        .route("/api/machines/brbs/", get(machines::list_brbs_machines))
        .route(
            "/api/machines/:id/",
            get(machines::get_machine)
                .post(machines::create_machine)
                .delete(machines::delete_machine),
        )
        .route("/api/machines/:id/add/", post(machines::update_machine_status))
        .route(
            "/api/locations/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/api/locations/:id/",
            get(locations::get_location).delete(locations::delete_location),
        )
        .route("/api/items/", get(items::list_items).post(items::create_item))
        .route(
            "/api/items/:id/",
            get(items::machines_selling_item)
                .post(items::update_machine_items)
                .delete(items::delete_item),
        )
}
