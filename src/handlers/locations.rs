use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use metrics::counter;

use super::common::{created_response, success_response, FromJsonObject, JsonObject};
use crate::{
    dto::{CreateLocationRequest, LocationList, LocationResponse},
    errors::ServiceError,
    AppState,
};

impl FromJsonObject for CreateLocationRequest {
    fn from_json_object(body: &JsonObject) -> Result<Self, ServiceError> {
        Ok(Self {
            location: body.required_string("location")?,
        })
    }
}

/// Create a location
#[utoipa::path(
    post,
    path = "/api/locations/",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = LocationResponse,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    let request = CreateLocationRequest::from_body(&body)?;
    let location = state.locations.create(request).await?;
    counter!("vending_api.locations_created", 1);
    Ok(created_response(location))
}

/// List every location with its machines
#[utoipa::path(
    get,
    path = "/api/locations/",
    responses((status = 200, description = "All locations", body = LocationList)),
    tag = "locations"
)]
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let locations = state.locations.list().await?;
    Ok(success_response(LocationList { locations }))
}

/// A location and the machines it hosts
#[utoipa::path(
    get,
    path = "/api/locations/{id}/",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location with its machines", body = LocationResponse),
        (status = 404, description = "Location not found", body = crate::errors::ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.locations.get(id).await?;
    Ok(success_response(location))
}

/// Delete a location together with its machines
#[utoipa::path(
    delete,
    path = "/api/locations/{id}/",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Deleted location as it was", body = LocationResponse),
        (status = 404, description = "Location not found", body = crate::errors::ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.locations.delete(id).await?;
    counter!("vending_api.locations_deleted", 1);
    Ok(success_response(location))
}
