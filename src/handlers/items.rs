use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use metrics::counter;
use std::str::FromStr;

use super::common::{created_response, success_response, FromJsonObject, JsonObject};
use crate::{
    dto::{
        CreateItemRequest, ItemAction, ItemList, ItemResponse, MachineList, MachineResponse,
        UpdateMachineItemsRequest,
    },
    errors::ServiceError,
    AppState,
};

impl FromJsonObject for CreateItemRequest {
    fn from_json_object(body: &JsonObject) -> Result<Self, ServiceError> {
        Ok(Self {
            name: body.required_string("name")?,
        })
    }
}

impl FromJsonObject for UpdateMachineItemsRequest {
    fn from_json_object(body: &JsonObject) -> Result<Self, ServiceError> {
        let item_id = body.required_i32("item_id")?;
        let raw_action = body.required_string("action")?;
        let action = ItemAction::from_str(&raw_action).map_err(|_| {
            ServiceError::validation(format!(
                "Invalid action '{raw_action}': expected 'add' or 'delete'"
            ))
        })?;
        Ok(Self { item_id, action })
    }
}

/// Create an item
#[utoipa::path(
    post,
    path = "/api/items/",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    let request = CreateItemRequest::from_body(&body)?;
    let item = state.items.create(request).await?;
    counter!("vending_api.items_created", 1);
    Ok(created_response(item))
}

/// List every item with the machines selling it
#[utoipa::path(
    get,
    path = "/api/items/",
    responses((status = 200, description = "All items", body = ItemList)),
    tag = "items"
)]
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let items = state.items.list().await?;
    Ok(success_response(ItemList { items }))
}

/// Machines that sell an item
#[utoipa::path(
    get,
    path = "/api/items/{id}/",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Machines selling the item", body = MachineList),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn machines_selling_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let machines = state.machines.find_selling_item(id).await?;
    Ok(success_response(MachineList { machines }))
}

/// Delete an item and unlink it from every machine
#[utoipa::path(
    delete,
    path = "/api/items/{id}/",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Deleted item as it was", body = ItemResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.items.delete(id).await?;
    counter!("vending_api.items_deleted", 1);
    Ok(success_response(item))
}

/// Add an item to, or remove it from, a machine
#[utoipa::path(
    post,
    path = "/api/items/{machine_id}/",
    params(("machine_id" = i32, Path, description = "Machine to update")),
    request_body = UpdateMachineItemsRequest,
    responses(
        (status = 200, description = "Machine after the update", body = MachineResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Machine or item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_machine_items(
    State(state): State<AppState>,
    Path(machine_id): Path<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    state.machines.require(machine_id).await?;
    let request = UpdateMachineItemsRequest::from_body(&body)?;

    let machine = state.machines.update_items(machine_id, request).await?;
    Ok(success_response(machine))
}
