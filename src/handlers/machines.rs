use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use metrics::counter;
use tracing::info;

use super::common::{created_response, success_response, FromJsonObject, JsonObject};
use crate::{
    dto::{CreateMachineRequest, MachineList, MachineResponse, UpdateMachineStatusRequest},
    errors::ServiceError,
    AppState,
};

impl FromJsonObject for CreateMachineRequest {
    fn from_json_object(body: &JsonObject) -> Result<Self, ServiceError> {
        Ok(Self {
            coordinate: body.required_string("coordinate")?,
            status: body.required_bool("status")?,
            brbs: body.required_bool("brbs")?,
            itemtype: body.required_string("itemtype")?,
        })
    }
}

impl FromJsonObject for UpdateMachineStatusRequest {
    fn from_json_object(body: &JsonObject) -> Result<Self, ServiceError> {
        Ok(Self {
            status: body.required_bool("status")?,
        })
    }
}

/// List every machine
#[utoipa::path(
    get,
    path = "/api/machines/",
    responses(
        (status = 200, description = "All machines", body = MachineList,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
    ),
    tag = "machines"
)]
pub async fn list_machines(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let machines = state.machines.list().await?;
    Ok(success_response(MachineList { machines }))
}

/// Get one machine with its items and location
#[utoipa::path(
    get,
    path = "/api/machines/{id}/",
    params(("id" = i32, Path, description = "Machine ID")),
    responses(
        (status = 200, description = "Machine details", body = MachineResponse),
        (status = 404, description = "Machine not found", body = crate::errors::ErrorResponse)
    ),
    tag = "machines"
)]
pub async fn get_machine(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let machine = state.machines.get(id).await?;
    Ok(success_response(machine))
}

/// Machines that are currently operational
#[utoipa::path(
    get,
    path = "/api/machines/working/",
    responses((status = 200, description = "Working machines", body = MachineList)),
    tag = "machines"
)]
pub async fn list_working_machines(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let machines = state.machines.list_working().await?;
    Ok(success_response(MachineList { machines }))
}

/// Machines that accept BRBs
#[utoipa::path(
    get,
    path = "/api/machines/brbs/",
    responses((status = 200, description = "Machines accepting BRBs", body = MachineList)),
    tag = "machines"
)]
pub async fn list_brbs_machines(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let machines = state.machines.list_brbs().await?;
    Ok(success_response(MachineList { machines }))
}

/// Create a machine at a location
#[utoipa::path(
    post,
    path = "/api/machines/{location_id}/",
    params(("location_id" = i32, Path, description = "Location hosting the machine")),
    request_body = CreateMachineRequest,
    responses(
        (status = 201, description = "Machine created", body = MachineResponse,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Location not found", body = crate::errors::ErrorResponse)
    ),
    tag = "machines"
)]
pub async fn create_machine(
    State(state): State<AppState>,
    Path(location_id): Path<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    state.locations.require(location_id).await?;
    let request = CreateMachineRequest::from_body(&body)?;

    let machine = state.machines.create(location_id, request).await?;
    counter!("vending_api.machines_created", 1);
    info!(machine_id = machine.id, location_id, "created machine via api");

    Ok(created_response(machine))
}

/// Delete a machine
#[utoipa::path(
    delete,
    path = "/api/machines/{id}/",
    params(("id" = i32, Path, description = "Machine ID")),
    responses(
        (status = 200, description = "Deleted machine as it was", body = MachineResponse),
        (status = 404, description = "Machine not found", body = crate::errors::ErrorResponse)
    ),
    tag = "machines"
)]
pub async fn delete_machine(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let machine = state.machines.delete(id).await?;
    counter!("vending_api.machines_deleted", 1);
    Ok(success_response(machine))
}

/// Set whether a machine is operational
#[utoipa::path(
    post,
    path = "/api/machines/{id}/add/",
    params(("id" = i32, Path, description = "Machine ID")),
    request_body = UpdateMachineStatusRequest,
    responses(
        (status = 200, description = "Updated machine", body = MachineResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Machine not found", body = crate::errors::ErrorResponse)
    ),
    tag = "machines"
)]
pub async fn update_machine_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    state.machines.require(id).await?;
    let request = UpdateMachineStatusRequest::from_body(&body)?;

    let machine = state.machines.update_status(id, request.status).await?;
    Ok(success_response(machine))
}
