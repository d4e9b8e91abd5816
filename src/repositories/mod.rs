use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use std::sync::Arc;

use crate::dto::{ItemResponse, LocationResponse, MachineResponse};
use crate::entities::{item, location, machine, machine_item};
use crate::errors::ServiceError;

pub mod item_repository;
pub mod location_repository;
pub mod machine_repository;

pub use item_repository::ItemRepository;
pub use location_repository::LocationRepository;
pub use machine_repository::MachineRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

pub(crate) fn location_not_found() -> ServiceError {
    ServiceError::not_found("Location not found.")
}

pub(crate) fn machine_not_found() -> ServiceError {
    ServiceError::not_found("Machine not found.")
}

pub(crate) fn item_not_found() -> ServiceError {
    ServiceError::not_found("Item not found.")
}

/// Builds full machine forms, fetching links, items and locations in bulk.
pub(crate) async fn load_machine_responses<C: ConnectionTrait>(
    db: &C,
    machines: Vec<machine::Model>,
) -> Result<Vec<MachineResponse>, ServiceError> {
    if machines.is_empty() {
        return Ok(Vec::new());
    }

    let machine_ids: Vec<i32> = machines.iter().map(|m| m.id).collect();
    let location_ids: Vec<i32> = machines.iter().map(|m| m.location_id).collect();

    let links = machine_item::Entity::find()
        .filter(machine_item::Column::MachineId.is_in(machine_ids))
        .all(db)
        .await?;
    let item_ids: Vec<i32> = links.iter().map(|l| l.item_id).collect();

    let items: HashMap<i32, item::Model> = if item_ids.is_empty() {
        HashMap::new()
    } else {
        item::Entity::find()
            .filter(item::Column::Id.is_in(item_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect()
    };

    let locations: HashMap<i32, location::Model> = location::Entity::find()
        .filter(location::Column::Id.is_in(location_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|l| (l.id, l))
        .collect();

    let mut items_by_machine: HashMap<i32, Vec<item::Model>> = HashMap::new();
    for link in links {
        if let Some(item) = items.get(&link.item_id) {
            items_by_machine
                .entry(link.machine_id)
                .or_default()
                .push(item.clone());
        }
    }

    machines
        .into_iter()
        .map(|m| {
            let location = locations.get(&m.location_id).cloned().ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "machine {} references missing location {}",
                    m.id, m.location_id
                ))
            })?;
            let items = items_by_machine.remove(&m.id).unwrap_or_default();
            Ok(MachineResponse::new(m, items, location))
        })
        .collect()
}

/// Builds full location forms with each location's machines.
pub(crate) async fn load_location_responses<C: ConnectionTrait>(
    db: &C,
    locations: Vec<location::Model>,
) -> Result<Vec<LocationResponse>, ServiceError> {
    if locations.is_empty() {
        return Ok(Vec::new());
    }

    let location_ids: Vec<i32> = locations.iter().map(|l| l.id).collect();
    let mut machines_by_location: HashMap<i32, Vec<machine::Model>> = HashMap::new();
    for m in machine::Entity::find()
        .filter(machine::Column::LocationId.is_in(location_ids))
        .all(db)
        .await?
    {
        machines_by_location.entry(m.location_id).or_default().push(m);
    }

    Ok(locations
        .into_iter()
        .map(|l| {
            let machines = machines_by_location.remove(&l.id).unwrap_or_default();
            LocationResponse::new(l, machines)
        })
        .collect())
}

/// Builds full item forms with the machines selling each item.
pub(crate) async fn load_item_responses<C: ConnectionTrait>(
    db: &C,
    items: Vec<item::Model>,
) -> Result<Vec<ItemResponse>, ServiceError> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let item_ids: Vec<i32> = items.iter().map(|i| i.id).collect();
    let links = machine_item::Entity::find()
        .filter(machine_item::Column::ItemId.is_in(item_ids))
        .all(db)
        .await?;
    let machine_ids: Vec<i32> = links.iter().map(|l| l.machine_id).collect();

    let machines: HashMap<i32, machine::Model> = if machine_ids.is_empty() {
        HashMap::new()
    } else {
        machine::Entity::find()
            .filter(machine::Column::Id.is_in(machine_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect()
    };

    let mut machines_by_item: HashMap<i32, Vec<machine::Model>> = HashMap::new();
    for link in links {
        if let Some(m) = machines.get(&link.machine_id) {
            machines_by_item
                .entry(link.item_id)
                .or_default()
                .push(m.clone());
        }
    }

    Ok(items
        .into_iter()
        .map(|i| {
            let machines = machines_by_item.remove(&i.id).unwrap_or_default();
            ItemResponse::new(i, machines)
        })
        .collect())
}
