use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{load_location_responses, location_not_found, BaseRepository, Repository};
use crate::dto::{CreateLocationRequest, LocationResponse};
use crate::entities::{location, machine, machine_item};
use crate::errors::ServiceError;

/// Repository for locations and their cascading deletes
#[derive(Debug, Clone)]
pub struct LocationRepository {
    base: BaseRepository,
}

impl LocationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a location by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<location::Model>, ServiceError> {
        Ok(location::Entity::find_by_id(id).one(self.get_db()).await?)
    }

    /// Like [`find_by_id`](Self::find_by_id) but absent locations are an error
    pub async fn require(&self, id: i32) -> Result<location::Model, ServiceError> {
        self.find_by_id(id).await?.ok_or_else(location_not_found)
    }

    /// Create a location; it starts with no machines
    pub async fn create(
        &self,
        input: CreateLocationRequest,
    ) -> Result<LocationResponse, ServiceError> {
        input.validate()?;

        let model = location::ActiveModel {
            location: Set(input.location),
            ..Default::default()
        }
        .insert(self.get_db())
        .await?;

        info!(location_id = model.id, "location created");
        Ok(LocationResponse::new(model, Vec::new()))
    }

    /// Get one location in full form
    pub async fn get(&self, id: i32) -> Result<LocationResponse, ServiceError> {
        let model = self.require(id).await?;
        let machines = model.find_related(machine::Entity).all(self.get_db()).await?;
        Ok(LocationResponse::new(model, machines))
    }

    /// All locations in full form
    pub async fn list(&self) -> Result<Vec<LocationResponse>, ServiceError> {
        let locations = location::Entity::find()
            .order_by_asc(location::Column::Id)
            .all(self.get_db())
            .await?;
        load_location_responses(self.get_db(), locations).await
    }

    /// Delete a location together with its machines and their item links.
    /// Returns the location as it was before deletion.
    pub async fn delete(&self, id: i32) -> Result<LocationResponse, ServiceError> {
        let txn = self.get_db().begin().await?;

        let model = location::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(location_not_found)?;
        let machines = model.find_related(machine::Entity).all(&txn).await?;
        let machine_ids: Vec<i32> = machines.iter().map(|m| m.id).collect();

        if !machine_ids.is_empty() {
            machine_item::Entity::delete_many()
                .filter(machine_item::Column::MachineId.is_in(machine_ids.clone()))
                .exec(&txn)
                .await?;
            machine::Entity::delete_many()
                .filter(machine::Column::LocationId.eq(id))
                .exec(&txn)
                .await?;
        }

        let snapshot = LocationResponse::new(model.clone(), machines);
        model.delete(&txn).await?;
        txn.commit().await?;

        info!(
            location_id = id,
            machines_removed = machine_ids.len(),
            "location deleted"
        );
        Ok(snapshot)
    }
}

impl Repository for LocationRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
