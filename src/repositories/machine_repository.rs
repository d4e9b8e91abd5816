use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use super::{
    item_not_found, load_machine_responses, location_not_found, machine_not_found,
    BaseRepository, Repository,
};
use crate::dto::{CreateMachineRequest, ItemAction, MachineResponse, UpdateMachineItemsRequest};
use crate::entities::{item, location, machine, machine_item};
use crate::errors::ServiceError;

/// Repository for machines, their status and the items they stock
#[derive(Debug, Clone)]
pub struct MachineRepository {
    base: BaseRepository,
}

impl MachineRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a machine by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<machine::Model>, ServiceError> {
        Ok(machine::Entity::find_by_id(id).one(self.get_db()).await?)
    }

    /// Like [`find_by_id`](Self::find_by_id) but absent machines are an error
    pub async fn require(&self, id: i32) -> Result<machine::Model, ServiceError> {
        self.find_by_id(id).await?.ok_or_else(machine_not_found)
    }

    /// Create a machine under an existing location
    pub async fn create(
        &self,
        location_id: i32,
        input: CreateMachineRequest,
    ) -> Result<MachineResponse, ServiceError> {
        input.validate()?;

        let txn = self.get_db().begin().await?;

        let location = location::Entity::find_by_id(location_id)
            .one(&txn)
            .await?
            .ok_or_else(location_not_found)?;

        let model = machine::ActiveModel {
            coordinate: Set(input.coordinate),
            status: Set(input.status),
            brbs: Set(input.brbs),
            itemtype: Set(input.itemtype),
            location_id: Set(location.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(machine_id = model.id, location_id, "machine created");
        Ok(MachineResponse::new(model, Vec::new(), location))
    }

    /// Get one machine in full form
    pub async fn get(&self, id: i32) -> Result<MachineResponse, ServiceError> {
        let model = self.require(id).await?;
        self.single_response(model).await
    }

    /// All machines
    pub async fn list(&self) -> Result<Vec<MachineResponse>, ServiceError> {
        let machines = machine::Entity::find()
            .order_by_asc(machine::Column::Id)
            .all(self.get_db())
            .await?;
        load_machine_responses(self.get_db(), machines).await
    }

    /// Machines whose status is true
    pub async fn list_working(&self) -> Result<Vec<MachineResponse>, ServiceError> {
        let machines = machine::Entity::find()
            .filter(machine::Column::Status.eq(true))
            .order_by_asc(machine::Column::Id)
            .all(self.get_db())
            .await?;
        load_machine_responses(self.get_db(), machines).await
    }

    /// Machines that accept BRBs
    pub async fn list_brbs(&self) -> Result<Vec<MachineResponse>, ServiceError> {
        let machines = machine::Entity::find()
            .filter(machine::Column::Brbs.eq(true))
            .order_by_asc(machine::Column::Id)
            .all(self.get_db())
            .await?;
        load_machine_responses(self.get_db(), machines).await
    }

    /// Machines currently selling an item
    pub async fn find_selling_item(
        &self,
        item_id: i32,
    ) -> Result<Vec<MachineResponse>, ServiceError> {
        let item = item::Entity::find_by_id(item_id)
            .one(self.get_db())
            .await?
            .ok_or_else(item_not_found)?;
        let machines = item
            .find_related(machine::Entity)
            .order_by_asc(machine::Column::Id)
            .all(self.get_db())
            .await?;
        load_machine_responses(self.get_db(), machines).await
    }

    /// Delete a machine and its item links. Items and the location are kept.
    /// Returns the machine as it was before deletion.
    pub async fn delete(&self, id: i32) -> Result<MachineResponse, ServiceError> {
        let txn = self.get_db().begin().await?;

        let model = machine::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(machine_not_found)?;
        let snapshot = load_machine_responses(&txn, vec![model.clone()])
            .await?
            .pop()
            .ok_or_else(machine_not_found)?;

        machine_item::Entity::delete_many()
            .filter(machine_item::Column::MachineId.eq(id))
            .exec(&txn)
            .await?;
        model.delete(&txn).await?;

        txn.commit().await?;

        info!(machine_id = id, "machine deleted");
        Ok(snapshot)
    }

    /// Set whether a machine is operational
    pub async fn update_status(
        &self,
        id: i32,
        status: bool,
    ) -> Result<MachineResponse, ServiceError> {
        let txn = self.get_db().begin().await?;

        let model = machine::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(machine_not_found)?;
        let mut active = model.into_active_model();
        active.status = Set(status);
        let updated = active.update(&txn).await?;

        let response = load_machine_responses(&txn, vec![updated])
            .await?
            .pop()
            .ok_or_else(machine_not_found)?;
        txn.commit().await?;

        info!(machine_id = id, status, "machine status updated");
        Ok(response)
    }

    /// Attach an item to or detach it from a machine.
    ///
    /// Links form a set: adding an item the machine already sells leaves it
    /// unchanged. Removing an item the machine does not sell is a not-found
    /// error and changes nothing.
    pub async fn update_items(
        &self,
        machine_id: i32,
        request: UpdateMachineItemsRequest,
    ) -> Result<MachineResponse, ServiceError> {
        let txn = self.get_db().begin().await?;

        let model = machine::Entity::find_by_id(machine_id)
            .one(&txn)
            .await?
            .ok_or_else(machine_not_found)?;
        let item = item::Entity::find_by_id(request.item_id)
            .one(&txn)
            .await?
            .ok_or_else(item_not_found)?;

        match request.action {
            ItemAction::Add => {
                let existing = machine_item::Entity::find_by_id((model.id, item.id))
                    .one(&txn)
                    .await?;
                if existing.is_some() {
                    debug!(machine_id, item_id = item.id, "item already linked");
                } else {
                    machine_item::Entity::insert(machine_item::ActiveModel {
                        machine_id: Set(model.id),
                        item_id: Set(item.id),
                    })
                    .exec_without_returning(&txn)
                    .await?;
                }
            }
            ItemAction::Delete => {
                let removed = machine_item::Entity::delete_many()
                    .filter(machine_item::Column::MachineId.eq(model.id))
                    .filter(machine_item::Column::ItemId.eq(item.id))
                    .exec(&txn)
                    .await?;
                if removed.rows_affected == 0 {
                    return Err(ServiceError::not_found(
                        "Item is not available at this machine.",
                    ));
                }
            }
        }

        let response = load_machine_responses(&txn, vec![model])
            .await?
            .pop()
            .ok_or_else(machine_not_found)?;
        txn.commit().await?;

        info!(
            machine_id,
            item_id = request.item_id,
            action = %request.action,
            "machine items updated"
        );
        Ok(response)
    }

    async fn single_response(&self, model: machine::Model) -> Result<MachineResponse, ServiceError> {
        load_machine_responses(self.get_db(), vec![model])
            .await?
            .pop()
            .ok_or_else(machine_not_found)
    }
}

impl Repository for MachineRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
