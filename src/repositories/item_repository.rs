use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{item_not_found, load_item_responses, BaseRepository, Repository};
use crate::dto::{CreateItemRequest, ItemResponse};
use crate::entities::{item, machine, machine_item};
use crate::errors::ServiceError;

/// Repository for items
#[derive(Debug, Clone)]
pub struct ItemRepository {
    base: BaseRepository,
}

impl ItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an item by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<item::Model>, ServiceError> {
        Ok(item::Entity::find_by_id(id).one(self.get_db()).await?)
    }

    /// Like [`find_by_id`](Self::find_by_id) but absent items are an error
    pub async fn require(&self, id: i32) -> Result<item::Model, ServiceError> {
        self.find_by_id(id).await?.ok_or_else(item_not_found)
    }

    /// Create an item sold by no machine yet
    pub async fn create(&self, input: CreateItemRequest) -> Result<ItemResponse, ServiceError> {
        input.validate()?;

        let model = item::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(self.get_db())
        .await?;

        info!(item_id = model.id, "item created");
        Ok(ItemResponse::new(model, Vec::new()))
    }

    /// Get one item in full form
    pub async fn get(&self, id: i32) -> Result<ItemResponse, ServiceError> {
        let model = self.require(id).await?;
        let machines = model.find_related(machine::Entity).all(self.get_db()).await?;
        Ok(ItemResponse::new(model, machines))
    }

    /// All items in full form
    pub async fn list(&self) -> Result<Vec<ItemResponse>, ServiceError> {
        let items = item::Entity::find()
            .order_by_asc(item::Column::Id)
            .all(self.get_db())
            .await?;
        load_item_responses(self.get_db(), items).await
    }

    /// Delete an item and unlink it from every machine. Machines are kept.
    /// Returns the item as it was before deletion.
    pub async fn delete(&self, id: i32) -> Result<ItemResponse, ServiceError> {
        let txn = self.get_db().begin().await?;

        let model = item::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(item_not_found)?;
        let machines = model.find_related(machine::Entity).all(&txn).await?;
        let snapshot = ItemResponse::new(model.clone(), machines);

        machine_item::Entity::delete_many()
            .filter(machine_item::Column::ItemId.eq(id))
            .exec(&txn)
            .await?;
        model.delete(&txn).await?;

        txn.commit().await?;

        info!(item_id = id, "item deleted");
        Ok(snapshot)
    }
}

impl Repository for ItemRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateLocationRequest, CreateMachineRequest, ItemAction, UpdateMachineItemsRequest};
    use crate::repositories::{test_support::memory_db, LocationRepository, MachineRepository};
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn create_list_and_delete() {
        let repo = ItemRepository::new(memory_db().await);

        let chips = repo
            .create(CreateItemRequest { name: "Chips".into() })
            .await
            .unwrap();
        assert!(chips.machines.is_empty());
        repo.create(CreateItemRequest { name: "Gum".into() })
            .await
            .unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Chips".to_string(), "Gum".to_string()]);

        let deleted = repo.delete(chips.id).await.unwrap();
        assert_eq!(deleted.name, "Chips");
        assert_matches!(repo.get(chips.id).await, Err(ServiceError::NotFound(msg)) if msg == "Item not found.");
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let repo = ItemRepository::new(memory_db().await);
        assert_matches!(
            repo.create(CreateItemRequest { name: String::new() }).await,
            Err(ServiceError::ValidationError(_))
        );
    }

    #[tokio::test]
    async fn deleting_item_unlinks_but_keeps_machines() {
        let db = memory_db().await;
        let items = ItemRepository::new(db.clone());
        let machines = MachineRepository::new(db.clone());
        let locations = LocationRepository::new(db);

        let site = locations
            .create(CreateLocationRequest { location: "Klarman".into() })
            .await
            .unwrap();
        let m = machines
            .create(
                site.id,
                CreateMachineRequest {
                    coordinate: "K1".into(),
                    status: true,
                    brbs: true,
                    itemtype: "drink".into(),
                },
            )
            .await
            .unwrap();
        let tea = items.create(CreateItemRequest { name: "Tea".into() }).await.unwrap();
        machines
            .update_items(
                m.id,
                UpdateMachineItemsRequest {
                    item_id: tea.id,
                    action: ItemAction::Add,
                },
            )
            .await
            .unwrap();

        let snapshot = items.delete(tea.id).await.unwrap();
        assert_eq!(snapshot.machines.len(), 1);
        assert_eq!(snapshot.machines[0].id, m.id);

        let machine = machines.get(m.id).await.unwrap();
        assert!(machine.items.is_empty());
    }
}
