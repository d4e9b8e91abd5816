use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A product that may be stocked by any number of machines
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::machine_item::Entity")]
    MachineItems,
}

impl Related<super::machine_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineItems.def()
    }
}

impl Related<super::machine::Entity> for Entity {
    fn to() -> RelationDef {
        super::machine_item::Relation::Machine.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::machine_item::Relation::Item.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
