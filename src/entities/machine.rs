use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A vending unit placed at a coordinate inside a location
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "machines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Physical position code inside the location
    pub coordinate: String,
    /// Whether the machine is operational
    pub status: bool,
    /// Whether the machine accepts BRBs
    pub brbs: bool,
    /// Category of goods sold, e.g. "snack" or "drink"
    pub itemtype: String,
    pub location_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Location,
    #[sea_orm(has_many = "super::machine_item::Entity")]
    MachineItems,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::machine_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineItems.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        super::machine_item::Relation::Item.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::machine_item::Relation::Machine.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
