use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_not_blank, ItemSummary, LocationSummary};
use crate::entities::{item, location, machine};

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateMachineRequest {
    /// Physical position code
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "A1")]
    pub coordinate: String,
    /// Whether the machine is operational
    pub status: bool,
    /// Whether the machine accepts BRBs
    pub brbs: bool,
    /// Category of goods sold
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "snack")]
    pub itemtype: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct UpdateMachineStatusRequest {
    pub status: bool,
}

/// What to do with the item named in an [`UpdateMachineItemsRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, EnumString, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemAction {
    Add,
    Delete,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct UpdateMachineItemsRequest {
    #[schema(example = 1)]
    pub item_id: i32,
    pub action: ItemAction,
}

/// Machine with scalar fields only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MachineSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "A1")]
    pub coordinate: String,
    pub status: bool,
    pub brbs: bool,
    #[schema(example = "snack")]
    pub itemtype: String,
}

impl From<machine::Model> for MachineSummary {
    fn from(model: machine::Model) -> Self {
        Self {
            id: model.id,
            coordinate: model.coordinate,
            status: model.status,
            brbs: model.brbs,
            itemtype: model.itemtype,
        }
    }
}

/// Machine with the items it sells and the location hosting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MachineResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "A1")]
    pub coordinate: String,
    pub status: bool,
    pub brbs: bool,
    #[schema(example = "snack")]
    pub itemtype: String,
    pub items: Vec<ItemSummary>,
    pub location: LocationSummary,
}

impl MachineResponse {
    pub fn new(model: machine::Model, mut items: Vec<item::Model>, location: location::Model) -> Self {
        items.sort_by_key(|i| i.id);
        Self {
            id: model.id,
            coordinate: model.coordinate,
            status: model.status,
            brbs: model.brbs,
            itemtype: model.itemtype,
            items: items.into_iter().map(ItemSummary::from).collect(),
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MachineList {
    pub machines: Vec<MachineResponse>,
}
