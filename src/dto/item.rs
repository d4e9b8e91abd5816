use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_not_blank, MachineSummary};
use crate::entities::{item, machine};

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "Pretzels")]
    pub name: String,
}

/// Item without the machines that sell it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Pretzels")]
    pub name: String,
}

impl From<item::Model> for ItemSummary {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Item with the machines currently selling it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Pretzels")]
    pub name: String,
    pub machines: Vec<MachineSummary>,
}

impl ItemResponse {
    pub fn new(model: item::Model, mut machines: Vec<machine::Model>) -> Self {
        machines.sort_by_key(|m| m.id);
        Self {
            id: model.id,
            name: model.name,
            machines: machines.into_iter().map(MachineSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<ItemResponse>,
}
