use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_not_blank, MachineSummary};
use crate::entities::{location, machine};

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateLocationRequest {
    /// Name of the site
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "Baker Hall")]
    pub location: String,
}

/// Location without its machines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Baker Hall")]
    pub location: String,
}

impl From<location::Model> for LocationSummary {
    fn from(model: location::Model) -> Self {
        Self {
            id: model.id,
            location: model.location,
        }
    }
}

/// Location with the machines it hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Baker Hall")]
    pub location: String,
    pub machines: Vec<MachineSummary>,
}

impl LocationResponse {
    pub fn new(model: location::Model, mut machines: Vec<machine::Model>) -> Self {
        machines.sort_by_key(|m| m.id);
        Self {
            id: model.id,
            location: model.location,
            machines: machines.into_iter().map(MachineSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationList {
    pub locations: Vec<LocationResponse>,
}
