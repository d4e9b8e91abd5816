//! Request and response shapes exchanged over HTTP.
//!
//! Every entity has two serialized forms: a `*Response` that embeds related
//! entities, and a scalar-only `*Summary` used for the embedded copies. The
//! split keeps machine/item/location serialization from recursing.

pub mod item;
pub mod location;
pub mod machine;

pub use item::{CreateItemRequest, ItemList, ItemResponse, ItemSummary};
pub use location::{CreateLocationRequest, LocationList, LocationResponse, LocationSummary};
pub use machine::{
    CreateMachineRequest, ItemAction, MachineList, MachineResponse, MachineSummary,
    UpdateMachineItemsRequest, UpdateMachineStatusRequest,
};

use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}
