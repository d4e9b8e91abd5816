//! Database entities for the vending inventory store.
//!
//! `locations` own `machines`; `machines` and `items` are linked through the
//! `machine_items` junction table.

pub mod item;
pub mod location;
pub mod machine;
pub mod machine_item;

pub use item::Entity as Item;
pub use location::Entity as Location;
pub use machine::Entity as Machine;
pub use machine_item::Entity as MachineItem;
