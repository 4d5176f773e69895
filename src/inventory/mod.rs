//! Inventory module - item descriptors, the player's item counts, and the
//! equipped item.

mod components;
mod items;
mod plugin;

pub use components::*;
pub use items::*;
pub use plugin::InventoryPlugin;
