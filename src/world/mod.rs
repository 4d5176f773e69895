//! World module - map objects, loot, zone data, and the lift / throw /
//! chest interactions.

mod components;
mod data;
mod interaction;
mod loot;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{CurrentZone, ZoneDefinition};
pub use interaction::InteractionRequest;
pub use loot::{loot_entries, resolve_loot};
pub use plugin::{LoadedZone, WorldCamera, WorldPlugin};
pub use spawning::{spawn_item_effect, spawn_smash, spawn_world_item, spawn_zone, ZoneEntity};
