//! Player module - player entity, controls, contacts, and movement.

mod actions;
mod components;
mod contacts;
mod movement;
mod plugin;

pub use actions::{all_in_cone, first_in_cone, interaction_for, UseAction};
pub use components::*;
pub use contacts::{classify_contact, collect_loot, ContactEvent, ContactKind, ContactShape, Contacts};
pub use movement::spawn_player;
pub use plugin::{PlayerPlugin, PlayerSet};
