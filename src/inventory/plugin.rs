//! Inventory plugin - loads the shared item descriptor table.

use bevy::prelude::*;

use super::items::ItemRegistry;

/// Inventory plugin - owns the `ItemRegistry` resource.
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemRegistry>()
            .add_systems(Startup, load_item_registry);
    }
}

/// Load item descriptors at startup.
fn load_item_registry(mut commands: Commands) {
    commands.insert_resource(ItemRegistry::load());
}
