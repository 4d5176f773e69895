//! Lightworld - a top-down action adventure in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, directions, tweening
//! - **Input**: Keyboard and gamepad mapped to control events
//! - **Inventory**: Item descriptors, item counts, equipped item
//! - **Player**: Interaction state machine, contacts, movement
//! - **Combat**: Health, damage, death
//! - **World**: Zones, map objects, chests, lift / throw, effects
//! - **Save**: Spent loot and inventory persistence
//! - **UI**: HUD, inventory screen, sign dialogue, pause overlay
//! - **Audio**: Sound effects

pub mod audio;
pub mod combat;
pub mod core;
pub mod data;
pub mod input;
pub mod inventory;
pub mod player;
pub mod save;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Gameplay plugins that run without a window, audio or renderer.
pub struct LightworldCorePlugin;

impl Plugin for LightworldCorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(input::ControlsPlugin)
            .add_plugins(inventory::InventoryPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(world::WorldPlugin)
            .add_plugins(save::SavePlugin);
    }
}

/// Main game plugin that adds all sub-plugins.
pub struct LightworldPlugin;

impl Plugin for LightworldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(LightworldCorePlugin)
            .add_plugins(ui::UiPlugin)
            .add_plugins(audio::AudioFxPlugin);
    }
}
