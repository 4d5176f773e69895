//! Combat plugin - damage and death handling.

use bevy::prelude::*;

use super::systems;
use crate::core::GameState;
use crate::player::PlayerSet;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (systems::apply_damage, systems::handle_deaths)
                .chain()
                .after(PlayerSet::Act)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
