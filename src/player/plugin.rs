//! Player plugin - controls, movement, contacts and animation state.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier2d::plugin::PhysicsSet;

use super::actions;
use super::components::*;
use super::contacts::{self, ContactEvent};
use super::movement;
use crate::core::{GameState, PlayState};
use crate::input::ControlSet;

/// System set ordering for the player.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    /// Contact bookkeeping from the previous physics step.
    Contacts,
    /// Control events applied to the player's state.
    Act,
    /// Velocity and animation derived from the new state.
    Apply,
}

/// Player plugin - handles player controls, movement, and contacts.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_event::<ContactEvent>()
            .add_systems(Startup, load_player_config)
            .configure_sets(
                Update,
                (PlayerSet::Contacts, PlayerSet::Act, PlayerSet::Apply)
                    .chain()
                    .after(ControlSet)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (
                    contacts::translate_collision_events,
                    contacts::track_contacts,
                    contacts::prune_contacts,
                )
                    .chain()
                    .in_set(PlayerSet::Contacts),
            )
            .add_systems(
                Update,
                (
                    actions::handle_player_controls,
                    actions::update_attack_timer.run_if(in_state(PlayState::Exploring)),
                )
                    .chain()
                    .in_set(PlayerSet::Act),
            )
            .add_systems(
                Update,
                (movement::apply_movement, actions::update_player_animation).in_set(PlayerSet::Apply),
            )
            .add_systems(OnExit(PlayState::Exploring), movement::halt_player)
            .add_systems(
                PostUpdate,
                movement::follow_carried
                    .after(PhysicsSet::Writeback)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

/// Load player tuning at startup.
fn load_player_config(mut commands: Commands) {
    commands.insert_resource(PlayerConfig::load());
}
