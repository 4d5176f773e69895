//! World plugin - zone loading, map objects, and interaction sequences.

use bevy::prelude::*;

use crate::core::{GameState, PlayState};
use crate::player::{spawn_player, Player, PlayerConfig, PlayerSet};
use crate::save::LoadedSave;

use super::data::{CurrentZone, ZoneDefinition};
use super::interaction::{self, InteractionRequest};
use super::spawning::{self, spawn_zone, ZoneEntity};

/// Zone data loaded at startup.
#[derive(Resource, Default)]
pub struct LoadedZone(pub Option<ZoneDefinition>);

/// Marker for the gameplay camera.
#[derive(Component)]
pub struct WorldCamera;

/// World plugin - handles zone loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentZone>()
            .init_resource::<LoadedZone>()
            .add_event::<InteractionRequest>()
            .add_systems(Startup, load_zone)
            .add_systems(OnEnter(GameState::InGame), setup_zone)
            .add_systems(OnExit(GameState::InGame), cleanup_zone)
            .add_systems(
                Update,
                (
                    interaction::handle_interaction_requests,
                    interaction::resolve_tween_completions,
                )
                    .chain()
                    .after(PlayerSet::Act)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (
                    spawning::update_smash_effects,
                    spawning::update_item_effects,
                    spawning::update_delayed_sfx,
                )
                    .run_if(in_state(PlayState::Exploring)),
            )
            .add_systems(Update, follow_player.run_if(in_state(GameState::InGame)));
    }
}

fn load_zone(mut commands: Commands, current: Res<CurrentZone>) {
    commands.insert_resource(LoadedZone(ZoneDefinition::load(&current.name)));
}

/// Build the zone and the player from data.
pub fn setup_zone(
    mut commands: Commands,
    zone: Res<LoadedZone>,
    save: Res<LoadedSave>,
    config: Res<PlayerConfig>,
) {
    let Some(zone) = &zone.0 else {
        error!("No zone data loaded!");
        return;
    };

    info!("Building zone: {}", zone.name);
    let start = spawn_zone(&mut commands, zone, &save);
    spawn_player(&mut commands, start, &config, save.inventory.clone());

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / 3.0,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation(start.extend(100.0)),
        WorldCamera,
        ZoneEntity,
    ));
}

/// Keep the camera centred on the player.
fn follow_player(
    players: Query<&Transform, (With<Player>, Without<WorldCamera>)>,
    mut cameras: Query<&mut Transform, With<WorldCamera>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    for mut camera in cameras.iter_mut() {
        camera.translation.x = player.translation.x;
        camera.translation.y = player.translation.y;
    }
}

/// Clean up zone entities when leaving InGame state.
fn cleanup_zone(
    mut commands: Commands,
    zone_query: Query<Entity, With<ZoneEntity>>,
    player_query: Query<Entity, With<Player>>,
) {
    for entity in zone_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in player_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
