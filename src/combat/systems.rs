//! Combat systems - damage application and death handling.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::*;
use crate::core::{DamageEvent, DeathEvent, PlaySfxEvent, Sfx};
use crate::player::Player;
use crate::world::spawn_smash;

/// Apply damage to entities.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Has<Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };
        if dead {
            continue;
        }

        health.take_damage(event.amount);
        debug!("{:?} took {} damage ({} left)", event.target, event.amount, health.current);

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Break dead creatures apart; refill the player instead of ending the game.
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut players: Query<&mut Health, With<Player>>,
    others: Query<&Transform, Without<Player>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in death_events.read() {
        if let Ok(mut health) = players.get_mut(event.entity) {
            warn!("Player fell, refilling health");
            health.current = health.maximum;
            commands.entity(event.entity).remove::<Dead>();
            continue;
        }

        if let Ok(transform) = others.get(event.entity) {
            spawn_smash(&mut commands, "enemy", transform.translation);
            sfx.send(PlaySfxEvent(Sfx::Smash));
        }
        commands.entity(event.entity).despawn_recursive();
    }
}
