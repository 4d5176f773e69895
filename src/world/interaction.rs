//! Chest, lift and throw sequences.
//!
//! The player systems decide *what* to do and lock the player; the systems
//! here play the sequence out. Each sequence is a tween whose completion
//! event carries the step that follows it.

use bevy::prelude::*;
use bevy_rapier2d::prelude::Sensor;

use super::components::*;
use super::loot::resolve_loot;
use super::spawning::{spawn_delayed_sfx, spawn_smash, spawn_world_item, ZoneEntity};
use crate::combat::Health;
use crate::core::{
    Heading, InventoryChangedEvent, PlaySfxEvent, Sfx, Tween, TweenAction, TweenCompleted,
};
use crate::inventory::PlayerInventory;
use crate::player::{collect_loot, Magic, Player, PlayerAction, PlayerAnimation, PlayerConfig};
use crate::save::LoadedSave;

/// Reveal sprite rises this far out of the chest.
const REVEAL_RISE: f32 = 5.0;

/// A sequence the player has committed to.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionRequest {
    OpenChest { player: Entity, chest: Entity },
    Lift { player: Entity, target: Entity },
    Throw { player: Entity, item: Entity, heading: Heading },
}

/// Start the animation for each interaction request.
pub fn handle_interaction_requests(
    mut commands: Commands,
    mut requests: EventReader<InteractionRequest>,
    config: Res<PlayerConfig>,
    mut save: ResMut<LoadedSave>,
    mut players: Query<(&Transform, &mut PlayerAction, &PlayerInventory), With<Player>>,
    mut objects: Query<(&Transform, &mut MapObject, &mut Sprite), Without<Player>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for request in requests.read() {
        match *request {
            InteractionRequest::OpenChest { player, chest } => {
                let Ok((_, mut action, inventory)) = players.get_mut(player) else {
                    continue;
                };
                let Ok((chest_transform, mut object, mut sprite)) = objects.get_mut(chest) else {
                    *action = PlayerAction::Free;
                    continue;
                };

                let granted = object
                    .loot
                    .as_deref()
                    .and_then(|loot| resolve_loot(loot, inventory))
                    .map(str::to_string);
                let Some(granted) = granted else {
                    *action = PlayerAction::Free;
                    continue;
                };

                info!("Opened chest {} in '{}': {}", object.index, object.zone, granted);
                object.loot = None;
                save.update_zone_data(&object.zone, object.index, None);
                sprite.color = OPENED_CHEST_COLOR;
                commands.entity(chest).insert(ChestOpened);
                sfx.send(PlaySfxEvent(Sfx::ChestOpen));

                let item = WorldItem::new(LootKind::from_name(&granted), 1);
                let start = chest_transform.translation + Vec3::new(0.0, REVEAL_RISE, 1.0);
                commands.spawn((
                    Sprite::from_color(item.kind.color(), Vec2::splat(8.0)),
                    RevealedLoot(item),
                    Transform::from_translation(start),
                    Tween::translation(start, start + Vec3::Y * REVEAL_RISE, config.chest_reveal_time)
                        .on_complete(TweenAction::GrantLoot { player }),
                    ZoneEntity,
                ));
                spawn_delayed_sfx(&mut commands, Sfx::ItemFanfare, config.fanfare_delay);
            }

            InteractionRequest::Lift { player, target } => {
                let Ok((player_transform, mut action, inventory)) = players.get_mut(player) else {
                    continue;
                };
                let Ok((transform, mut object, _)) = objects.get_mut(target) else {
                    *action = PlayerAction::Free;
                    continue;
                };

                if let Some(loot) = object.loot.take() {
                    if let Some(name) = resolve_loot(&loot, inventory) {
                        spawn_world_item(
                            &mut commands,
                            WorldItem::new(LootKind::from_name(name), 1),
                            transform.translation.truncate(),
                        );
                    }
                    save.update_zone_data(&object.zone, object.index, None);
                }

                let mut to = player_transform.translation + config.carry_offset();
                to.z = player_transform.translation.z + 1.0;
                commands.entity(target).insert((
                    Sensor,
                    Tween::translation(transform.translation, to, config.lift_time)
                        .on_complete(TweenAction::FinishLift { player }),
                ));
                sfx.send(PlaySfxEvent(Sfx::Lift));
            }

            InteractionRequest::Throw { item, heading, .. } => {
                let Ok((transform, _, _)) = objects.get(item) else {
                    continue;
                };
                let to = transform.translation + config.throw_offset(heading);
                commands.entity(item).insert(
                    Tween::translation(transform.translation, to, config.throw_time)
                        .on_complete(TweenAction::Smash),
                );
                sfx.send(PlaySfxEvent(Sfx::Throw));
            }
        }
    }
}

/// Continue sequences whose tween just ended.
pub fn resolve_tween_completions(
    mut commands: Commands,
    mut completed: EventReader<TweenCompleted>,
    mut players: Query<
        (
            &mut PlayerAction,
            &mut PlayerAnimation,
            &mut PlayerInventory,
            &mut Magic,
            &mut Health,
        ),
        With<Player>,
    >,
    objects: Query<(&Transform, &MapObject)>,
    reveals: Query<&RevealedLoot>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut inventory_changed: EventWriter<InventoryChangedEvent>,
) {
    for done in completed.read() {
        match done.action {
            TweenAction::FinishLift { player } => {
                let lifting = players
                    .get_mut(player)
                    .ok()
                    .filter(|(action, ..)| **action == PlayerAction::Lifting { target: done.entity });
                if let Some((mut action, mut animation, ..)) = lifting {
                    *action = PlayerAction::Carrying { item: done.entity };
                    animation.dirty = true;
                } else if let Ok((transform, object)) = objects.get(done.entity) {
                    // lift was interrupted, nobody to hand it to
                    spawn_smash(&mut commands, object.kind.as_str(), transform.translation);
                    commands.entity(done.entity).despawn_recursive();
                }
            }

            TweenAction::Smash => {
                let Ok((transform, object)) = objects.get(done.entity) else {
                    continue;
                };
                spawn_smash(&mut commands, object.kind.as_str(), transform.translation);
                sfx.send(PlaySfxEvent(Sfx::Smash));
                commands.entity(done.entity).despawn_recursive();
            }

            TweenAction::GrantLoot { player } => {
                let Ok(RevealedLoot(item)) = reveals.get(done.entity) else {
                    continue;
                };
                if let Ok((mut action, mut animation, mut inventory, mut magic, mut health)) =
                    players.get_mut(player)
                {
                    if collect_loot(item, &mut inventory, &mut magic, &mut health) {
                        inventory_changed.send(InventoryChangedEvent);
                    }
                    if matches!(*action, PlayerAction::Opening { .. }) {
                        *action = PlayerAction::Free;
                        animation.dirty = true;
                    }
                }
                commands.entity(done.entity).despawn_recursive();
            }

            TweenAction::None | TweenAction::InventorySlide { .. } => {}
        }
    }
}
