//! Player actions - move, attack, use, and use-item.
//!
//! Each control event is applied to the player's state here. Anything that
//! needs an animation (lifting, throwing, chests) is handed to the world
//! plugin as an `InteractionRequest`; the player is locked immediately so
//! nothing can interleave with it.

use bevy::prelude::*;

use super::components::*;
use super::contacts::Contacts;
use crate::combat::Health;
use crate::core::{
    is_in_view_cone, DamageEvent, Heading, PlayState, PlaySfxEvent, ReadSignEvent, Sfx,
};
use crate::input::ControlEvent;
use crate::inventory::{Equipped, ItemRegistry, PlayerInventory};
use crate::world::{spawn_item_effect, InteractionRequest, MapObject, MapObjectKind, SignText};

/// What pressing "use" does to a map object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseAction {
    OpenChest,
    ReadSign,
    Lift,
}

/// Decide the interaction for an object the player is facing.
pub fn interaction_for(
    kind: MapObjectKind,
    facing: Heading,
    has_gloves: bool,
    has_loot: bool,
) -> Option<UseAction> {
    match kind {
        MapObjectKind::Chest if facing == Heading::Up && has_loot => Some(UseAction::OpenChest),
        MapObjectKind::Chest => None,
        MapObjectKind::Sign if facing == Heading::Up => Some(UseAction::ReadSign),
        MapObjectKind::Sign => Some(UseAction::Lift),
        MapObjectKind::Rock if has_gloves => Some(UseAction::Lift),
        MapObjectKind::Rock => None,
        MapObjectKind::Grass | MapObjectKind::Pot => Some(UseAction::Lift),
        MapObjectKind::Mine => None,
    }
}

/// First candidate inside the view cone, in iteration order.
pub fn first_in_cone(
    origin: Vec2,
    facing: Heading,
    cone: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
) -> Option<Entity> {
    candidates
        .into_iter()
        .find(|(_, position)| is_in_view_cone(origin, facing, *position, cone))
        .map(|(entity, _)| entity)
}

/// Every candidate inside the view cone.
pub fn all_in_cone(
    origin: Vec2,
    facing: Heading,
    cone: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
) -> Vec<Entity> {
    candidates
        .into_iter()
        .filter(|(_, position)| is_in_view_cone(origin, facing, *position, cone))
        .map(|(entity, _)| entity)
        .collect()
}

/// Apply control events to the player while exploring. Events arriving in
/// any other play state are dropped so they do not replay on return.
pub fn handle_player_controls(
    mut commands: Commands,
    state: Option<Res<State<PlayState>>>,
    mut controls: EventReader<ControlEvent>,
    config: Res<PlayerConfig>,
    registry: Res<ItemRegistry>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut Facing,
            &mut MoveIntent,
            &mut PlayerAction,
            &mut Magic,
            &mut Contacts,
            &mut PlayerAnimation,
            &PlayerInventory,
            &Equipped,
        ),
        With<Player>,
    >,
    targets: Query<&Transform, (Without<Player>, With<Health>)>,
    bodies: Query<&Transform, Without<Player>>,
    objects: Query<(&MapObject, Option<&SignText>)>,
    mut damage: EventWriter<DamageEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut signs: EventWriter<ReadSignEvent>,
    mut requests: EventWriter<InteractionRequest>,
) {
    let Ok((
        player,
        transform,
        mut facing,
        mut intent,
        mut action,
        mut magic,
        mut contacts,
        mut animation,
        inventory,
        equipped,
    )) = players.get_single_mut()
    else {
        return;
    };
    if state.as_deref().map(State::get) != Some(&PlayState::Exploring) {
        controls.clear();
        return;
    }
    let origin = transform.translation.truncate();

    for control in controls.read() {
        match *control {
            ControlEvent::Direction { heading, value, active } => {
                steer(&mut intent, &mut facing, &mut animation, heading, value, active);
            }
            ControlEvent::Axis { heading, value } => {
                steer(&mut intent, &mut facing, &mut animation, heading, value, true);
            }

            ControlEvent::Attack(active) => {
                let has_sword = inventory.has("sword");
                if !active {
                    if has_sword {
                        action.release_attack();
                    }
                    continue;
                }
                if !action.try_begin_attack(has_sword, config.attack_duration) {
                    continue;
                }

                animation.dirty = true;
                intent.dirty = true;
                sfx.send(PlaySfxEvent(Sfx::Sword));

                let candidates = contacts
                    .in_attack_range
                    .iter()
                    .rev()
                    .filter_map(|e| targets.get(*e).ok().map(|t| (*e, t.translation.truncate())));
                for target in all_in_cone(origin, facing.0, config.attack_cone, candidates) {
                    damage.send(DamageEvent {
                        target,
                        source: player,
                        amount: config.attack_damage,
                    });
                }
            }

            ControlEvent::Use(active) => {
                if !active || action.is_locked() {
                    continue;
                }

                if let Some(item) = action.carried() {
                    *action = PlayerAction::Free;
                    animation.dirty = true;
                    requests.send(InteractionRequest::Throw { player, item, heading: facing.0 });
                    continue;
                }

                // the first thing faced decides, even if it cannot be used
                let candidates = contacts
                    .colliding
                    .iter()
                    .filter_map(|e| bodies.get(*e).ok().map(|t| (*e, t.translation.truncate())));
                let Some(target) = first_in_cone(origin, facing.0, config.use_cone, candidates) else {
                    continue;
                };
                let Ok((object, sign_text)) = objects.get(target) else {
                    continue;
                };

                match interaction_for(object.kind, facing.0, inventory.has("gloves"), object.has_loot()) {
                    Some(UseAction::OpenChest) => {
                        *action = PlayerAction::Opening { chest: target };
                        intent.dirty = true;
                        requests.send(InteractionRequest::OpenChest { player, chest: target });
                    }
                    Some(UseAction::ReadSign) => {
                        signs.send(ReadSignEvent {
                            sign: target,
                            text: sign_text.map(|t| t.0.clone()).unwrap_or_default(),
                        });
                    }
                    Some(UseAction::Lift) => {
                        *action = PlayerAction::Lifting { target };
                        contacts.forget(target);
                        intent.dirty = true;
                        animation.dirty = true;
                        requests.send(InteractionRequest::Lift { player, target });
                    }
                    None => {}
                }
            }

            ControlEvent::UseItem(active) => {
                // items fire on release
                if active {
                    continue;
                }

                let descriptor = equipped.0.as_deref().and_then(|name| registry.get(name));
                let Some(descriptor) = descriptor else {
                    sfx.send(PlaySfxEvent(Sfx::Error));
                    continue;
                };
                if !magic.spend(descriptor.cost) {
                    sfx.send(PlaySfxEvent(Sfx::Error));
                    continue;
                }

                spawn_item_effect(
                    &mut commands,
                    &descriptor.name,
                    transform.translation,
                    facing.0.vector() * config.item_effect_speed,
                    config.item_effect_lifetime,
                );
            }

            ControlEvent::ToggleInventory => {}
        }
    }
}

/// Apply a direction press, release or strength change.
fn steer(
    intent: &mut MoveIntent,
    facing: &mut Facing,
    animation: &mut PlayerAnimation,
    heading: Heading,
    value: f32,
    active: bool,
) {
    if intent.set(heading, value, active) {
        animation.dirty = true;
    }
    let new_facing = intent.evaluate_facing(facing.0);
    if new_facing != facing.0 {
        facing.0 = new_facing;
        animation.dirty = true;
    }
}

/// End sword swings once their duration elapses.
pub fn update_attack_timer(
    time: Res<Time>,
    mut players: Query<(&mut PlayerAction, &mut PlayerAnimation, &mut MoveIntent), With<Player>>,
) {
    for (mut action, mut animation, mut intent) in players.iter_mut() {
        if action.tick_attack(time.delta_secs()) {
            animation.dirty = true;
            intent.dirty = true;
        }
    }
}

/// Re-evaluate the animation name when something changed.
pub fn update_player_animation(
    mut players: Query<
        (&PlayerAction, &MoveIntent, &Facing, &PlayerInventory, &mut PlayerAnimation),
        With<Player>,
    >,
) {
    for (action, intent, facing, inventory, mut animation) in players.iter_mut() {
        if !animation.dirty {
            continue;
        }
        animation.dirty = false;

        let name = animation_name(action, intent.is_moving(), facing.0, inventory.has("shield"));
        if name != animation.current {
            debug!("Player animation: {}", name);
            animation.current = name;
        }
    }
}
