//! Contact tracking - which entities are in sword range and which are
//! being pushed against.
//!
//! Rapier collision events are translated into `ContactEvent`s first, so
//! the gameplay side only sees "this player's body / attack sensor began or
//! stopped touching that entity".

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::combat::Health;
use crate::core::{is_in_view_cone, DamageEvent, InventoryChangedEvent, PlaySfxEvent, Sfx};
use crate::inventory::PlayerInventory;
use crate::world::{LootKind, WorldItem};

/// Which of the player's shapes took part in a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactShape {
    /// The solid body circle.
    Body,
    /// The larger sword-range sensor circle.
    AttackSensor,
}

/// A contact between one of the player's shapes and another entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactEvent {
    pub player: Entity,
    pub other: Entity,
    pub shape: ContactShape,
    pub began: bool,
}

/// Entities currently touching the player, in the order they arrived.
#[derive(Component, Debug, Default, Clone)]
pub struct Contacts {
    /// Damageable entities inside the attack sensor.
    pub in_attack_range: Vec<Entity>,
    /// Solid entities touching the body.
    pub colliding: Vec<Entity>,
}

/// How a contact should be tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    AttackRange,
    Colliding,
    Loot,
    Ignored,
}

/// Classify a contact from the shape involved and what the other entity is.
pub fn classify_contact(shape: ContactShape, damageable: bool, solid: bool, loot: bool) -> ContactKind {
    match shape {
        ContactShape::AttackSensor if damageable => ContactKind::AttackRange,
        ContactShape::AttackSensor => ContactKind::Ignored,
        ContactShape::Body if solid => ContactKind::Colliding,
        ContactShape::Body if loot => ContactKind::Loot,
        ContactShape::Body => ContactKind::Ignored,
    }
}

impl Contacts {
    pub fn begin(&mut self, kind: ContactKind, entity: Entity) {
        let list = match kind {
            ContactKind::AttackRange => &mut self.in_attack_range,
            ContactKind::Colliding => &mut self.colliding,
            _ => return,
        };
        if !list.contains(&entity) {
            list.push(entity);
        }
    }

    pub fn end(&mut self, shape: ContactShape, entity: Entity) {
        let list = match shape {
            ContactShape::AttackSensor => &mut self.in_attack_range,
            ContactShape::Body => &mut self.colliding,
        };
        list.retain(|e| *e != entity);
    }

    /// Drop `entity` from both lists.
    pub fn forget(&mut self, entity: Entity) {
        self.in_attack_range.retain(|e| *e != entity);
        self.colliding.retain(|e| *e != entity);
    }
}

/// Translate rapier collision events into player contact events.
pub fn translate_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    players: Query<Entity, With<Player>>,
    sensors: Query<&Parent, With<AttackSensor>>,
    mut contacts: EventWriter<ContactEvent>,
) {
    for event in collisions.read() {
        let (a, b, began) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };

        for (own, other) in [(a, b), (b, a)] {
            let (player, shape) = if players.contains(own) {
                (own, ContactShape::Body)
            } else if let Ok(parent) = sensors.get(own) {
                (parent.get(), ContactShape::AttackSensor)
            } else {
                continue;
            };

            if other == player || sensors.contains(other) {
                continue;
            }

            contacts.send(ContactEvent { player, other, shape, began });
        }
    }
}

/// Apply contact events to the player's contact lists, collecting loot on
/// touch and hitting new arrivals mid-swing.
pub fn track_contacts(
    mut commands: Commands,
    mut events: EventReader<ContactEvent>,
    config: Res<PlayerConfig>,
    mut players: Query<
        (
            &Transform,
            &Facing,
            &PlayerAction,
            &mut Contacts,
            &mut PlayerInventory,
            &mut Magic,
            &mut Health,
        ),
        With<Player>,
    >,
    others: Query<(&Transform, Has<Health>, Has<Sensor>), Without<Player>>,
    items: Query<&WorldItem>,
    mut damage: EventWriter<DamageEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut inventory_changed: EventWriter<InventoryChangedEvent>,
) {
    let mut collected = HashSet::new();

    for event in events.read() {
        let Ok((transform, facing, action, mut contacts, mut inventory, mut magic, mut health)) =
            players.get_mut(event.player)
        else {
            continue;
        };

        if !event.began {
            contacts.end(event.shape, event.other);
            continue;
        }

        let Ok((other_transform, damageable, is_sensor)) = others.get(event.other) else {
            continue;
        };
        let item = items.get(event.other).ok();

        match classify_contact(event.shape, damageable, !is_sensor, item.is_some()) {
            ContactKind::AttackRange => {
                contacts.begin(ContactKind::AttackRange, event.other);

                // something new walked in while we were attacking
                if action.is_attacking()
                    && is_in_view_cone(
                        transform.translation.truncate(),
                        facing.0,
                        other_transform.translation.truncate(),
                        config.attack_cone,
                    )
                {
                    damage.send(DamageEvent {
                        target: event.other,
                        source: event.player,
                        amount: config.attack_damage,
                    });
                }
            }
            ContactKind::Colliding => contacts.begin(ContactKind::Colliding, event.other),
            ContactKind::Loot => {
                let Some(item) = item else { continue };
                if !collected.insert(event.other) {
                    continue;
                }

                if collect_loot(item, &mut inventory, &mut magic, &mut health) {
                    inventory_changed.send(InventoryChangedEvent);
                }
                sfx.send(PlaySfxEvent(Sfx::Pickup));
                commands.entity(event.other).despawn_recursive();
            }
            ContactKind::Ignored => {}
        }
    }
}

/// Apply a picked-up world item. Returns true if inventory counts changed.
pub fn collect_loot(
    item: &WorldItem,
    inventory: &mut PlayerInventory,
    magic: &mut Magic,
    health: &mut Health,
) -> bool {
    match &item.kind {
        LootKind::Heart => {
            health.heal(1.0);
            false
        }
        LootKind::Magic => {
            magic.restore(item.value);
            false
        }
        other => {
            inventory.add(other.inventory_key(), item.value);
            true
        }
    }
}

/// Remove despawned entities from every player's contact lists.
pub fn prune_contacts(mut players: Query<&mut Contacts>, entities: Query<Entity>) {
    for mut contacts in players.iter_mut() {
        contacts.in_attack_range.retain(|e| entities.contains(*e));
        contacts.colliding.retain(|e| entities.contains(*e));
    }
}
