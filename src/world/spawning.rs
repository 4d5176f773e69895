//! Spawning of zone contents and short-lived world effects.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use super::components::*;
use super::data::ZoneDefinition;
use crate::combat::{Enemy, Health};
use crate::core::PlaySfxEvent;
use crate::save::LoadedSave;

/// Marker for everything that belongs to the current zone.
#[derive(Component)]
pub struct ZoneEntity;

const OBJECT_SIZE: f32 = 16.0;
const ITEM_SIZE: f32 = 8.0;
const ENEMY_COLOR: Color = Color::srgb(0.8, 0.25, 0.6);
const SMASH_TIME: f32 = 0.3;
const DEBRIS_COUNT: usize = 4;
const DEBRIS_SPEED: f32 = 40.0;

/// Build a zone's objects, loose items and enemies. Returns the player
/// start position.
pub fn spawn_zone(commands: &mut Commands, zone: &ZoneDefinition, save: &LoadedSave) -> Vec2 {
    for (index, def) in zone.objects.iter().enumerate() {
        let spent = save.is_loot_spent(&zone.name, index);
        let loot = if spent { None } else { def.loot.clone() };
        let opened = def.kind == MapObjectKind::Chest && spent;
        let color = if opened { OPENED_CHEST_COLOR } else { def.kind.color() };

        let mut entity = commands.spawn((
            MapObject {
                kind: def.kind,
                loot,
                zone: zone.name.clone(),
                index,
            },
            Sprite::from_color(color, Vec2::splat(OBJECT_SIZE)),
            Transform::from_xyz(def.position.0, def.position.1, 5.0),
            RigidBody::Fixed,
            Collider::cuboid(OBJECT_SIZE / 2.0, OBJECT_SIZE / 2.0),
            ZoneEntity,
        ));

        if let Some(text) = &def.text {
            entity.insert(SignText(text.clone()));
        }
        if opened {
            entity.insert(ChestOpened);
        }
    }

    for def in &zone.items {
        spawn_world_item(
            commands,
            WorldItem::new(def.kind.clone(), def.value),
            Vec2::new(def.position.0, def.position.1),
        );
    }

    for def in &zone.enemies {
        commands.spawn((
            Enemy,
            Health::new(def.health),
            Sprite::from_color(ENEMY_COLOR, Vec2::splat(14.0)),
            Transform::from_xyz(def.position.0, def.position.1, 8.0),
            RigidBody::Fixed,
            Collider::ball(7.0),
            ZoneEntity,
        ));
    }

    info!(
        "Spawned zone '{}': {} objects, {} items, {} enemies",
        zone.name,
        zone.objects.len(),
        zone.items.len(),
        zone.enemies.len()
    );

    Vec2::new(zone.player_start.0, zone.player_start.1)
}

/// Drop a collectible that is picked up when the player walks over it.
pub fn spawn_world_item(commands: &mut Commands, item: WorldItem, position: Vec2) -> Entity {
    commands
        .spawn((
            Sprite::from_color(item.kind.color(), Vec2::splat(ITEM_SIZE)),
            item,
            Transform::from_translation(position.extend(4.0)),
            Collider::ball(ITEM_SIZE / 2.0),
            Sensor,
            ZoneEntity,
        ))
        .id()
}

/// Spawn the breaking animation for `kind` with a few scattered fragments.
pub fn spawn_smash(commands: &mut Commands, kind: &str, position: Vec3) -> Entity {
    let mut rng = rand::thread_rng();
    let velocities: Vec<Vec2> = (0..DEBRIS_COUNT)
        .map(|_| {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(0.5..1.0) * DEBRIS_SPEED;
            Vec2::from_angle(angle) * speed
        })
        .collect();

    commands
        .spawn((
            SmashEffect {
                kind: kind.to_string(),
                timer: Timer::from_seconds(SMASH_TIME, TimerMode::Once),
            },
            Transform::from_translation(position),
            Visibility::default(),
            ZoneEntity,
        ))
        .with_children(|parent| {
            for velocity in velocities {
                parent.spawn((
                    Debris { velocity },
                    Sprite::from_color(Color::srgb(0.6, 0.55, 0.45), Vec2::splat(3.0)),
                    Transform::default(),
                ));
            }
        })
        .id()
}

/// Fire a used item's effect along `velocity`.
pub fn spawn_item_effect(
    commands: &mut Commands,
    item: &str,
    position: Vec3,
    velocity: Vec2,
    lifetime: f32,
) -> Entity {
    debug!("Item effect '{}' fired", item);
    commands
        .spawn((
            ItemEffect {
                item: item.to_string(),
                velocity,
                remaining: lifetime,
            },
            Sprite::from_color(Color::srgb(1.0, 0.6, 0.2), Vec2::splat(6.0)),
            Transform::from_translation(position + Vec3::Z),
            ZoneEntity,
        ))
        .id()
}

/// Queue a sound to play after `delay` seconds.
pub fn spawn_delayed_sfx(commands: &mut Commands, sfx: crate::core::Sfx, delay: f32) {
    commands.spawn((
        DelayedSfx {
            sfx,
            timer: Timer::from_seconds(delay, TimerMode::Once),
        },
        ZoneEntity,
    ));
}

pub fn update_smash_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut SmashEffect)>,
    mut debris: Query<(&mut Transform, &Debris)>,
) {
    for (entity, mut effect) in effects.iter_mut() {
        if effect.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
    for (mut transform, piece) in debris.iter_mut() {
        transform.translation += (piece.velocity * time.delta_secs()).extend(0.0);
    }
}

pub fn update_item_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut ItemEffect)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        transform.translation += (effect.velocity * dt).extend(0.0);
        effect.remaining -= dt;
        if effect.remaining <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}

pub fn update_delayed_sfx(
    mut commands: Commands,
    time: Res<Time>,
    mut pending: Query<(Entity, &mut DelayedSfx)>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for (entity, mut delayed) in pending.iter_mut() {
        if delayed.timer.tick(time.delta()).finished() {
            sfx.send(PlaySfxEvent(delayed.sfx));
            commands.entity(entity).despawn();
        }
    }
}
