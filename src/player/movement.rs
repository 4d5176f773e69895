//! Top-down movement, carrying, and player spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::contacts::Contacts;
use crate::combat::Health;
use crate::core::Heading;
use crate::inventory::{Equipped, PlayerInventory};

/// Player body colour until sprite sheets are wired in.
const PLAYER_COLOR: Color = Color::srgb(0.2, 0.6, 0.25);

/// Set velocity from movement intent. Locked players stand still.
pub fn apply_movement(
    config: Res<PlayerConfig>,
    mut players: Query<(&mut MoveIntent, &PlayerAction, &mut Velocity), With<Player>>,
) {
    for (mut intent, action, mut velocity) in players.iter_mut() {
        if action.is_locked() {
            velocity.linvel = Vec2::ZERO;
            // recompute as soon as the lock is released
            intent.dirty = true;
            continue;
        }

        if !intent.dirty {
            continue;
        }
        intent.dirty = false;
        velocity.linvel = intent.velocity(config.move_speed);
    }
}

/// Drop held directions and stop when gameplay is interrupted, so releases
/// consumed by a menu do not leave the player walking.
pub fn halt_player(mut players: Query<(&mut MoveIntent, &mut Velocity), With<Player>>) {
    for (mut intent, mut velocity) in players.iter_mut() {
        for heading in Heading::CARDINALS {
            intent.set(heading, 0.0, false);
        }
        velocity.linvel = Vec2::ZERO;
    }
}

/// Keep a carried object above the player's head.
pub fn follow_carried(
    config: Res<PlayerConfig>,
    players: Query<(&Transform, &PlayerAction), With<Player>>,
    mut carried: Query<&mut Transform, Without<Player>>,
) {
    for (transform, action) in players.iter() {
        let Some(item) = action.carried() else {
            continue;
        };
        if let Ok(mut item_transform) = carried.get_mut(item) {
            let z = item_transform.translation.z;
            item_transform.translation = transform.translation + config.carry_offset();
            item_transform.translation.z = z;
        }
    }
}

/// Spawn the player entity with its attack sensor.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    config: &PlayerConfig,
    inventory: PlayerInventory,
) -> Entity {
    let player = commands
        .spawn((
            Player,
            Facing(Heading::Down),
            MoveIntent::default(),
            PlayerAction::default(),
            Magic::new(config.max_magic),
            Health::new(config.max_health),
            Contacts::default(),
            PlayerAnimation {
                dirty: true,
                ..default()
            },
            inventory,
            Equipped::default(),
            Sprite::from_color(PLAYER_COLOR, Vec2::new(16.0, config.height)),
            Transform::from_translation(position.extend(10.0)),
            // Rapier physics components
            RigidBody::Dynamic,
            Collider::ball(config.body_radius),
            LockedAxes::ROTATION_LOCKED,
            GravityScale(0.0),
            Velocity::zero(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            AttackSensor,
            Collider::ball(config.attack_sensor_radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_xyz(0.0, -4.0, 0.0),
        ));
    });

    info!("Spawned player at ({}, {})", position.x, position.y);
    player
}
