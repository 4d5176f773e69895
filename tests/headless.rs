//! Headless integration tests for Lightworld.
//!
//! These tests run the gameplay plugins without a window, renderer, audio
//! or physics backend. Contacts are injected as `ContactEvent`s and time
//! advances in fixed steps so tweens finish deterministically.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::{CollisionEvent, Sensor};

use lightworld::combat::{Enemy, Health};
use lightworld::core::{Heading, InventoryChangedEvent, PlaySfxEvent, PlayState, Sfx};
use lightworld::input::ControlEvent;
use lightworld::inventory::{Equipped, PlayerInventory};
use lightworld::player::{ContactEvent, ContactShape, Facing, Magic, Player, PlayerAction};
use lightworld::save::{LoadedSave, SaveSettings};
use lightworld::world::{
    ChestOpened, ItemEffect, LootKind, MapObject, MapObjectKind, SmashEffect, WorldItem,
    ZoneEntity, OPENED_CHEST_COLOR,
};
use lightworld::LightworldCorePlugin;

const STEP: f32 = 1.0 / 60.0;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the gameplay app from `save` and enters the game with the
/// default zone in place.
fn build_app_with_save(save: LoadedSave) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(StatesPlugin)
        .add_plugins(InputPlugin)
        .add_event::<CollisionEvent>()
        .insert_resource(SaveSettings {
            enabled: false,
            ..default()
        })
        .insert_resource(save)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(STEP)))
        .add_plugins(LightworldCorePlugin);

    let mut player = None;
    for _ in 0..5 {
        app.update();
        player = app
            .world_mut()
            .query_filtered::<Entity, With<Player>>()
            .iter(app.world())
            .next();
        if player.is_some() {
            break;
        }
    }
    let player = player.expect("player should spawn on entering the game");
    (app, player)
}

/// Builds the gameplay app, enters the game, and clears the zone so each
/// test places exactly the objects it needs.
fn build_test_app() -> (App, Entity) {
    let (mut app, player) = build_app_with_save(LoadedSave::default());

    let zone: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, (With<ZoneEntity>, Without<Camera>)>()
        .iter(app.world())
        .collect();
    for entity in zone {
        app.world_mut().entity_mut(entity).despawn_recursive();
    }

    let mut entity = app.world_mut().entity_mut(player);
    entity.insert(Transform::from_xyz(0.0, 0.0, 10.0));
    app.update();

    (app, player)
}

fn spawn_object(app: &mut App, kind: MapObjectKind, position: Vec2, loot: Option<&str>) -> Entity {
    app.world_mut()
        .spawn((
            MapObject {
                kind,
                loot: loot.map(str::to_string),
                zone: "test".into(),
                index: 7,
            },
            Sprite::default(),
            Transform::from_translation(position.extend(5.0)),
            ZoneEntity,
        ))
        .id()
}

fn touch(app: &mut App, player: Entity, other: Entity, shape: ContactShape) {
    app.world_mut().send_event(ContactEvent {
        player,
        other,
        shape,
        began: true,
    });
    app.update();
}

fn untouch(app: &mut App, player: Entity, other: Entity, shape: ContactShape) {
    app.world_mut().send_event(ContactEvent {
        player,
        other,
        shape,
        began: false,
    });
    app.update();
}

fn spawn_enemy(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((Enemy, Health::new(1.0), Transform::from_translation(position.extend(8.0)), ZoneEntity))
        .id()
}

fn set_play_state(app: &mut App, state: PlayState) {
    app.world_mut().resource_mut::<NextState<PlayState>>().set(state);
    app.update();
}

fn control(app: &mut App, event: ControlEvent) {
    app.world_mut().send_event(event);
    app.update();
}

fn press(app: &mut App, make: fn(bool) -> ControlEvent) {
    control(app, make(true));
    control(app, make(false));
}

fn run_for(app: &mut App, seconds: f32) {
    let frames = (seconds / STEP).ceil() as usize + 2;
    for _ in 0..frames {
        app.update();
    }
}

fn set_facing(app: &mut App, player: Entity, heading: Heading) {
    app.world_mut().entity_mut(player).insert(Facing(heading));
}

fn give(app: &mut App, player: Entity, item: &str, count: u32) {
    app.world_mut()
        .get_mut::<PlayerInventory>(player)
        .unwrap()
        .set(item, count);
}

fn action(app: &App, player: Entity) -> PlayerAction {
    app.world().get::<PlayerAction>(player).unwrap().clone()
}

fn sfx_sent(app: &App) -> Vec<Sfx> {
    app.world()
        .resource::<Events<PlaySfxEvent>>()
        .iter_current_update_events()
        .map(|e| e.0)
        .collect()
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, F>()
        .iter(app.world())
        .count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Chests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_chest_grants_loot_after_reveal() {
    let (mut app, player) = build_test_app();
    give(&mut app, player, "bow", 1);
    let chest = spawn_object(&mut app, MapObjectKind::Chest, Vec2::new(0.0, 12.0), Some("bow,boomerang,rupees"));
    set_facing(&mut app, player, Heading::Up);
    touch(&mut app, player, chest, ContactShape::Body);

    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Opening { chest });
    assert!(app.world().get::<ChestOpened>(chest).is_some());
    assert!(app.world().get::<MapObject>(chest).unwrap().loot.is_none());
    assert!(app.world().resource::<LoadedSave>().is_loot_spent("test", 7));

    // still revealing: nothing granted, player locked
    run_for(&mut app, 0.5);
    assert_eq!(app.world().get::<PlayerInventory>(player).unwrap().count("boomerang"), 0);
    assert!(action(&app, player).is_locked());

    let mut changed = 0;
    for _ in 0..80 {
        app.update();
        changed += app
            .world()
            .resource::<Events<InventoryChangedEvent>>()
            .iter_current_update_events()
            .count();
    }
    assert_eq!(app.world().get::<PlayerInventory>(player).unwrap().count("boomerang"), 1);
    assert_eq!(action(&app, player), PlayerAction::Free);
    assert!(changed > 0, "granting loot announces the inventory change");
}

#[test]
fn test_paused_world_holds_the_chest_reveal() {
    let (mut app, player) = build_test_app();
    let chest = spawn_object(&mut app, MapObjectKind::Chest, Vec2::new(0.0, 12.0), Some("lantern"));
    set_facing(&mut app, player, Heading::Up);
    touch(&mut app, player, chest, ContactShape::Body);
    control(&mut app, ControlEvent::Use(true));

    set_play_state(&mut app, PlayState::Paused);
    run_for(&mut app, 3.0);
    assert_eq!(app.world().get::<PlayerInventory>(player).unwrap().count("lantern"), 0);
    assert!(action(&app, player).is_locked());

    set_play_state(&mut app, PlayState::Exploring);
    run_for(&mut app, 1.6);
    assert_eq!(app.world().get::<PlayerInventory>(player).unwrap().count("lantern"), 1);
    assert_eq!(action(&app, player), PlayerAction::Free);
}

#[test]
fn test_zone_spawn_applies_spent_loot_from_save() {
    let mut save = LoadedSave::default();
    save.update_zone_data("lightworld", 0, None);
    save.update_zone_data("lightworld", 3, None);
    let (mut app, _player) = build_app_with_save(save);

    let objects: Vec<(Entity, MapObject)> = app
        .world_mut()
        .query::<(Entity, &MapObject)>()
        .iter(app.world())
        .map(|(entity, object)| (entity, object.clone()))
        .collect();
    let object = |index: usize| {
        objects
            .iter()
            .find(|(_, object)| object.index == index)
            .cloned()
            .expect("zone object should exist")
    };

    let (spent_chest, chest) = object(0);
    assert_eq!(chest.kind, MapObjectKind::Chest);
    assert!(chest.loot.is_none());
    assert!(app.world().get::<ChestOpened>(spent_chest).is_some());
    assert_eq!(app.world().get::<Sprite>(spent_chest).unwrap().color, OPENED_CHEST_COLOR);

    let (_, pot) = object(3);
    assert_eq!(pot.kind, MapObjectKind::Pot);
    assert!(pot.loot.is_none());

    let (fresh_chest, chest) = object(1);
    assert!(chest.loot.is_some());
    assert!(app.world().get::<ChestOpened>(fresh_chest).is_none());
}

#[test]
fn test_chest_needs_player_facing_up() {
    let (mut app, player) = build_test_app();
    let chest = spawn_object(&mut app, MapObjectKind::Chest, Vec2::new(12.0, 0.0), Some("lantern"));
    set_facing(&mut app, player, Heading::Right);
    touch(&mut app, player, chest, ContactShape::Body);

    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Free);
    assert!(app.world().get::<ChestOpened>(chest).is_none());
}

#[test]
fn test_empty_chest_does_nothing() {
    let (mut app, player) = build_test_app();
    let chest = spawn_object(&mut app, MapObjectKind::Chest, Vec2::new(0.0, 12.0), None);
    set_facing(&mut app, player, Heading::Up);
    touch(&mut app, player, chest, ContactShape::Body);

    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Free);
}

// ─────────────────────────────────────────────────────────────────────────────
// Lift / carry / throw
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lift_carry_throw_smash() {
    let (mut app, player) = build_test_app();
    give(&mut app, player, "sword", 1);
    let pot = spawn_object(&mut app, MapObjectKind::Pot, Vec2::new(0.0, -12.0), Some("heart"));
    set_facing(&mut app, player, Heading::Down);
    touch(&mut app, player, pot, ContactShape::Body);

    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Lifting { target: pot });
    assert!(app.world().get::<Sensor>(pot).is_some());
    assert_eq!(count::<With<WorldItem>>(&mut app), 1, "pot loot dropped");

    // use is ignored while the lift is in flight
    control(&mut app, ControlEvent::Use(false));
    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Lifting { target: pot });

    run_for(&mut app, 0.2);
    assert_eq!(action(&app, player), PlayerAction::Carrying { item: pot });

    // no sword swings while carrying
    control(&mut app, ControlEvent::Attack(true));
    assert_eq!(action(&app, player), PlayerAction::Carrying { item: pot });
    control(&mut app, ControlEvent::Attack(false));

    control(&mut app, ControlEvent::Use(false));
    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Free);

    run_for(&mut app, 0.3);
    assert!(app.world().get_entity(pot).is_err(), "thrown pot should break");
    assert_eq!(count::<With<SmashEffect>>(&mut app), 1);
}

#[test]
fn test_rock_needs_gloves() {
    let (mut app, player) = build_test_app();
    let rock = spawn_object(&mut app, MapObjectKind::Rock, Vec2::new(12.0, 0.0), None);
    set_facing(&mut app, player, Heading::Right);
    touch(&mut app, player, rock, ContactShape::Body);

    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Free);

    give(&mut app, player, "gloves", 1);
    control(&mut app, ControlEvent::Use(false));
    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Lifting { target: rock });
}

#[test]
fn test_use_stops_at_the_first_thing_faced() {
    let (mut app, player) = build_test_app();
    set_facing(&mut app, player, Heading::Up);
    let enemy = spawn_enemy(&mut app, Vec2::new(0.0, 10.0));
    let pot = spawn_object(&mut app, MapObjectKind::Pot, Vec2::new(2.0, 12.0), None);
    touch(&mut app, player, enemy, ContactShape::Body);
    touch(&mut app, player, pot, ContactShape::Body);

    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Free);
    assert!(app.world().get::<Sensor>(pot).is_none());

    untouch(&mut app, player, enemy, ContactShape::Body);
    control(&mut app, ControlEvent::Use(false));
    control(&mut app, ControlEvent::Use(true));
    assert_eq!(action(&app, player), PlayerAction::Lifting { target: pot });
}

// ─────────────────────────────────────────────────────────────────────────────
// Items and loot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_use_item_is_gated_by_magic() {
    let (mut app, player) = build_test_app();
    give(&mut app, player, "firerod", 1);
    app.world_mut().entity_mut(player).insert((
        Equipped(Some("firerod".into())),
        Magic { current: 1, max: 10 },
    ));

    // fires on release only
    control(&mut app, ControlEvent::UseItem(true));
    assert_eq!(app.world().get::<Magic>(player).unwrap().current, 1);

    control(&mut app, ControlEvent::UseItem(false));
    assert!(sfx_sent(&app).contains(&Sfx::Error));
    assert_eq!(app.world().get::<Magic>(player).unwrap().current, 1);
    assert_eq!(count::<With<ItemEffect>>(&mut app), 0);

    app.world_mut().get_mut::<Magic>(player).unwrap().current = 5;
    press(&mut app, ControlEvent::UseItem);
    assert_eq!(app.world().get::<Magic>(player).unwrap().current, 3);
    assert_eq!(count::<With<ItemEffect>>(&mut app), 1);

    run_for(&mut app, 1.0);
    assert_eq!(count::<With<ItemEffect>>(&mut app), 0, "effects expire");
}

#[test]
fn test_nothing_equipped_is_an_error() {
    let (mut app, _player) = build_test_app();
    control(&mut app, ControlEvent::UseItem(true));
    control(&mut app, ControlEvent::UseItem(false));
    assert!(sfx_sent(&app).contains(&Sfx::Error));
}

#[test]
fn test_walking_over_loot_collects_it() {
    let (mut app, player) = build_test_app();
    let rupee = app
        .world_mut()
        .spawn((
            WorldItem::new(LootKind::Rupees, 5),
            Sensor,
            Transform::from_xyz(4.0, 0.0, 4.0),
            ZoneEntity,
        ))
        .id();

    touch(&mut app, player, rupee, ContactShape::Body);
    app.update();
    assert_eq!(app.world().get::<PlayerInventory>(player).unwrap().count("rupees"), 5);
    assert!(app.world().get_entity(rupee).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Combat
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sword_hits_only_inside_cone() {
    let (mut app, player) = build_test_app();
    give(&mut app, player, "sword", 1);
    set_facing(&mut app, player, Heading::Right);

    let ahead = spawn_enemy(&mut app, Vec2::new(10.0, 0.0));
    let behind = spawn_enemy(&mut app, Vec2::new(-10.0, 0.0));
    touch(&mut app, player, ahead, ContactShape::AttackSensor);
    touch(&mut app, player, behind, ContactShape::AttackSensor);

    control(&mut app, ControlEvent::Attack(true));
    app.update();
    assert!(app.world().get_entity(ahead).is_err());
    assert!(app.world().get_entity(behind).is_ok());
    assert_eq!(count::<With<SmashEffect>>(&mut app), 1);
}

#[test]
fn test_sword_hits_targets_entering_mid_swing() {
    let (mut app, player) = build_test_app();
    give(&mut app, player, "sword", 1);
    set_facing(&mut app, player, Heading::Right);
    let ahead = spawn_enemy(&mut app, Vec2::new(10.0, 0.0));
    let behind = spawn_enemy(&mut app, Vec2::new(-10.0, 0.0));

    control(&mut app, ControlEvent::Attack(true));
    assert!(action(&app, player).is_attacking());

    touch(&mut app, player, ahead, ContactShape::AttackSensor);
    touch(&mut app, player, behind, ContactShape::AttackSensor);
    app.update();
    assert!(app.world().get_entity(ahead).is_err());
    assert!(app.world().get_entity(behind).is_ok());
}

#[test]
fn test_attack_without_sword_does_nothing() {
    let (mut app, player) = build_test_app();
    control(&mut app, ControlEvent::Attack(true));
    assert_eq!(action(&app, player), PlayerAction::Free);
}

#[test]
fn test_attack_locks_then_releases() {
    let (mut app, player) = build_test_app();
    give(&mut app, player, "sword", 1);
    control(&mut app, ControlEvent::Attack(true));
    assert!(action(&app, player).is_attacking());

    run_for(&mut app, 0.3);
    assert_eq!(action(&app, player), PlayerAction::Free);
}
