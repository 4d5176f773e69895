//! In-game HUD - magic meter, life bar, and item counters.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::GameState;
use crate::inventory::PlayerInventory;
use crate::player::{Magic, Player};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for life bar fill.
#[derive(Component)]
pub struct LifeBar;

/// Marker for magic meter fill.
#[derive(Component)]
pub struct MagicBar;

/// Counter text for an inventory entry.
#[derive(Component)]
pub struct HudCounter(pub &'static str);

const COUNTERS: [&str; 3] = ["rupees", "bombs", "arrows"];

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_life_bar, update_magic_bar, update_counters)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI along the top edge.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(6.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_bar(parent, "MP", Color::srgb(0.2, 0.8, 0.3), MagicBar);

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|counters| {
                    for key in COUNTERS {
                        counters.spawn((
                            Text::new("000"),
                            TextFont {
                                font_size: 8.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.9, 0.9, 0.9)),
                            HudCounter(key),
                        ));
                    }
                });

            spawn_bar(parent, "LIFE", Color::srgb(0.8, 0.2, 0.2), LifeBar);
        });
}

/// Helper to spawn a labelled status bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, color: Color, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 8.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));

            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(48.0),
                        height: Val::Px(6.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// Zero-padded three digit counter.
pub fn counter_text(count: u32) -> String {
    format!("{:03}", count.min(999))
}

fn update_life_bar(
    player_query: Query<&Health, (With<Player>, Changed<Health>)>,
    mut bar_query: Query<&mut Node, With<LifeBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

fn update_magic_bar(
    player_query: Query<&Magic, (With<Player>, Changed<Magic>)>,
    mut bar_query: Query<&mut Node, With<MagicBar>>,
) {
    let Ok(magic) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(magic.percentage() * 100.0);
}

fn update_counters(
    player_query: Query<&PlayerInventory, (With<Player>, Changed<PlayerInventory>)>,
    mut counters: Query<(&mut Text, &HudCounter)>,
) {
    let Ok(inventory) = player_query.get_single() else {
        return;
    };
    for (mut text, counter) in counters.iter_mut() {
        text.0 = counter_text(inventory.count(counter.0));
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
