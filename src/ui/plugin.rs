//! UI plugin - HUD, inventory screen, dialogue and pause overlay.

use bevy::prelude::*;

use super::dialogue;
use super::hud;
use super::inventory_screen::{self, InventoryScreen};
use crate::core::{GameState, PlayState};
use crate::input::ControlSet;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // UI is laid out in game pixels
            .insert_resource(UiScale(3.0))

            // Inventory screen
            .add_systems(OnEnter(GameState::InGame), inventory_screen::spawn_inventory_panel)
            .add_systems(OnExit(GameState::InGame), inventory_screen::cleanup_inventory_panel)
            .add_systems(
                Update,
                (
                    inventory_screen::toggle_inventory,
                    inventory_screen::finish_inventory_slide,
                    inventory_screen::navigate_inventory,
                    inventory_screen::refresh_inventory_icons,
                )
                    .chain()
                    .after(ControlSet)
                    .run_if(in_state(GameState::InGame).and(resource_exists::<InventoryScreen>)),
            )

            // Sign dialogue
            .add_systems(
                Update,
                (
                    dialogue::dialogue_input,
                    dialogue::open_dialogue.run_if(in_state(PlayState::Exploring)),
                )
                    .chain()
                    .after(ControlSet)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(PlayState::Dialogue), dialogue::close_dialogue)

            // Pause overlay
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(OnExit(PlayState::Paused), cleanup_pause_menu);
    }
}

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Set up the pause overlay.
fn setup_pause_menu(mut commands: Commands) {
    // Semi-transparent overlay
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Clean up pause menu entities.
fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
