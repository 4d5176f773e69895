//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;
use super::tween::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame) and play sub-states
/// - Global events (DamageEvent, PlaySfxEvent, etc.)
/// - Tweening and pause flow
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<PlaySfxEvent>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<InventoryChangedEvent>()
            .add_event::<ReadSignEvent>()
            .add_event::<TweenCompleted>()

            // Data is loaded during Startup, so the world can be built right away
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(
                    in_state(PlayState::Exploring).or(in_state(PlayState::Paused)),
                ),
            )

            // UI tweens run in every state so menus can slide
            .add_systems(Update, update_tweens);
    }
}

/// Immediately transition from Loading to InGame.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    info!("Data loaded, entering game");
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Exploring => {
                sfx.send(PlaySfxEvent(Sfx::Pause));
                next_state.set(PlayState::Paused);
            }
            PlayState::Paused => next_state.set(PlayState::Exploring),
            _ => {}
        }
    }
}
