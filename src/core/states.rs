//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Player movement
//! and interaction only run while exploring; inventory navigation only runs
//! while the inventory screen is down.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files and the save
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// - `Exploring`: Normal movement, combat, and interaction
/// - `Inventory`: Inventory screen is open, world is frozen
/// - `Dialogue`: Reading a sign, world is frozen
/// - `Paused`: Pause overlay, world is frozen
///
/// "Frozen" means world tweens, effect timers and delayed cues stop
/// advancing; UI tweens keep running so panels can slide.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    #[default]
    Exploring,
    Inventory,
    Dialogue,
    Paused,
}

impl PlayState {
    /// Whether the world simulation advances in this state.
    pub fn world_active(self) -> bool {
        self == PlayState::Exploring
    }
}
