//! Global events used for cross-system communication.
//!
//! The player systems never touch audio, health or the HUD directly; they
//! send one of these and let the owning plugin react.

use bevy::prelude::*;

/// One-shot sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Lift,
    Throw,
    ChestOpen,
    ItemFanfare,
    Error,
    Pause,
    Smash,
    Pickup,
    Sword,
}

/// Fire-and-forget request to play a sound effect.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlaySfxEvent(pub Sfx);

/// Sent when an entity takes damage.
#[derive(Event, Debug)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    pub amount: f32,
}

/// Sent when an entity's health reaches 0.
#[derive(Event, Debug)]
pub struct DeathEvent {
    pub entity: Entity,
    pub killed_by: Option<Entity>,
}

/// Sent whenever the player's inventory counts change.
///
/// The inventory screen and HUD refresh from the live inventory every frame
/// anyway; listeners use this for one-off reactions such as saving.
#[derive(Event, Debug, Default)]
pub struct InventoryChangedEvent;

/// Sent when the player reads a sign while facing it.
#[derive(Event, Debug, Clone)]
pub struct ReadSignEvent {
    pub sign: Entity,
    pub text: String,
}
