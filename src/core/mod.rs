//! Core game module - states, events, directions, and tweening.
//!
//! This module provides the foundation that all other game systems build upon.

mod direction;
mod events;
mod plugin;
mod states;
mod tween;

pub use direction::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
