//! UI module - HUD, inventory screen, sign dialogue, and pause overlay.

pub mod dialogue;
pub mod hud;
pub mod inventory_grid;
pub mod inventory_screen;
mod plugin;

pub use inventory_grid::InventoryGrid;
pub use inventory_screen::{InventoryScreen, InventorySlide};
pub use plugin::UiPlugin;
