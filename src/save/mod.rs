//! Save data - spent loot per zone and the player's inventory.
//!
//! The whole save lives in the `LoadedSave` resource while playing. Zone
//! spawning reads it, chest and lift interactions write it, and it is
//! flushed to disk on a timer whenever something changed.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameState, InventoryChangedEvent};
use crate::inventory::PlayerInventory;
use crate::player::Player;

/// Errors from reading or writing the save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize save: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Save file is corrupt: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Overrides for one zone's objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSaveData {
    /// Indices of objects whose loot has been taken.
    #[serde(default)]
    pub spent_loot: BTreeSet<usize>,
}

/// The save currently in memory.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedSave {
    #[serde(default)]
    pub zones: BTreeMap<String, ZoneSaveData>,
    #[serde(default)]
    pub inventory: PlayerInventory,
    /// Set when the save differs from what is on disk.
    #[serde(skip)]
    pub dirty: bool,
}

impl LoadedSave {
    /// Record the loot left on object `index` of `zone`. `None` means the
    /// loot has been taken.
    pub fn update_zone_data(&mut self, zone: &str, index: usize, loot: Option<&str>) {
        let data = self.zones.entry(zone.to_string()).or_default();
        let changed = match loot {
            None => data.spent_loot.insert(index),
            Some(_) => data.spent_loot.remove(&index),
        };
        self.dirty |= changed;
    }

    pub fn is_loot_spent(&self, zone: &str, index: usize) -> bool {
        self.zones
            .get(zone)
            .is_some_and(|data| data.spent_loot.contains(&index))
    }

    pub fn from_ron(contents: &str) -> Result<Self, SaveError> {
        Ok(ron::from_str(contents)?)
    }

    pub fn to_ron(&self) -> Result<String, SaveError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Read a save file. A missing file is a fresh game, not an error.
    pub fn load(path: &Path) -> Result<Self, SaveError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    pub fn write(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

/// Where and how often to save.
#[derive(Resource, Debug, Clone)]
pub struct SaveSettings {
    pub path: PathBuf,
    pub interval: Duration,
    /// Disable disk access entirely (tests).
    pub enabled: bool,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("saves/save.ron"),
            interval: Duration::from_secs(10),
            enabled: true,
        }
    }
}

#[derive(Resource)]
struct AutosaveTimer(Timer);

/// Save plugin - loads at startup and autosaves while playing.
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveSettings>()
            .init_resource::<LoadedSave>()
            .add_systems(Startup, load_save)
            .add_systems(
                Update,
                (snapshot_inventory, autosave)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

fn load_save(mut commands: Commands, settings: Res<SaveSettings>) {
    commands.insert_resource(AutosaveTimer(Timer::new(settings.interval, TimerMode::Repeating)));
    if !settings.enabled {
        return;
    }

    match LoadedSave::load(&settings.path) {
        Ok(save) => {
            info!("Loaded save from {}", settings.path.display());
            commands.insert_resource(save);
        }
        Err(e) => error!("{}. Starting a new game.", e),
    }
}

/// Copy the live inventory into the save when it changes.
fn snapshot_inventory(
    mut events: EventReader<InventoryChangedEvent>,
    players: Query<&PlayerInventory, With<Player>>,
    mut save: ResMut<LoadedSave>,
) {
    if events.read().count() == 0 {
        return;
    }
    let Ok(inventory) = players.get_single() else {
        return;
    };
    if save.inventory != *inventory {
        save.inventory = inventory.clone();
        save.dirty = true;
    }
}

fn autosave(
    time: Res<Time>,
    settings: Res<SaveSettings>,
    mut timer: ResMut<AutosaveTimer>,
    mut save: ResMut<LoadedSave>,
) {
    if !timer.0.tick(time.delta()).just_finished() || !save.dirty || !settings.enabled {
        return;
    }

    match save.write(&settings.path) {
        Ok(()) => {
            info!("Saved game to {}", settings.path.display());
            save.dirty = false;
        }
        Err(e) => error!("{}", e),
    }
}
