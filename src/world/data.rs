//! Zone data structures and RON loading.
//!
//! A zone is a flat list of placed objects, loose loot and creatures. The
//! ground itself comes from the tilemap renderer and is not described here.

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{LootKind, MapObjectKind};
use crate::data::{self, DataLoadError, DATA_ROOT};

/// Zone used when the data directory has no matching file.
const BUILTIN_ZONE: &str = include_str!("../../assets/data/zones/lightworld.ron");

/// A placed map object.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDef {
    pub kind: MapObjectKind,
    pub position: (f32, f32),
    #[serde(default)]
    pub loot: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Loot lying on the ground.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub kind: LootKind,
    #[serde(default = "default_value")]
    pub value: u32,
    pub position: (f32, f32),
}

/// A damageable creature.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyDef {
    pub position: (f32, f32),
    #[serde(default = "default_enemy_health")]
    pub health: f32,
}

fn default_value() -> u32 {
    1
}

fn default_enemy_health() -> f32 {
    2.0
}

/// Complete zone definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneDefinition {
    pub name: String,
    pub player_start: (f32, f32),
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
}

impl ZoneDefinition {
    pub fn from_ron(source: &str, contents: &str) -> Result<Self, DataLoadError> {
        data::parse_ron(source, contents)
    }

    /// The zone compiled into the binary.
    pub fn builtin() -> Result<Self, DataLoadError> {
        Self::from_ron("builtin lightworld.ron", BUILTIN_ZONE)
    }

    /// Load `assets/data/zones/<name>.ron`, falling back to the built-in zone.
    pub fn load(name: &str) -> Option<Self> {
        let path = format!("{}/zones/{}.ron", DATA_ROOT, name);
        match data::load_ron::<ZoneDefinition>(&path) {
            Ok(zone) => {
                info!("Loaded zone '{}' ({} objects)", zone.name, zone.objects.len());
                Some(zone)
            }
            Err(e) => {
                warn!("{}. Using built-in zone.", e);
                match Self::builtin() {
                    Ok(zone) => Some(zone),
                    Err(e) => {
                        error!("Built-in zone is invalid: {}", e);
                        None
                    }
                }
            }
        }
    }
}

/// Resource indicating which zone to build.
#[derive(Resource)]
pub struct CurrentZone {
    pub name: String,
}

impl Default for CurrentZone {
    fn default() -> Self {
        Self {
            name: "lightworld".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_zone_parses() {
        let zone = ZoneDefinition::builtin().unwrap();
        assert_eq!(zone.name, "lightworld");
        assert!(zone.objects.iter().any(|o| o.kind == MapObjectKind::Chest));
    }

    #[test]
    fn test_item_value_defaults_to_one() {
        let zone = ZoneDefinition::from_ron(
            "inline",
            r#"(name: "z", player_start: (0.0, 0.0), items: [(kind: Rupees, position: (1.0, 2.0))])"#,
        )
        .unwrap();
        assert_eq!(zone.items[0].value, 1);
        assert_eq!(zone.items[0].kind, LootKind::Rupees);
    }
}
