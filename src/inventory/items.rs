//! Static item metadata shared by the inventory screen, HUD and item use.

use std::collections::HashSet;

use bevy::prelude::*;
use serde::Deserialize;

use super::components::PlayerInventory;
use crate::data::{self, DataLoadError};

/// Built-in descriptor table, used when `assets/data/items.ron` is missing.
const BUILTIN_ITEMS: &str = include_str!("../../assets/data/items.ron");

/// How an item's icon frame is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ItemIcon {
    /// A fixed frame name. `%d` is replaced by the item's own count.
    Fixed(String),
    /// `template` with `%d` replaced by `count(key) + offset`.
    Level {
        key: String,
        template: String,
        #[serde(default)]
        offset: u32,
    },
    /// One of several frames picked by `count(key)` (1-based, clamped).
    Variant { key: String, icons: Vec<String> },
}

/// Read-only metadata for a single inventory item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDescriptor {
    pub name: String,
    pub icon: ItemIcon,
    /// Pixel offset of the icon inside the inventory panel.
    #[serde(default)]
    pub position: (f32, f32),
    /// Selectable grid cell `(column, row)`, if the item can be equipped.
    #[serde(default)]
    pub grid: Option<(u32, u32)>,
    /// Magic cost to use the item.
    #[serde(default)]
    pub cost: u32,
    /// Shown even when the player owns none (armor, crystals, labels).
    #[serde(default)]
    pub always_visible: bool,
    /// Shown only while this other item is owned.
    #[serde(default)]
    pub linked: Option<String>,
}

impl ItemDescriptor {
    /// Whether this item's icon should be shown for `inventory`.
    pub fn is_visible(&self, inventory: &PlayerInventory) -> bool {
        if let Some(linked) = &self.linked {
            return inventory.has(linked);
        }
        self.always_visible || inventory.has(&self.name)
    }

    /// Resolve the icon frame name for the current inventory.
    pub fn icon_for(&self, inventory: &PlayerInventory) -> String {
        match &self.icon {
            ItemIcon::Fixed(frame) => frame.replace("%d", &inventory.count(&self.name).to_string()),
            ItemIcon::Level { key, template, offset } => {
                template.replace("%d", &(inventory.count(key) + offset).to_string())
            }
            ItemIcon::Variant { key, icons } => {
                if icons.is_empty() {
                    return String::new();
                }
                let index = (inventory.count(key).max(1) as usize - 1).min(icons.len() - 1);
                icons[index].clone()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemFile {
    items: Vec<ItemDescriptor>,
}

/// Every known item descriptor, in declaration order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: Vec<ItemDescriptor>,
}

impl ItemRegistry {
    pub fn get(&self, name: &str) -> Option<&ItemDescriptor> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items that occupy a cell on the selection grid.
    pub fn grid_items(&self) -> impl Iterator<Item = &ItemDescriptor> {
        self.items.iter().filter(|item| item.grid.is_some())
    }

    /// Parse and validate a descriptor file.
    pub fn from_ron(source: &str, contents: &str) -> Result<Self, DataLoadError> {
        let file: ItemFile = data::parse_ron(source, contents)?;
        let registry = Self { items: file.items };
        registry.validate()?;
        Ok(registry)
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, DataLoadError> {
        Self::from_ron("builtin items.ron", BUILTIN_ITEMS)
    }

    /// Load from `assets/data/items.ron`, falling back to the built-in table.
    pub fn load() -> Self {
        let path = format!("{}/items.ron", data::DATA_ROOT);
        let loaded = data::load_ron::<ItemFile>(&path).and_then(|file| {
            let registry = Self { items: file.items };
            registry.validate()?;
            Ok(registry)
        });

        match loaded {
            Ok(registry) => {
                info!("Loaded {} item descriptors from {}", registry.items.len(), path);
                registry
            }
            Err(e) => {
                warn!("{}. Using built-in item table.", e);
                Self::builtin().unwrap_or_else(|e| {
                    error!("Built-in item table is invalid: {}", e);
                    Self::default()
                })
            }
        }
    }

    fn validate(&self) -> Result<(), DataLoadError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.name.as_str()) {
                return Err(DataLoadError::DuplicateItem(item.name.clone()));
            }
        }
        for item in &self.items {
            if let Some(linked) = &item.linked {
                if !seen.contains(linked.as_str()) {
                    return Err(DataLoadError::UnknownLinkedItem {
                        item: item.name.clone(),
                        linked: linked.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
