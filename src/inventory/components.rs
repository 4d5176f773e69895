//! Per-player inventory components.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Item name → count. Flags such as `sword` or `gloves` are counts too:
/// 0 means not owned, higher values are upgrade levels.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInventory {
    pub items: BTreeMap<String, u32>,
}

impl PlayerInventory {
    pub fn count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    pub fn has(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Add `amount` of `name`, returning the new count.
    pub fn add(&mut self, name: &str, amount: u32) -> u32 {
        let entry = self.items.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
        *entry
    }

    pub fn set(&mut self, name: &str, count: u32) {
        self.items.insert(name.to_string(), count);
    }
}

/// The item bound to the use-item button, chosen on the inventory screen.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipped(pub Option<String>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_items_count_as_zero() {
        let inventory = PlayerInventory::default();
        assert_eq!(inventory.count("bombs"), 0);
        assert!(!inventory.has("sword"));
    }

    #[test]
    fn test_add_accumulates() {
        let mut inventory = PlayerInventory::default();
        assert_eq!(inventory.add("rupees", 5), 5);
        assert_eq!(inventory.add("rupees", 20), 25);
        assert!(inventory.has("rupees"));
    }

    #[test]
    fn test_zero_count_is_not_owned() {
        let mut inventory = PlayerInventory::default();
        inventory.set("armor", 0);
        assert!(!inventory.has("armor"));
    }
}
