//! Loot list resolution for chests and lifted objects.

use crate::inventory::PlayerInventory;

/// Entries of a comma-separated loot list, trimmed, empties dropped.
pub fn loot_entries(loot: &str) -> Vec<&str> {
    loot.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Pick the loot to grant: the first listed item the player does not own
/// yet. The last entry is granted regardless, so a non-empty list always
/// yields something.
pub fn resolve_loot<'a>(loot: &'a str, inventory: &PlayerInventory) -> Option<&'a str> {
    let entries = loot_entries(loot);
    let (last, rest) = entries.split_last()?;

    Some(rest.iter().copied().find(|name| !inventory.has(name)).unwrap_or(*last))
}
