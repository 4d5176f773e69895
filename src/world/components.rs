//! World object components.

use bevy::prelude::*;
use serde::Deserialize;

/// Kinds of interactable map objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum MapObjectKind {
    Chest,
    Sign,
    Rock,
    Grass,
    Pot,
    Mine,
}

impl MapObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MapObjectKind::Chest => "chest",
            MapObjectKind::Sign => "sign",
            MapObjectKind::Rock => "rock",
            MapObjectKind::Grass => "grass",
            MapObjectKind::Pot => "pot",
            MapObjectKind::Mine => "mine",
        }
    }

    /// Placeholder colour until sprite sheets are wired in.
    pub fn color(self) -> Color {
        match self {
            MapObjectKind::Chest => Color::srgb(0.55, 0.35, 0.15),
            MapObjectKind::Sign => Color::srgb(0.7, 0.55, 0.3),
            MapObjectKind::Rock => Color::srgb(0.45, 0.45, 0.5),
            MapObjectKind::Grass => Color::srgb(0.25, 0.7, 0.2),
            MapObjectKind::Pot => Color::srgb(0.6, 0.4, 0.35),
            MapObjectKind::Mine => Color::srgb(0.2, 0.2, 0.2),
        }
    }
}

/// Chest colour once opened.
pub const OPENED_CHEST_COLOR: Color = Color::srgb(0.3, 0.2, 0.1);

/// An interactable object placed in a zone.
#[derive(Component, Debug, Clone)]
pub struct MapObject {
    pub kind: MapObjectKind,
    /// Comma-separated loot list; `None` once spent.
    pub loot: Option<String>,
    /// Zone the object belongs to, for persistence.
    pub zone: String,
    /// Index of the object in its zone definition.
    pub index: usize,
}

impl MapObject {
    pub fn has_loot(&self) -> bool {
        self.loot.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// Text shown when a sign is read.
#[derive(Component, Debug, Clone)]
pub struct SignText(pub String);

/// Marker for a chest that has been opened.
#[derive(Component)]
pub struct ChestOpened;

/// What a collectible grants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum LootKind {
    Heart,
    Magic,
    Arrows,
    Bombs,
    Rupees,
    /// A named inventory item (bow, gloves, ...).
    Item(String),
}

impl LootKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "heart" => LootKind::Heart,
            "magic" => LootKind::Magic,
            "arrows" => LootKind::Arrows,
            "bombs" => LootKind::Bombs,
            "rupees" => LootKind::Rupees,
            other => LootKind::Item(other.to_string()),
        }
    }

    /// Inventory entry this loot counts toward.
    pub fn inventory_key(&self) -> &str {
        match self {
            LootKind::Heart => "heart",
            LootKind::Magic => "magic",
            LootKind::Arrows => "arrows",
            LootKind::Bombs => "bombs",
            LootKind::Rupees => "rupees",
            LootKind::Item(name) => name,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LootKind::Heart => Color::srgb(0.9, 0.15, 0.2),
            LootKind::Magic => Color::srgb(0.2, 0.8, 0.3),
            LootKind::Rupees => Color::srgb(0.1, 0.8, 0.4),
            LootKind::Arrows | LootKind::Bombs => Color::srgb(0.5, 0.5, 0.6),
            LootKind::Item(_) => Color::srgb(0.95, 0.85, 0.2),
        }
    }
}

/// Collectible lying in the world, picked up on touch.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct WorldItem {
    pub kind: LootKind,
    pub value: u32,
}

impl WorldItem {
    pub fn new(kind: LootKind, value: u32) -> Self {
        Self { kind, value }
    }
}

/// Loot rising out of an open chest; granted when its tween ends.
#[derive(Component, Debug, Clone)]
pub struct RevealedLoot(pub WorldItem);

/// Short-lived breaking animation left by smashed objects.
#[derive(Component, Debug)]
pub struct SmashEffect {
    pub kind: String,
    pub timer: Timer,
}

/// A fragment flung out of a smash effect.
#[derive(Component, Debug)]
pub struct Debris {
    pub velocity: Vec2,
}

/// Projectile or effect spawned by using a magic item.
#[derive(Component, Debug)]
pub struct ItemEffect {
    pub item: String,
    pub velocity: Vec2,
    pub remaining: f32,
}

/// A sound to play after a delay.
#[derive(Component, Debug)]
pub struct DelayedSfx {
    pub sfx: crate::core::Sfx,
    pub timer: Timer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loot_names_map_to_kinds() {
        assert_eq!(LootKind::from_name("heart"), LootKind::Heart);
        assert_eq!(LootKind::from_name("rupees"), LootKind::Rupees);
        assert_eq!(LootKind::from_name("bow"), LootKind::Item("bow".into()));
        assert_eq!(LootKind::from_name("bow").inventory_key(), "bow");
    }

    #[test]
    fn test_blank_loot_is_not_loot() {
        let mut object = MapObject {
            kind: MapObjectKind::Pot,
            loot: Some("  ".into()),
            zone: "test".into(),
            index: 0,
        };
        assert!(!object.has_loot());
        object.loot = Some("heart".into());
        assert!(object.has_loot());
    }
}
