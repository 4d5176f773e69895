//! Cardinal headings and the view-cone test used for attacks and interaction.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One of the four cardinal directions, or none.
///
/// World space is y-up, so `Up` is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heading {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    /// The four real directions, in facing-evaluation priority order.
    pub const CARDINALS: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit vector for this heading. `None` looks up, like a player who
    /// has not moved yet.
    pub fn vector(self) -> Vec2 {
        match self {
            Heading::None => Vec2::Y,
            Heading::Left => Vec2::NEG_X,
            Heading::Right => Vec2::X,
            Heading::Up => Vec2::Y,
            Heading::Down => Vec2::NEG_Y,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::None => "none",
            Heading::Left => "left",
            Heading::Right => "right",
            Heading::Up => "up",
            Heading::Down => "down",
        }
    }

    /// Index into per-direction arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading for a signed stick axis value (x axis when `horizontal`).
    /// Stick y is positive upward.
    pub fn from_axis(value: f32, horizontal: bool) -> Heading {
        match (horizontal, value > 0.0) {
            (true, true) => Heading::Right,
            (true, false) => Heading::Left,
            (false, true) => Heading::Up,
            (false, false) => Heading::Down,
        }
    }
}

/// Whether `target` lies inside the view cone of a viewer at `origin`
/// facing `heading`.
///
/// `cone` is the minimum cosine between the facing vector and the
/// direction to the target. A target sitting exactly on the viewer is
/// always inside.
pub fn is_in_view_cone(origin: Vec2, heading: Heading, target: Vec2, cone: f32) -> bool {
    let facing = heading.vector();
    let to_target = (target - origin).normalize_or_zero();
    if to_target == Vec2::ZERO {
        return true;
    }

    to_target.dot(facing) >= cone
}
