//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::Heading;
use crate::data::{self, DATA_ROOT};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Marker for the player's attack-range sensor (a child collider).
#[derive(Component)]
pub struct AttackSensor;

/// Direction the player is facing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Facing(pub Heading);

/// Per-direction movement intent in `[0, 1]`, indexed by `Heading`.
#[derive(Component, Debug, Clone, Default)]
pub struct MoveIntent {
    values: [f32; 5],
    /// Velocity needs recomputing.
    pub dirty: bool,
}

impl MoveIntent {
    pub fn get(&self, heading: Heading) -> f32 {
        self.values[heading.index()]
    }

    /// Set the intent for `heading` to `value` when `active`, else to zero.
    ///
    /// Returns true if the stored value changed.
    pub fn set(&mut self, heading: Heading, value: f32, active: bool) -> bool {
        if heading == Heading::None {
            return false;
        }

        let new_value = if active { value } else { 0.0 };
        let slot = &mut self.values[heading.index()];
        if *slot == new_value {
            return false;
        }

        *slot = new_value;
        self.dirty = true;
        true
    }

    pub fn is_moving(&self) -> bool {
        Heading::CARDINALS.iter().any(|h| self.get(*h) != 0.0)
    }

    /// Velocity for this intent. Left wins over right and up over down.
    pub fn velocity(&self, speed: f32) -> Vec2 {
        let x = if self.get(Heading::Left) != 0.0 {
            -self.get(Heading::Left) * speed
        } else if self.get(Heading::Right) != 0.0 {
            self.get(Heading::Right) * speed
        } else {
            0.0
        };

        let y = if self.get(Heading::Up) != 0.0 {
            self.get(Heading::Up) * speed
        } else if self.get(Heading::Down) != 0.0 {
            -self.get(Heading::Down) * speed
        } else {
            0.0
        };

        Vec2::new(x, y)
    }

    /// Facing derived from the directions currently pressed.
    ///
    /// Keeps `current` while it is still held; otherwise picks the first
    /// held direction in up, down, left, right order. With nothing held the
    /// facing does not change.
    pub fn evaluate_facing(&self, current: Heading) -> Heading {
        if current != Heading::None && self.get(current) != 0.0 {
            return current;
        }

        Heading::CARDINALS
            .into_iter()
            .find(|h| self.get(*h) != 0.0)
            .unwrap_or(current)
    }
}

/// What the player is doing. Replaces independent locked / attacking /
/// carrying flags so that contradictory combinations cannot exist.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub enum PlayerAction {
    #[default]
    Free,
    /// Sword swing in progress. `charging` stays set while the button is held.
    Attacking { charging: bool, remaining: f32 },
    /// An object is travelling to the player's head.
    Lifting { target: Entity },
    /// Holding an object overhead. Movement is allowed.
    Carrying { item: Entity },
    /// Chest opening flourish.
    Opening { chest: Entity },
    /// Scripted sequence.
    Locked,
}

impl PlayerAction {
    /// Movement and new actions are disabled.
    pub fn is_locked(&self) -> bool {
        !matches!(self, PlayerAction::Free | PlayerAction::Carrying { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, PlayerAction::Attacking { .. })
    }

    pub fn carried(&self) -> Option<Entity> {
        match self {
            PlayerAction::Carrying { item } => Some(*item),
            _ => None,
        }
    }

    /// Try to start a sword swing. Returns true if the swing started.
    ///
    /// Rejected without a sword, while carrying, while locked, or while a
    /// charge is already held.
    pub fn try_begin_attack(&mut self, has_sword: bool, duration: f32) -> bool {
        if !has_sword || self.carried().is_some() || self.is_locked() {
            return false;
        }

        *self = PlayerAction::Attacking {
            charging: true,
            remaining: duration,
        };
        true
    }

    /// Attack button released.
    pub fn release_attack(&mut self) {
        if let PlayerAction::Attacking { charging, .. } = self {
            *charging = false;
        }
    }

    /// Advance the swing timer. Returns true when the swing ends this tick.
    pub fn tick_attack(&mut self, delta: f32) -> bool {
        let PlayerAction::Attacking { remaining, .. } = self else {
            return false;
        };

        *remaining -= delta;
        if *remaining <= 0.0 {
            *self = PlayerAction::Free;
            return true;
        }
        false
    }
}

/// Magic meter, bounded to `[0, max]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magic {
    pub current: u32,
    pub max: u32,
}

impl Magic {
    pub fn new(max: u32) -> Self {
        Self { current: 0, max }
    }

    /// Deduct `cost` if affordable. Returns false and leaves the meter
    /// untouched otherwise.
    pub fn spend(&mut self, cost: u32) -> bool {
        if self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }

    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Name of the animation the player sprite should show; `dirty` when it
/// needs to be re-evaluated.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerAnimation {
    pub current: String,
    pub dirty: bool,
}

/// Player tuning, loaded from assets/data/config/player.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed in pixels per second
    pub move_speed: f32,
    pub max_health: f32,
    pub max_magic: u32,
    /// Minimum cosine to hit a target with the sword
    pub attack_cone: f32,
    /// Minimum cosine to interact with an object
    pub use_cone: f32,
    pub attack_sensor_radius: f32,
    pub body_radius: f32,
    /// Sprite height, used for carry and throw offsets
    pub height: f32,
    pub attack_damage: f32,
    /// Sword swing duration in seconds
    pub attack_duration: f32,
    pub throw_distance_x: f32,
    pub throw_distance_y: f32,
    pub lift_time: f32,
    pub throw_time: f32,
    pub chest_reveal_time: f32,
    pub fanfare_delay: f32,
    /// Gamepad stick dead-zone
    pub axis_threshold: f32,
    pub item_effect_speed: f32,
    pub item_effect_lifetime: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 90.0,
            max_health: 3.0,
            max_magic: 10,
            attack_cone: 0.5,
            use_cone: 0.4,
            attack_sensor_radius: 18.0,
            body_radius: 7.0,
            height: 24.0,
            attack_damage: 1.0,
            attack_duration: 0.25,
            throw_distance_x: 75.0,
            throw_distance_y: 50.0,
            lift_time: 0.15,
            throw_time: 0.25,
            chest_reveal_time: 1.5,
            fanfare_delay: 0.1,
            axis_threshold: 0.25,
            item_effect_speed: 150.0,
            item_effect_lifetime: 0.6,
        }
    }
}

impl PlayerConfig {
    /// Load player config from RON file.
    pub fn load() -> Self {
        data::load_ron_or_default(format!("{}/config/player.ron", DATA_ROOT))
    }

    /// Offset from the player's origin to a carried object.
    pub fn carry_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.height - 5.0, 0.0)
    }

    /// Where a thrown object lands, relative to where it was held.
    ///
    /// Objects not thrown upward also drop by the player's height so they
    /// land at ground level.
    pub fn throw_offset(&self, heading: Heading) -> Vec3 {
        let v = heading.vector();
        let drop = if heading == Heading::Up { 0.0 } else { self.height };
        Vec3::new(
            self.throw_distance_x * v.x,
            self.throw_distance_y * v.y - drop,
            0.0,
        )
    }
}

/// Choose the animation for the player's current state.
pub fn animation_name(
    action: &PlayerAction,
    moving: bool,
    facing: Heading,
    has_shield: bool,
) -> String {
    if action.is_attacking() {
        return format!("attack_{}", facing.as_str());
    }

    let mut anim = if moving { "walk" } else { "idle" }.to_string();
    if action.carried().is_some() {
        anim = format!("lift_{}", anim);
    } else if has_shield {
        anim.push_str("_shield");
    }

    format!("{}_{}", anim, facing.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_release_returns_to_zero_and_dirties_twice() {
        for heading in Heading::CARDINALS {
            let mut intent = MoveIntent::default();
            let mut dirty_marks = 0;
            if intent.set(heading, 0.7, true) {
                dirty_marks += 1;
            }
            assert_eq!(intent.get(heading), 0.7);
            if intent.set(heading, 0.7, false) {
                dirty_marks += 1;
            }
            assert_eq!(intent.get(heading), 0.0);
            assert_eq!(dirty_marks, 2, "heading {:?}", heading);
        }
    }

    #[test]
    fn test_repeated_press_is_not_a_change() {
        let mut intent = MoveIntent::default();
        assert!(intent.set(Heading::Left, 1.0, true));
        assert!(!intent.set(Heading::Left, 1.0, true));
    }

    #[test]
    fn test_facing_keeps_held_direction() {
        let mut intent = MoveIntent::default();
        intent.set(Heading::Left, 1.0, true);
        intent.set(Heading::Up, 1.0, true);
        assert_eq!(intent.evaluate_facing(Heading::Left), Heading::Left);
    }

    #[test]
    fn test_facing_uses_only_pressed_directions() {
        let mut intent = MoveIntent::default();
        intent.set(Heading::Right, 1.0, true);
        assert_eq!(intent.evaluate_facing(Heading::Down), Heading::Right);

        intent.set(Heading::Right, 1.0, false);
        assert_eq!(intent.evaluate_facing(Heading::Right), Heading::Right);
    }

    #[test]
    fn test_velocity_is_y_up() {
        let mut intent = MoveIntent::default();
        intent.set(Heading::Up, 1.0, true);
        intent.set(Heading::Left, 0.5, true);
        assert_eq!(intent.velocity(90.0), Vec2::new(-45.0, 90.0));
    }

    #[test]
    fn test_attack_rejected_while_carrying() {
        let mut action = PlayerAction::Carrying { item: Entity::from_raw(7) };
        assert!(!action.try_begin_attack(true, 0.25));
        assert_eq!(action, PlayerAction::Carrying { item: Entity::from_raw(7) });
    }

    #[test]
    fn test_attack_requires_sword() {
        let mut action = PlayerAction::Free;
        assert!(!action.try_begin_attack(false, 0.25));
        assert_eq!(action, PlayerAction::Free);
    }

    #[test]
    fn test_attack_ignored_while_charging() {
        let mut action = PlayerAction::Free;
        assert!(action.try_begin_attack(true, 0.25));
        assert!(!action.try_begin_attack(true, 0.25));
        action.release_attack();
        assert_eq!(action, PlayerAction::Attacking { charging: false, remaining: 0.25 });
    }

    #[test]
    fn test_attack_finishes_after_duration() {
        let mut action = PlayerAction::Free;
        action.try_begin_attack(true, 0.25);
        assert!(!action.tick_attack(0.1));
        assert!(action.is_locked());
        assert!(action.tick_attack(0.2));
        assert_eq!(action, PlayerAction::Free);
    }

    #[test]
    fn test_carrying_is_not_locked() {
        assert!(!PlayerAction::Carrying { item: Entity::from_raw(1) }.is_locked());
        assert!(PlayerAction::Lifting { target: Entity::from_raw(1) }.is_locked());
        assert!(PlayerAction::Locked.is_locked());
    }

    #[test]
    fn test_magic_spend_only_when_affordable() {
        let mut magic = Magic { current: 3, max: 10 };
        assert!(!magic.spend(4));
        assert_eq!(magic.current, 3);
        assert!(magic.spend(3));
        assert_eq!(magic.current, 0);
    }

    #[test]
    fn test_magic_restore_caps_at_max() {
        let mut magic = Magic { current: 8, max: 10 };
        magic.restore(5);
        assert_eq!(magic.current, 10);
    }

    #[test]
    fn test_throw_offset_drops_unless_up() {
        let config = PlayerConfig::default();
        assert_eq!(config.throw_offset(Heading::Up), Vec3::new(0.0, 50.0, 0.0));
        assert_eq!(config.throw_offset(Heading::Down), Vec3::new(0.0, -50.0 - 24.0, 0.0));
        assert_eq!(config.throw_offset(Heading::Left), Vec3::new(-75.0, -24.0, 0.0));
    }

    #[test]
    fn test_animation_names() {
        let free = PlayerAction::Free;
        assert_eq!(animation_name(&free, false, Heading::Down, false), "idle_down");
        assert_eq!(animation_name(&free, true, Heading::Left, true), "walk_shield_left");

        let carrying = PlayerAction::Carrying { item: Entity::from_raw(3) };
        assert_eq!(animation_name(&carrying, true, Heading::Up, true), "lift_walk_up");

        let attacking = PlayerAction::Attacking { charging: true, remaining: 0.1 };
        assert_eq!(animation_name(&attacking, true, Heading::Right, true), "attack_right");
    }
}
