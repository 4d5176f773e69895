//! Combat-related components.

use bevy::prelude::*;

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}

/// Marker component for hostile creatures.
#[derive(Component)]
pub struct Enemy;

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut health = Health::new(2.0);
        assert_eq!(health.take_damage(5.0), 2.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_heal_clamps_at_maximum() {
        let mut health = Health::new(3.0);
        health.take_damage(1.0);
        assert_eq!(health.heal(4.0), 1.0);
        assert_eq!(health.current, 3.0);
    }
}
