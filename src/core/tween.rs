//! One-shot tweening with completion events.
//!
//! A `Tween` moves a transform (or a UI node's top offset) from a start to
//! an end value over a fixed duration. When it finishes the component is
//! removed and a `TweenCompleted` event carries its `TweenAction` back to
//! whichever plugin started it. This is the only way gameplay code waits
//! for an animation to end.

use std::time::Duration;

use bevy::prelude::*;

use super::states::PlayState;

/// What a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    Translation { from: Vec3, to: Vec3 },
    /// `Node::top` in pixels.
    UiTop { from: f32, to: f32 },
}

impl TweenTarget {
    /// World-space tweens, as opposed to UI layout tweens.
    pub fn is_world(&self) -> bool {
        matches!(self, TweenTarget::Translation { .. })
    }
}

/// Continuation to run when a tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenAction {
    /// Nothing to do on completion.
    None,
    /// A lifted object reached the player's head.
    FinishLift { player: Entity },
    /// A thrown object landed and should break.
    Smash,
    /// The chest reveal flourish ended; grant the item to the player.
    GrantLoot { player: Entity },
    /// The inventory panel finished sliding.
    InventorySlide { opening: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    SineOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
        }
    }
}

/// Component driving a single in-flight tween.
#[derive(Component, Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub timer: Timer,
    pub easing: Easing,
    pub on_complete: TweenAction,
}

impl Tween {
    pub fn translation(from: Vec3, to: Vec3, seconds: f32) -> Self {
        Self {
            target: TweenTarget::Translation { from, to },
            timer: Timer::new(Duration::from_secs_f32(seconds.max(0.0)), TimerMode::Once),
            easing: Easing::Linear,
            on_complete: TweenAction::None,
        }
    }

    pub fn ui_top(from: f32, to: f32, seconds: f32) -> Self {
        Self {
            target: TweenTarget::UiTop { from, to },
            timer: Timer::new(Duration::from_secs_f32(seconds.max(0.0)), TimerMode::Once),
            easing: Easing::Linear,
            on_complete: TweenAction::None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_complete(mut self, action: TweenAction) -> Self {
        self.on_complete = action;
        self
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.timer.fraction())
    }
}

/// Sent once when a tween reaches its end value.
#[derive(Event, Debug, Clone, Copy)]
pub struct TweenCompleted {
    pub entity: Entity,
    pub action: TweenAction,
}

/// System that advances tweens and reports completions. Translation
/// tweens hold still while the world is frozen; UI tweens always run.
pub fn update_tweens(
    mut commands: Commands,
    time: Res<Time>,
    state: Option<Res<State<PlayState>>>,
    mut query: Query<(Entity, &mut Tween, Option<&mut Transform>, Option<&mut Node>)>,
    mut completed: EventWriter<TweenCompleted>,
) {
    let world_active = state.as_deref().map_or(true, |s| s.get().world_active());

    for (entity, mut tween, transform, node) in query.iter_mut() {
        if tween.target.is_world() && !world_active {
            continue;
        }
        tween.timer.tick(time.delta());
        let t = tween.progress();

        match tween.target {
            TweenTarget::Translation { from, to } => {
                if let Some(mut transform) = transform {
                    transform.translation = from.lerp(to, t);
                }
            }
            TweenTarget::UiTop { from, to } => {
                if let Some(mut node) = node {
                    node.top = Val::Px(from + (to - from) * t);
                }
            }
        }

        if tween.timer.finished() {
            commands.entity(entity).remove::<Tween>();
            completed.send(TweenCompleted {
                entity,
                action: tween.on_complete,
            });
        }
    }
}
