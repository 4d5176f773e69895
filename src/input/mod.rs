//! Controls - the single point where keyboard and gamepad input becomes
//! discrete game actions.
//!
//! Gameplay, inventory and dialogue systems never read devices directly;
//! they consume `ControlEvent`s. Each button produces one event when
//! pressed and one when released. Stick axes are treated as two
//! directional buttons each, pressed once when the stick leaves the
//! dead-zone. While it stays out, changes in strength arrive as `Axis`
//! events so movement follows the stick without repeating the press.

use bevy::prelude::*;

use crate::core::{GameState, Heading};
use crate::player::PlayerConfig;

/// Controls plugin - maps devices to `ControlEvent`s.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ControlEvent>()
            .configure_sets(Update, ControlSet.run_if(in_state(GameState::InGame)))
            .add_systems(Update, (read_keyboard, read_gamepad).in_set(ControlSet));
    }
}

/// Systems that produce `ControlEvent`s; consumers run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlSet;

/// A discrete input action.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Directional press (`active`) or release, with analog strength.
    Direction { heading: Heading, value: f32, active: bool },
    /// New strength for a stick direction that is already pressed.
    Axis { heading: Heading, value: f32 },
    Attack(bool),
    Use(bool),
    UseItem(bool),
    /// Open or close the inventory screen (press only).
    ToggleInventory,
}

const DIRECTION_KEYS: [(KeyCode, Heading); 8] = [
    (KeyCode::ArrowUp, Heading::Up),
    (KeyCode::KeyW, Heading::Up),
    (KeyCode::ArrowDown, Heading::Down),
    (KeyCode::KeyS, Heading::Down),
    (KeyCode::ArrowLeft, Heading::Left),
    (KeyCode::KeyA, Heading::Left),
    (KeyCode::ArrowRight, Heading::Right),
    (KeyCode::KeyD, Heading::Right),
];

const DPAD_BUTTONS: [(GamepadButton, Heading); 4] = [
    (GamepadButton::DPadUp, Heading::Up),
    (GamepadButton::DPadDown, Heading::Down),
    (GamepadButton::DPadLeft, Heading::Left),
    (GamepadButton::DPadRight, Heading::Right),
];

fn read_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut events: EventWriter<ControlEvent>) {
    for (key, heading) in DIRECTION_KEYS {
        if keyboard.just_pressed(key) {
            events.send(ControlEvent::Direction { heading, value: 1.0, active: true });
        }
        if keyboard.just_released(key) {
            events.send(ControlEvent::Direction { heading, value: 1.0, active: false });
        }
    }

    let buttons: [(&[KeyCode], fn(bool) -> ControlEvent); 3] = [
        (&[KeyCode::KeyX], ControlEvent::Attack),
        (&[KeyCode::KeyZ, KeyCode::Space], ControlEvent::Use),
        (&[KeyCode::KeyC], ControlEvent::UseItem),
    ];
    for (keys, make) in buttons {
        if keyboard.any_just_pressed(keys.iter().copied()) {
            events.send(make(true));
        }
        if keyboard.any_just_released(keys.iter().copied()) {
            events.send(make(false));
        }
    }

    if keyboard.just_pressed(KeyCode::Enter) {
        events.send(ControlEvent::ToggleInventory);
    }
}

/// The direction held on one stick axis, and how far.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AxisHold {
    pub heading: Heading,
    pub value: f32,
}

#[derive(Default)]
struct StickState {
    x: AxisHold,
    y: AxisHold,
}

fn read_gamepad(
    gamepads: Query<&Gamepad>,
    config: Res<PlayerConfig>,
    mut stick: Local<StickState>,
    mut events: EventWriter<ControlEvent>,
) {
    let Some(gamepad) = gamepads.iter().next() else {
        return;
    };

    for (button, heading) in DPAD_BUTTONS {
        if gamepad.just_pressed(button) {
            events.send(ControlEvent::Direction { heading, value: 1.0, active: true });
        }
        if gamepad.just_released(button) {
            events.send(ControlEvent::Direction { heading, value: 1.0, active: false });
        }
    }

    let buttons: [(GamepadButton, fn(bool) -> ControlEvent); 3] = [
        (GamepadButton::West, ControlEvent::Attack),
        (GamepadButton::South, ControlEvent::Use),
        (GamepadButton::East, ControlEvent::UseItem),
    ];
    for (button, make) in buttons {
        if gamepad.just_pressed(button) {
            events.send(make(true));
        }
        if gamepad.just_released(button) {
            events.send(make(false));
        }
    }
    if gamepad.just_pressed(GamepadButton::Start) {
        events.send(ControlEvent::ToggleInventory);
    }

    let axes = gamepad.left_stick();
    let threshold = config.axis_threshold;
    stick.x = axis_events(axes.x, threshold, stick.x, true, |e| {
        events.send(e);
    });
    stick.y = axis_events(axes.y, threshold, stick.y, false, |e| {
        events.send(e);
    });
}

/// Turn one stick axis reading into direction events.
///
/// Returns what is now held on this axis (`Heading::None` inside the
/// dead-zone). A held direction is pressed once, like a button; later
/// changes in strength are sent as `ControlEvent::Axis`.
pub fn axis_events(
    value: f32,
    threshold: f32,
    previous: AxisHold,
    horizontal: bool,
    mut emit: impl FnMut(ControlEvent),
) -> AxisHold {
    let current = if value.abs() > threshold {
        AxisHold { heading: Heading::from_axis(value, horizontal), value: value.abs() }
    } else {
        AxisHold::default()
    };

    if previous.heading != Heading::None && previous.heading != current.heading {
        emit(ControlEvent::Direction { heading: previous.heading, value: 0.0, active: false });
    }
    if current.heading != Heading::None {
        if current.heading != previous.heading {
            emit(ControlEvent::Direction { heading: current.heading, value: current.value, active: true });
        } else if current.value != previous.value {
            emit(ControlEvent::Axis { heading: current.heading, value: current.value });
        }
    }

    current
}
