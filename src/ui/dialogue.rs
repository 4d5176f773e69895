//! Sign text box.

use bevy::prelude::*;

use crate::core::{PlayState, ReadSignEvent};
use crate::input::ControlEvent;

/// Marker for the dialogue box.
#[derive(Component)]
pub struct DialogueBox;

/// Whether a control event should close an open dialogue.
pub fn dismisses_dialogue(control: &ControlEvent) -> bool {
    matches!(
        control,
        ControlEvent::Attack(true) | ControlEvent::Use(true) | ControlEvent::UseItem(true)
    )
}

/// Show the text of a sign the player read.
pub fn open_dialogue(
    mut commands: Commands,
    mut signs: EventReader<ReadSignEvent>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    let Some(sign) = signs.read().last() else {
        return;
    };

    debug!("Reading sign {:?}", sign.sign);
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(24.0),
                right: Val::Px(24.0),
                bottom: Val::Px(16.0),
                padding: UiRect::all(Val::Px(6.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.15, 0.9)),
            BorderColor(Color::srgb(0.9, 0.9, 0.9)),
            DialogueBox,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(sign.text.clone()),
                TextFont {
                    font_size: 8.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
    next_state.set(PlayState::Dialogue);
}

/// Close the box on any action button.
pub fn dialogue_input(
    state: Option<Res<State<PlayState>>>,
    mut controls: EventReader<ControlEvent>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if state.as_deref().map(State::get) != Some(&PlayState::Dialogue) {
        controls.clear();
        return;
    }
    if controls.read().any(dismisses_dialogue) {
        next_state.set(PlayState::Exploring);
    }
}

pub fn close_dialogue(mut commands: Commands, boxes: Query<Entity, With<DialogueBox>>) {
    for entity in boxes.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Heading;

    #[test]
    fn test_only_action_presses_dismiss() {
        assert!(dismisses_dialogue(&ControlEvent::Use(true)));
        assert!(dismisses_dialogue(&ControlEvent::Attack(true)));
        assert!(!dismisses_dialogue(&ControlEvent::Use(false)));
        assert!(!dismisses_dialogue(&ControlEvent::ToggleInventory));
        assert!(!dismisses_dialogue(&ControlEvent::Direction {
            heading: Heading::Up,
            value: 1.0,
            active: true,
        }));
    }
}
