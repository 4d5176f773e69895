//! Inventory screen - the panel that drops down over the game, its item
//! icons, and the selection cursor.

use bevy::prelude::*;

use super::inventory_grid::{Cell, InventoryGrid};
use crate::core::{Easing, PlayState, PlaySfxEvent, Sfx, Tween, TweenAction, TweenCompleted};
use crate::input::ControlEvent;
use crate::inventory::{Equipped, ItemRegistry, PlayerInventory};
use crate::player::Player;

/// Height of the game view in UI pixels; the panel hides just above it.
pub const GAME_HEIGHT: f32 = 224.0;
/// Time for the panel to slide in or out.
pub const SLIDE_TIME: f32 = 0.5;

const ICON_SIZE: f32 = 16.0;

/// Where the panel is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventorySlide {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Inventory screen state.
#[derive(Resource, Debug, Default)]
pub struct InventoryScreen {
    pub grid: InventoryGrid,
    pub selected: Option<Cell>,
    pub slide: InventorySlide,
}

impl InventoryScreen {
    pub fn new(grid: InventoryGrid) -> Self {
        Self {
            grid,
            ..default()
        }
    }

    /// Begin opening. Rejected unless fully closed.
    pub fn open(&mut self) -> bool {
        if self.slide != InventorySlide::Closed {
            return false;
        }
        self.slide = InventorySlide::Opening;
        true
    }

    /// Begin closing. Rejected unless fully open.
    pub fn close(&mut self) -> bool {
        if self.slide != InventorySlide::Open {
            return false;
        }
        self.slide = InventorySlide::Closing;
        true
    }

    /// Complete the running slide. Returns whether the panel is now open,
    /// or `None` if nothing was sliding.
    pub fn finish_slide(&mut self) -> Option<bool> {
        match self.slide {
            InventorySlide::Opening => {
                self.slide = InventorySlide::Open;
                Some(true)
            }
            InventorySlide::Closing => {
                self.slide = InventorySlide::Closed;
                Some(false)
            }
            _ => None,
        }
    }

    /// Move the cursor one step. Returns the newly selected cell.
    pub fn step(&mut self, step: IVec2, visible: impl Fn(&str) -> bool) -> Option<Cell> {
        let from = self.selected?;
        let next = self.grid.find_next(from, step, visible)?;
        self.selected = Some(next);
        Some(next)
    }
}

/// Root of the inventory panel.
#[derive(Component)]
pub struct InventoryPanel;

/// Icon node for one item descriptor.
#[derive(Component, Debug)]
pub struct InventoryIcon {
    pub item: String,
    pub frame: String,
}

/// Highlight drawn around the selected cell.
#[derive(Component)]
pub struct InventorySelector;

/// Build the grid and spawn the hidden panel.
pub fn spawn_inventory_panel(
    mut commands: Commands,
    registry: Res<ItemRegistry>,
    asset_server: Res<AssetServer>,
) {
    commands.insert_resource(InventoryScreen::new(InventoryGrid::from_registry(&registry)));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(-GAME_HEIGHT),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(GAME_HEIGHT),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.1, 0.9)),
            Visibility::Hidden,
            InventoryPanel,
        ))
        .with_children(|panel| {
            for item in &registry.items {
                let frame = item.icon_for(&PlayerInventory::default());
                panel.spawn((
                    ImageNode::new(asset_server.load(format!("gui/{}", frame))),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(item.position.0),
                        top: Val::Px(item.position.1),
                        width: Val::Px(ICON_SIZE),
                        height: Val::Px(ICON_SIZE),
                        ..default()
                    },
                    Visibility::Hidden,
                    InventoryIcon {
                        item: item.name.clone(),
                        frame,
                    },
                ));
            }

            panel.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(ICON_SIZE + 10.0),
                    height: Val::Px(ICON_SIZE + 10.0),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BorderColor(Color::srgb(0.95, 0.9, 0.3)),
                Visibility::Hidden,
                InventorySelector,
            ));
        });
}

pub fn cleanup_inventory_panel(mut commands: Commands, panels: Query<Entity, With<InventoryPanel>>) {
    for entity in panels.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<InventoryScreen>();
}

/// Open or close the panel on the inventory button.
pub fn toggle_inventory(
    mut commands: Commands,
    state: Option<Res<State<PlayState>>>,
    mut controls: EventReader<ControlEvent>,
    mut screen: ResMut<InventoryScreen>,
    mut panels: Query<(Entity, &mut Visibility), With<InventoryPanel>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let toggled = controls
        .read()
        .filter(|c| matches!(c, ControlEvent::ToggleInventory))
        .count()
        > 0;
    let state = state.as_deref().map(State::get);
    if !toggled || !matches!(state, Some(PlayState::Exploring | PlayState::Inventory)) {
        return;
    }
    let Ok((panel, mut visibility)) = panels.get_single_mut() else {
        return;
    };

    let slide = screen.slide;
    let (from, to, opening) = match slide {
        InventorySlide::Closed if screen.open() => (-GAME_HEIGHT, 0.0, true),
        InventorySlide::Open if screen.close() => (0.0, -GAME_HEIGHT, false),
        _ => return,
    };

    if opening {
        *visibility = Visibility::Inherited;
        sfx.send(PlaySfxEvent(Sfx::Pause));
    }
    commands.entity(panel).insert(
        Tween::ui_top(from, to, SLIDE_TIME)
            .with_easing(Easing::SineOut)
            .on_complete(TweenAction::InventorySlide { opening }),
    );
}

/// Switch play state once the panel has finished moving.
pub fn finish_inventory_slide(
    mut completed: EventReader<TweenCompleted>,
    mut screen: ResMut<InventoryScreen>,
    mut panels: Query<&mut Visibility, With<InventoryPanel>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    for done in completed.read() {
        let TweenAction::InventorySlide { .. } = done.action else {
            continue;
        };
        match screen.finish_slide() {
            Some(true) => next_state.set(PlayState::Inventory),
            Some(false) => {
                if let Ok(mut visibility) = panels.get_mut(done.entity) {
                    *visibility = Visibility::Hidden;
                }
                next_state.set(PlayState::Exploring);
            }
            None => {}
        }
    }
}

/// Move the cursor while the panel is open; the selection is equipped.
pub fn navigate_inventory(
    state: Option<Res<State<PlayState>>>,
    mut controls: EventReader<ControlEvent>,
    mut screen: ResMut<InventoryScreen>,
    registry: Res<ItemRegistry>,
    mut players: Query<(&PlayerInventory, &mut Equipped), With<Player>>,
) {
    if state.as_deref().map(State::get) != Some(&PlayState::Inventory)
        || screen.slide != InventorySlide::Open
    {
        controls.clear();
        return;
    }
    let Ok((inventory, mut equipped)) = players.get_single_mut() else {
        return;
    };
    let visible = |name: &str| registry.get(name).is_some_and(|d| d.is_visible(inventory));

    for control in controls.read() {
        let ControlEvent::Direction { heading, active: true, .. } = *control else {
            continue;
        };
        // grid rows grow downward
        let step = heading.vector().as_ivec2() * IVec2::new(1, -1);
        if let Some(cell) = screen.step(step, visible) {
            let name = screen.grid.visible_item(cell, visible).map(str::to_string);
            debug!("Equipped {:?}", name);
            equipped.0 = name;
        }
    }
}

/// Refresh icon visibility and frames from the live inventory, and pick a
/// selection as soon as anything selectable exists.
pub fn refresh_inventory_icons(
    asset_server: Res<AssetServer>,
    registry: Res<ItemRegistry>,
    mut screen: ResMut<InventoryScreen>,
    mut players: Query<(&PlayerInventory, &mut Equipped), With<Player>>,
    mut icons: Query<(&mut InventoryIcon, &mut ImageNode, &mut Visibility), Without<InventorySelector>>,
    mut selector: Query<(&mut Node, &mut Visibility), With<InventorySelector>>,
) {
    let Ok((inventory, mut equipped)) = players.get_single_mut() else {
        return;
    };

    for (mut icon, mut image, mut visibility) in icons.iter_mut() {
        let Some(descriptor) = registry.get(&icon.item) else {
            continue;
        };
        let shown = descriptor.is_visible(inventory);
        *visibility = if shown { Visibility::Inherited } else { Visibility::Hidden };

        if shown {
            let frame = descriptor.icon_for(inventory);
            if frame != icon.frame {
                image.image = asset_server.load(format!("gui/{}", frame));
                icon.frame = frame;
            }
        }
    }

    let visible = |name: &str| registry.get(name).is_some_and(|d| d.is_visible(inventory));
    if screen.selected.is_none() {
        if let Some(cell) = screen.grid.first_visible(visible) {
            screen.selected = Some(cell);
            equipped.0 = screen.grid.visible_item(cell, visible).map(str::to_string);
        }
    }

    let Ok((mut node, mut visibility)) = selector.get_single_mut() else {
        return;
    };
    let selected = screen
        .selected
        .and_then(|cell| screen.grid.visible_item(cell, visible))
        .and_then(|name| registry.get(name));
    match selected {
        Some(descriptor) => {
            node.left = Val::Px(descriptor.position.0 - 5.0);
            node.top = Val::Px(descriptor.position.1 - 5.0);
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> InventoryScreen {
        InventoryScreen::new(InventoryGrid::new([((0, 0), "bow"), ((1, 0), "hammer")]))
    }

    #[test]
    fn test_open_close_cycle() {
        let mut screen = screen();
        assert!(screen.open());
        assert_eq!(screen.slide, InventorySlide::Opening);
        assert_eq!(screen.finish_slide(), Some(true));
        assert!(screen.close());
        assert_eq!(screen.finish_slide(), Some(false));
        assert_eq!(screen.slide, InventorySlide::Closed);
    }

    #[test]
    fn test_requests_rejected_while_sliding() {
        let mut screen = screen();
        assert!(screen.open());
        assert!(!screen.open());
        assert!(!screen.close());
        assert_eq!(screen.slide, InventorySlide::Opening);

        screen.finish_slide();
        assert!(screen.close());
        assert!(!screen.open());
        assert!(!screen.close());
        assert_eq!(screen.slide, InventorySlide::Closing);
    }

    #[test]
    fn test_requests_rejected_in_target_state() {
        let mut screen = screen();
        assert!(!screen.close());
        assert_eq!(screen.slide, InventorySlide::Closed);

        screen.open();
        screen.finish_slide();
        assert!(!screen.open());
        assert_eq!(screen.slide, InventorySlide::Open);
    }

    #[test]
    fn test_finish_without_slide_is_noop() {
        let mut screen = screen();
        assert_eq!(screen.finish_slide(), None);
        assert_eq!(screen.slide, InventorySlide::Closed);
    }

    #[test]
    fn test_step_needs_a_selection() {
        let mut screen = screen();
        assert_eq!(screen.step(IVec2::X, |_| true), None);
        screen.selected = Some((0, 0));
        assert_eq!(screen.step(IVec2::X, |_| true), Some((1, 0)));
        assert_eq!(screen.selected, Some((1, 0)));
    }

    #[test]
    fn test_step_with_nothing_visible_keeps_selection() {
        let mut screen = screen();
        screen.selected = Some((1, 0));
        assert_eq!(screen.step(IVec2::NEG_X, |_| false), None);
        assert_eq!(screen.selected, Some((1, 0)));
    }
}
