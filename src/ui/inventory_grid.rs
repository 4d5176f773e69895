//! Selection grid for the inventory screen.
//!
//! Cells are addressed `(column, row)`. A cell may hold several items (the
//! bottle slot does) and is selectable while any of them is visible.
//! Moving off an edge wraps onto the neighbouring row or column, so the
//! cursor walks every cell in reading order when stepping right and in
//! column order when stepping down.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::inventory::ItemRegistry;

pub type Cell = (u32, u32);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryGrid {
    cells: BTreeMap<Cell, Vec<String>>,
    max_x: u32,
    max_y: u32,
}

impl InventoryGrid {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (Cell, S)>) -> Self {
        let mut grid = Self::default();
        for (cell, name) in entries {
            grid.max_x = grid.max_x.max(cell.0);
            grid.max_y = grid.max_y.max(cell.1);
            grid.cells.entry(cell).or_default().push(name.into());
        }
        grid
    }

    pub fn from_registry(registry: &ItemRegistry) -> Self {
        Self::new(
            registry
                .grid_items()
                .filter_map(|item| item.grid.map(|cell| (cell, item.name.clone()))),
        )
    }

    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    /// Items in a cell, in registration order.
    pub fn items(&self, cell: Cell) -> &[String] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First visible item in a cell.
    pub fn visible_item(&self, cell: Cell, visible: impl Fn(&str) -> bool) -> Option<&str> {
        self.items(cell).iter().map(String::as_str).find(|name| visible(name))
    }

    fn is_selectable(&self, cell: Cell, visible: &impl Fn(&str) -> bool) -> bool {
        self.items(cell).iter().any(|name| visible(name))
    }

    /// Wrap a position that stepped off the grid.
    pub fn wrap(&self, mut pos: IVec2) -> IVec2 {
        let max_x = self.max_x as i32;
        let max_y = self.max_y as i32;

        if pos.x < 0 {
            pos.y -= 1;
            pos.x = max_x;
            if pos.y < 0 {
                pos.y = max_y;
            }
        } else if pos.x > max_x {
            pos.y += 1;
            pos.x = 0;
            if pos.y > max_y {
                pos.y = 0;
            }
        }

        if pos.y < 0 {
            pos.x -= 1;
            pos.y = max_y;
            if pos.x < 0 {
                pos.x = max_x;
            }
        } else if pos.y > max_y {
            pos.x += 1;
            pos.y = 0;
            if pos.x > max_x {
                pos.x = 0;
            }
        }

        pos
    }

    /// Step from `from` until a selectable cell is reached. `None` when
    /// nothing in the grid is visible.
    pub fn find_next(&self, from: Cell, step: IVec2, visible: impl Fn(&str) -> bool) -> Option<Cell> {
        if step == IVec2::ZERO {
            return None;
        }

        let mut pos = IVec2::new(from.0 as i32, from.1 as i32);
        let limit = (self.max_x + 1) * (self.max_y + 1) + 1;
        for _ in 0..limit {
            pos = self.wrap(pos + step);
            let cell = (pos.x as u32, pos.y as u32);
            if self.is_selectable(cell, &visible) {
                return Some(cell);
            }
        }
        None
    }

    /// First selectable cell in reading order.
    pub fn first_visible(&self, visible: impl Fn(&str) -> bool) -> Option<Cell> {
        (0..=self.max_y)
            .flat_map(|y| (0..=self.max_x).map(move |x| (x, y)))
            .find(|cell| self.is_selectable(*cell, &visible))
    }
}
