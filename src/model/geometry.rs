// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

pub const MIN_SHEET_WIDTH: u16 = 12;
pub const MIN_SHEET_HEIGHT: u16 = 4;

pub const DEFAULT_SHEET_WIDTH: u16 = 28;
pub const DEFAULT_SHEET_HEIGHT: u16 = 9;
/// Restored sheet origins are clamped to `-DESK_COORD_LIMIT..=DESK_COORD_LIMIT` on both axes.
pub const DESK_COORD_LIMIT: i32 = 100_000;
const CASCADE_STEP_X: i32 = 4;
const CASCADE_STEP_Y: i32 = 2;
const CASCADE_WRAP: usize = 10;

/// A cell position in the shared desk coordinate space.
///
/// Desk coordinates may be negative: sheets can be dragged partially off screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width: width.max(MIN_SHEET_WIDTH),
            height: height.max(MIN_SHEET_HEIGHT),
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(i32::from(self.width))
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(i32::from(self.height))
    }

    /// The anchor point used for link lines.
    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(i32::from(self.width / 2)),
            self.y.saturating_add(i32::from(self.height / 2)),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy), ..self }
    }

    pub fn resized(self, dw: i32, dh: i32) -> Self {
        let width = (i32::from(self.width) + dw).clamp(i32::from(MIN_SHEET_WIDTH), i32::from(u16::MAX));
        let height =
            (i32::from(self.height) + dh).clamp(i32::from(MIN_SHEET_HEIGHT), i32::from(u16::MAX));
        Self { width: width as u16, height: height as u16, ..self }
    }

    /// Pulls a rect read from disk back into the desk's coordinate limits and minimum size.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.x.clamp(-DESK_COORD_LIMIT, DESK_COORD_LIMIT),
            self.y.clamp(-DESK_COORD_LIMIT, DESK_COORD_LIMIT),
            self.width,
            self.height,
        )
    }
}

/// Default placement for the `index`-th sheet opened on the desk.
///
/// Sheets step down and to the right, wrapping back to the origin every few sheets so new
/// windows stay near the top-left of the desk.
pub fn cascade_rect(index: usize) -> Rect {
    let step = (index % CASCADE_WRAP) as i32;
    let column = (index / CASCADE_WRAP) as i32;
    Rect::new(
        1 + step * CASCADE_STEP_X + column * i32::from(DEFAULT_SHEET_WIDTH),
        1 + step * CASCADE_STEP_Y,
        DEFAULT_SHEET_WIDTH,
        DEFAULT_SHEET_HEIGHT,
    )
}
