// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::{OverlayStyle, OverlaySurface};
use crate::model::Point;

const LINE_HORIZONTAL: char = '─';
const LINE_VERTICAL: char = '│';
const LINE_FALLING: char = '╲';
const LINE_RISING: char = '╱';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineEdges(u8);

impl LineEdges {
    const NONE: Self = Self(0);
    const HORIZONTAL: Self = Self(1 << 0);
    const VERTICAL: Self = Self(1 << 1);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// One painted overlay cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCell {
    pub ch: char,
    pub style: OverlayStyle,
}

/// A transparent, fixed-size overlay grid.
///
/// Unpainted cells stay `None` so the desk below shows through. Collisions are deterministic:
/// - markers overwrite whatever is underneath (last writer wins)
/// - a horizontal and a vertical line crossing in one cell merge into `┼`
///
/// Points outside the grid are clipped silently; sheets may sit partly off screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayCanvas {
    width: usize,
    height: usize,
    cells: Vec<Option<OverlayCell>>,
    edges: Vec<LineEdges>,
}

impl OverlayCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width: usize::from(width),
            height: usize::from(height),
            cells: vec![None; len],
            edges: vec![LineEdges::NONE; len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.edges.fill(LineEdges::NONE);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<OverlayCell> {
        self.index_of(x, y).and_then(|idx| self.cells[idx])
    }

    /// Painted cells in row-major order as `(x, y, cell)`.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, OverlayCell)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.map(|cell| (idx % width, idx / width, cell)))
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some((y * self.width) + x)
    }

    fn put_line(&mut self, x: i32, y: i32, ch: char, style: OverlayStyle) {
        let Some(idx) = self.index_of(x, y) else {
            return;
        };
        let ch = match ch {
            LINE_HORIZONTAL | LINE_VERTICAL => {
                let edges = if ch == LINE_HORIZONTAL {
                    LineEdges::HORIZONTAL
                } else {
                    LineEdges::VERTICAL
                };
                self.edges[idx] = self.edges[idx].union(edges);
                glyph_for_edges(self.edges[idx])
            }
            other => {
                self.edges[idx] = LineEdges::NONE;
                other
            }
        };
        self.cells[idx] = Some(OverlayCell { ch, style });
    }
}

fn glyph_for_edges(edges: LineEdges) -> char {
    match edges.0 {
        1 => LINE_HORIZONTAL,
        2 => LINE_VERTICAL,
        _ => '┼',
    }
}

/// Picks one glyph for a whole line from its overall slope.
fn line_glyph(dx: i64, dy: i64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2 <= ax {
        LINE_HORIZONTAL
    } else if ax * 2 <= ay {
        LINE_VERTICAL
    } else if (dx > 0) == (dy > 0) {
        LINE_FALLING
    } else {
        LINE_RISING
    }
}

/// Clips a segment to the inclusive box `[0, max_x] x [0, max_y]` (Liang-Barsky).
///
/// Returns `None` when no part of the segment crosses the box. Endpoints already inside the box
/// come back unchanged.
fn clip_segment(
    from: (i64, i64),
    to: (i64, i64),
    max_x: i64,
    max_y: i64,
) -> Option<((i64, i64), (i64, i64))> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let dx = (to.0 - from.0) as f64;
    let dy = (to.1 - from.1) as f64;
    let (right, bottom) = (max_x as f64, max_y as f64);

    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, right - x0), (-dy, y0), (dy, bottom - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }

    let at = |t: f64| {
        let x = (x0 + t * dx).round().clamp(0.0, right) as i64;
        let y = (y0 + t * dy).round().clamp(0.0, bottom) as i64;
        (x, y)
    };
    Some((at(t_enter), at(t_exit)))
}

impl OverlaySurface for OverlayCanvas {
    /// Bresenham walk from `from` to `to`, inclusive, over the part that lies on the canvas.
    fn line(&mut self, from: Point, to: Point, style: OverlayStyle) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let from = (i64::from(from.x), i64::from(from.y));
        let to = (i64::from(to.x), i64::from(to.y));
        let ch = line_glyph(to.0 - from.0, to.1 - from.1);

        let max_x = i64::try_from(self.width - 1).unwrap_or(i64::MAX);
        let max_y = i64::try_from(self.height - 1).unwrap_or(i64::MAX);
        let Some(((start_x, start_y), (end_x, end_y))) = clip_segment(from, to, max_x, max_y) else {
            return;
        };

        let dx = end_x - start_x;
        let dy = end_y - start_y;
        let step_x = dx.signum();
        let step_y = dy.signum();
        let abs_dx = dx.abs();
        let abs_dy = -dy.abs();
        let mut err = abs_dx + abs_dy;
        let (mut x, mut y) = (start_x, start_y);

        loop {
            if let (Ok(cell_x), Ok(cell_y)) = (i32::try_from(x), i32::try_from(y)) {
                self.put_line(cell_x, cell_y, ch, style);
            }
            if x == end_x && y == end_y {
                break;
            }
            let doubled = err * 2;
            if doubled >= abs_dy {
                err += abs_dy;
                x += step_x;
            }
            if doubled <= abs_dx {
                err += abs_dx;
                y += step_y;
            }
        }
    }

    fn marker(&mut self, at: Point, style: OverlayStyle) {
        let Some(idx) = self.index_of(at.x, at.y) else {
            return;
        };
        self.edges[idx] = LineEdges::NONE;
        self.cells[idx] = Some(OverlayCell { ch: style.marker_glyph(), style });
    }
}

/// Renders unpainted cells as spaces and trims nothing, one text line per row.
impl fmt::Display for OverlayCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = (y * self.width) + x;
                let ch = self.cells[idx].map_or(' ', |cell| cell.ch);
                f.write_char(ch)?;
            }

            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}
