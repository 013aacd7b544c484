// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zone link overlay.
//!
//! [`render_overlay`] walks a [`GraphSnapshot`] and issues draw calls against an
//! [`OverlaySurface`]. Positions come from a host-provided [`CoordinateMapper`] at draw time, so a
//! sheet that vanished since the snapshot was built is skipped instead of failing the pass.
//!
//! Surfaces only ever write overlay cells. Input hit-testing stays with the sheet windows.

use std::collections::BTreeSet;

use crate::graph::GraphSnapshot;
use crate::model::{Point, SheetId, SheetKind};

mod canvas;

pub use canvas::{OverlayCanvas, OverlayCell};

/// Converts a sheet to its anchor point in the overlay's own coordinate space.
pub trait CoordinateMapper {
    /// `None` once the sheet is gone or no longer shown.
    fn anchor_of(&self, sheet: SheetId) -> Option<Point>;
}

impl<F> CoordinateMapper for F
where
    F: Fn(SheetId) -> Option<Point>,
{
    fn anchor_of(&self, sheet: SheetId) -> Option<Point> {
        self(sheet)
    }
}

/// Visual style of a marker or link line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayStyle {
    /// Anchor of the zone itself.
    Zone,
    Character,
    Obstacle,
    /// Every other target kind.
    Default,
}

impl OverlayStyle {
    pub fn for_target(kind: SheetKind) -> Self {
        match kind {
            SheetKind::Character => Self::Character,
            SheetKind::Obstacle => Self::Obstacle,
            SheetKind::Zone | SheetKind::Default => Self::Default,
        }
    }

    pub fn marker_glyph(self) -> char {
        match self {
            Self::Zone => '◆',
            Self::Character => '●',
            Self::Obstacle => '■',
            Self::Default => '○',
        }
    }
}

/// Drawing target for the overlay.
pub trait OverlaySurface {
    /// Draws a link line from a zone anchor to a target anchor. `style` is keyed by target kind.
    fn line(&mut self, from: Point, to: Point, style: OverlayStyle);

    fn marker(&mut self, at: Point, style: OverlayStyle);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    pub zone_markers: usize,
    pub target_markers: usize,
    pub lines: usize,
    /// Pairs dropped because the mapper no longer knew one of the two sheets.
    pub skipped: usize,
}

/// Draws every zone→target link in `snapshot`.
///
/// Lines go down first, then one marker per distinct target, then one marker per zone, so markers
/// always sit on top of the lines that meet them.
pub fn render_overlay<M, S>(snapshot: &GraphSnapshot, mapper: &M, surface: &mut S) -> OverlayStats
where
    M: CoordinateMapper + ?Sized,
    S: OverlaySurface + ?Sized,
{
    let mut stats = OverlayStats::default();
    let mut zone_markers = Vec::new();
    let mut target_markers = Vec::new();
    let mut seen_targets = BTreeSet::<SheetId>::new();

    for links in snapshot.zones() {
        let Some(zone_at) = mapper.anchor_of(links.zone) else {
            stats.skipped += links.targets.len();
            continue;
        };
        zone_markers.push(zone_at);

        for target in &links.targets {
            let Some(target_at) = mapper.anchor_of(target.sheet) else {
                stats.skipped += 1;
                continue;
            };
            let style = OverlayStyle::for_target(target.kind);
            surface.line(zone_at, target_at, style);
            stats.lines += 1;

            if seen_targets.insert(target.sheet) {
                target_markers.push((target_at, style));
            }
        }
    }

    for (at, style) in target_markers {
        surface.marker(at, style);
        stats.target_markers += 1;
    }
    for at in zone_markers {
        surface.marker(at, OverlayStyle::Zone);
        stats.zone_markers += 1;
    }

    stats
}
