// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Shared deterministic benchmark fixtures (no RNG).

use fatesheet::model::{
    Rect, ReferenceSet, Sheet, SheetBody, SheetKind, SheetName, SheetRegistry,
};
use fatesheet::store::MemorySheetSource;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A handful of zones, a few links each.
    Small,
    /// Many zones sharing a pool of targets, lots of crossing lines.
    MediumDense,
    /// Wide desk, long reference lists, a share of dangling names.
    LargeDangling,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::MediumDense, Case::LargeDangling];

    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::MediumDense => "medium_dense",
            Case::LargeDangling => "large_dangling",
        }
    }

    /// `(zones, targets, references per zone, dangling per zone)`
    fn shape(self) -> (usize, usize, usize, usize) {
        match self {
            Case::Small => (3, 6, 3, 0),
            Case::MediumDense => (20, 40, 12, 0),
            Case::LargeDangling => (60, 120, 24, 4),
        }
    }
}

fn target_name(idx: usize) -> String {
    format!("Target {idx:03}")
}

fn zone_name(idx: usize) -> String {
    format!("Zone {idx:03}")
}

fn grid_rect(idx: usize) -> Rect {
    let column = (idx % 12) as i32;
    let row = (idx / 12) as i32;
    Rect::new(1 + column * 30, 1 + row * 10, 28, 9)
}

pub fn registry(case: Case) -> SheetRegistry {
    let (zones, targets, per_zone, dangling) = case.shape();
    let mut registry = SheetRegistry::new();

    for idx in 0..targets {
        let kind = if idx % 3 == 0 { SheetKind::Obstacle } else { SheetKind::Character };
        let mut sheet = Sheet::new(registry.allocate_id(), kind, grid_rect(idx));
        sheet.set_name(target_name(idx));
        registry.register(sheet).expect("register target");
    }

    for zone in 0..zones {
        let mut names: Vec<SheetName> =
            (0..per_zone).map(|step| SheetName::new(target_name((zone * 7 + step * 5) % targets))).collect();
        names.extend((0..dangling).map(|step| SheetName::new(format!("Gone {zone}-{step}"))));
        let mut references = ReferenceSet::new();
        for name in names {
            if !references.contains(name.as_str()) {
                references.push(name);
            }
        }

        let body = SheetBody::Zone(references);
        let mut sheet = Sheet::with_body(registry.allocate_id(), body, grid_rect(targets + zone));
        sheet.set_name(zone_name(zone));
        registry.register(sheet).expect("register zone");
    }

    registry
}

/// A chain of zones, each referencing the next and one character; the last points back to the
/// first.
pub fn zone_chain_source(len: usize) -> MemorySheetSource {
    let mut source = MemorySheetSource::new();
    for idx in 0..len {
        let next = zone_name((idx + 1) % len);
        let character = target_name(idx);
        source.insert(
            zone_name(idx),
            format!("WindowType: ZoneWindow\nName: {}\n{next}\n{character}\nNotes:\nImagePath:\n", zone_name(idx)),
        );
        source.insert(
            character.clone(),
            format!("WindowType: CharacterWindow\nName: {character}\nFate Points: 3\nNotes:\nImagePath:\n"),
        );
    }
    source
}

pub fn chain_entry() -> SheetName {
    SheetName::new(zone_name(0))
}
