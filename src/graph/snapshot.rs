// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::model::{Point, SheetId, SheetKind, SheetName, SheetRegistry};

/// A reference that resolved to a renderable sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub sheet: SheetId,
    pub name: SheetName,
    pub anchor: Point,
    pub kind: SheetKind,
}

/// Links of one renderable Zone sheet, in reference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLinks {
    pub zone: SheetId,
    pub anchor: Point,
    pub targets: SmallVec<[ResolvedTarget; 4]>,
}

/// A reference name that matched no registered sheet at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub zone: SheetId,
    pub name: SheetName,
}

/// Immutable view of every currently resolvable zone→target link.
///
/// Snapshots are rebuilt wholesale; nothing patches one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    zones: BTreeMap<SheetId, ZoneLinks>,
    dangling: Vec<DanglingReference>,
}

impl GraphSnapshot {
    pub fn zones(&self) -> impl Iterator<Item = &ZoneLinks> {
        self.zones.values()
    }

    pub fn zone(&self, zone: SheetId) -> Option<&ZoneLinks> {
        self.zones.get(&zone)
    }

    pub fn targets_of(&self, zone: SheetId) -> &[ResolvedTarget] {
        self.zones.get(&zone).map(|links| links.targets.as_slice()).unwrap_or(&[])
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn link_count(&self) -> usize {
        self.zones.values().map(|links| links.targets.len()).sum()
    }

    /// Names that did not resolve. Diagnostic only; they never appear as targets.
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    pub fn is_dangling(&self, zone: SheetId, name: &str) -> bool {
        self.dangling.iter().any(|dangling| dangling.zone == zone && dangling.name == name)
    }
}

/// Builds a snapshot from the current registry state.
///
/// Pure: the same registry contents always produce an equal snapshot. Only renderable zones get
/// an entry, and a reference survives only when its name resolves to a renderable sheet. A
/// reference to a minimized sheet is omitted here but stays in the zone's reference set.
pub fn build_snapshot(registry: &SheetRegistry) -> GraphSnapshot {
    let mut snapshot = GraphSnapshot::default();

    for zone in registry.all_renderable().filter(|sheet| sheet.kind().is_zone()) {
        let Some(references) = zone.references() else {
            continue;
        };

        let mut targets = SmallVec::<[ResolvedTarget; 4]>::new();
        for name in references.names_in_order() {
            match registry.find_by_name(name.as_str()) {
                Some(target) if target.is_renderable() => targets.push(ResolvedTarget {
                    sheet: target.id(),
                    name: name.clone(),
                    anchor: target.rect().center(),
                    kind: target.kind(),
                }),
                Some(_) => {}
                None => snapshot.dangling.push(DanglingReference {
                    zone: zone.id(),
                    name: name.clone(),
                }),
            }
        }

        snapshot.zones.insert(
            zone.id(),
            ZoneLinks { zone: zone.id(), anchor: zone.rect().center(), targets },
        );
    }

    snapshot
}
