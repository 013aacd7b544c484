// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The desk host.
//!
//! A [`Workspace`] owns the sheet registry, window stacking order, the periodic scheduler and
//! the current graph snapshot. Every user-driven mutation rebuilds the snapshot before returning;
//! periodic work happens in [`Workspace::tick`].

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info, warn};

use crate::graph::{build_snapshot, GraphSnapshot, LazyLoader, LoadReport, Unresolved, UnresolvedReason};
use crate::model::{
    cascade_rect, Point, RegistryError, Sheet, SheetField, SheetId, SheetKind, SheetName,
    SheetRegistry, SheetRow, WindowState,
};
use crate::overlay::CoordinateMapper;
use crate::scheduler::{Scheduler, Ticks};
use crate::store::{DeskLayout, DeskLayoutEntry, SheetFolder, SheetSource, StoreError};

#[derive(Debug)]
pub enum WorkspaceError {
    NoSheetFolder,
    Registry(RegistryError),
    Store(StoreError),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSheetFolder => f.write_str("no sheet folder is attached to this desk"),
            Self::Registry(err) => write!(f, "registry error: {err}"),
            Self::Store(err) => write!(f, "store error: {err}"),
        }
    }
}

impl std::error::Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoSheetFolder => None,
            Self::Registry(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RegistryError> for WorkspaceError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<StoreError> for WorkspaceError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    /// Zone entries rewritten from the old name to the new one.
    pub substituted: usize,
    /// Another open sheet already uses the new name.
    pub shadowed: bool,
}

#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: Vec<PathBuf>,
    /// Sheets that could not be written, typically because of a blank or path-like name.
    pub failed: Vec<(SheetId, StoreError)>,
}

pub struct Workspace {
    registry: SheetRegistry,
    /// Back to front.
    z_order: Vec<SheetId>,
    scheduler: Scheduler,
    snapshot: GraphSnapshot,
    folder: Option<SheetFolder>,
}

impl Workspace {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            registry: SheetRegistry::new(),
            z_order: Vec::new(),
            scheduler,
            snapshot: GraphSnapshot::default(),
            folder: None,
        }
    }

    pub fn with_folder(mut self, folder: SheetFolder) -> Self {
        self.folder = Some(folder);
        self
    }

    pub fn folder(&self) -> Option<&SheetFolder> {
        self.folder.as_ref()
    }

    pub fn registry(&self) -> &SheetRegistry {
        &self.registry
    }

    pub fn sheet(&self, id: SheetId) -> Option<&Sheet> {
        self.registry.get(id)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The snapshot from the latest rebuild.
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Sheet ids from back to front.
    pub fn z_order(&self) -> &[SheetId] {
        &self.z_order
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn new_sheet(&mut self, kind: SheetKind) -> Result<SheetId, WorkspaceError> {
        let sheet = Sheet::new(self.registry.allocate_id(), kind, cascade_rect(self.registry.len()));
        let id = self.registry.register(sheet)?;
        self.z_order.push(id);
        info!("new {kind} sheet {id}");
        self.rebuild_snapshot();
        Ok(id)
    }

    /// Closes one sheet. References to it elsewhere are left for the next reconciliation.
    pub fn close_sheet(&mut self, id: SheetId) -> Option<Sheet> {
        let sheet = self.registry.unregister(id)?;
        self.z_order.retain(|other| *other != id);
        info!("closed sheet {id} {:?}", sheet.name().as_str());
        self.rebuild_snapshot();
        Some(sheet)
    }

    pub fn close_all(&mut self) -> usize {
        let ids = self.registry.ids();
        for id in &ids {
            self.registry.unregister(*id);
        }
        self.z_order.clear();
        info!("closed all {} sheets", ids.len());
        self.rebuild_snapshot();
        ids.len()
    }

    /// Renames a sheet and carries zone links along with it.
    ///
    /// Zone entries naming the old name are rewritten only when no other open sheet still answers
    /// to the old name; otherwise they keep pointing at that other sheet.
    pub fn rename_sheet(&mut self, id: SheetId, name: impl Into<SheetName>) -> Option<RenameOutcome> {
        let name = name.into();
        let old = self.registry.get(id)?.name().clone();
        if old == name {
            return Some(RenameOutcome::default());
        }

        let shadowed = !name.is_blank() && !self.registry.name_is_unique(name.as_str(), Some(id));
        self.registry.get_mut(id)?.set_name(name.clone());

        let mut substituted = 0;
        let old_still_live = self.registry.find_by_name(old.as_str()).is_some();
        if !old.is_blank() && !name.is_blank() && !old_still_live {
            for zone in self.registry.zone_ids() {
                if let Some(references) = self.registry.get_mut(zone).and_then(Sheet::references_mut) {
                    substituted += references.rename(old.as_str(), &name);
                }
            }
        }

        if shadowed {
            warn!("sheet {id} renamed to {:?}, which another open sheet already uses", name.as_str());
        }
        info!(
            "renamed sheet {id} {:?} -> {:?} ({substituted} zone references updated)",
            old.as_str(),
            name.as_str()
        );
        self.rebuild_snapshot();
        Some(RenameOutcome { substituted, shadowed })
    }

    /// Names a zone's add-reference picker offers.
    ///
    /// Other open non-zone sheets with a non-blank name that the zone does not already reference,
    /// deduplicated, in registration order.
    pub fn picker_options(&self, zone: SheetId) -> Vec<SheetName> {
        let Some(references) = self.registry.get(zone).and_then(Sheet::references) else {
            return Vec::new();
        };

        let mut options: Vec<SheetName> = Vec::new();
        for sheet in self.registry.iter() {
            if sheet.id() == zone || sheet.kind().is_zone() || sheet.name().is_blank() {
                continue;
            }
            if references.contains(sheet.name().as_str()) || options.contains(sheet.name()) {
                continue;
            }
            options.push(sheet.name().clone());
        }
        options
    }

    /// Adds `name` to a zone if the picker currently offers it.
    pub fn add_reference(&mut self, zone: SheetId, name: &str) -> bool {
        let offered = self.picker_options(zone);
        let Some(references) = self.registry.get_mut(zone).and_then(Sheet::references_mut) else {
            return false;
        };
        let added = references.add(name, &offered);
        if added {
            info!("zone {zone} now references {name:?}");
            self.rebuild_snapshot();
        } else {
            debug!("zone {zone}: {name:?} is not on offer; reference not added");
        }
        added
    }

    pub fn remove_reference(&mut self, zone: SheetId, name: &str) -> bool {
        let Some(references) = self.registry.get_mut(zone).and_then(Sheet::references_mut) else {
            return false;
        };
        let removed = references.remove(name);
        if removed {
            info!("zone {zone} no longer references {name:?}");
            self.rebuild_snapshot();
        }
        removed
    }

    /// Replaces the text of one content field. Names and references are not fields.
    pub fn set_field(&mut self, id: SheetId, field: SheetField, value: impl Into<String>) -> bool {
        let Some(sheet) = self.registry.get_mut(id) else {
            return false;
        };
        let updated = sheet.set_field(field, value);
        if updated {
            debug!("sheet {id}: {} updated", field.label());
            self.rebuild_snapshot();
        }
        updated
    }

    /// Appends a row to a character's aspects or stunts or to an obstacle. Returns its first field.
    pub fn add_row(&mut self, id: SheetId, row: SheetRow) -> Option<SheetField> {
        let field = self.registry.get_mut(id)?.add_row(row)?;
        info!("sheet {id}: added {row:?} row");
        self.rebuild_snapshot();
        Some(field)
    }

    pub fn remove_row(&mut self, id: SheetId, row: SheetRow, index: usize) -> bool {
        let removed = self.registry.get_mut(id).is_some_and(|sheet| sheet.remove_row(row, index));
        if removed {
            info!("sheet {id}: removed {row:?} row {index}");
            self.rebuild_snapshot();
        }
        removed
    }

    pub fn set_window_state(&mut self, id: SheetId, state: WindowState) -> bool {
        let Some(sheet) = self.registry.get_mut(id) else {
            return false;
        };
        if sheet.window_state() == state {
            return true;
        }
        sheet.set_window_state(state);
        debug!("sheet {id} is now {state:?}");
        self.rebuild_snapshot();
        true
    }

    /// Minimizes a normal sheet or restores a minimized one.
    pub fn toggle_minimized(&mut self, id: SheetId) -> Option<WindowState> {
        let next = match self.registry.get(id)?.window_state() {
            WindowState::Minimized => WindowState::Normal,
            _ => WindowState::Minimized,
        };
        self.set_window_state(id, next);
        Some(next)
    }

    pub fn move_sheet(&mut self, id: SheetId, dx: i32, dy: i32) -> bool {
        let Some(sheet) = self.registry.get_mut(id) else {
            return false;
        };
        sheet.set_rect(sheet.rect().translated(dx, dy));
        self.rebuild_snapshot();
        true
    }

    pub fn resize_sheet(&mut self, id: SheetId, dw: i32, dh: i32) -> bool {
        let Some(sheet) = self.registry.get_mut(id) else {
            return false;
        };
        sheet.set_rect(sheet.rect().resized(dw, dh));
        self.rebuild_snapshot();
        true
    }

    /// Moves a sheet to the front of the stacking order.
    pub fn raise(&mut self, id: SheetId) -> bool {
        let Some(pos) = self.z_order.iter().position(|other| *other == id) else {
            return false;
        };
        let id = self.z_order.remove(pos);
        self.z_order.push(id);
        true
    }

    /// The frontmost renderable sheet whose rect contains `point` (desk coordinates).
    pub fn hit_test(&self, point: Point) -> Option<SheetId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.registry
                .get(*id)
                .is_some_and(|sheet| sheet.is_renderable() && sheet.rect().contains(point))
        })
    }

    /// Loads the named sheets from the attached folder.
    pub fn load_sheets(&mut self, names: &[SheetName]) -> Result<LoadReport, WorkspaceError> {
        let folder = self.folder.clone().ok_or(WorkspaceError::NoSheetFolder)?;
        Ok(self.load_from(&folder, names))
    }

    /// Opens each named record as a new sheet, even if one by that name is already open.
    ///
    /// Zone references of the loaded sheets are opened on demand when not already open.
    pub fn load_from<S: SheetSource + ?Sized>(&mut self, source: &S, names: &[SheetName]) -> LoadReport {
        let place = cascade_rect;
        let mut loader = LazyLoader::new(source, &place);
        let mut unreadable = Vec::new();

        for name in names {
            match source.read_record(name) {
                Ok(record) => {
                    loader.open_record(&mut self.registry, &record);
                }
                Err(err) => {
                    warn!("cannot load {:?}: {err}", name.as_str());
                    let reason = if source.exists(name) {
                        UnresolvedReason::Unreadable(err.to_string())
                    } else {
                        UnresolvedReason::MissingRecord
                    };
                    unreadable.push(Unresolved { name: name.clone(), reason });
                }
            }
        }

        let mut report = loader.finish();
        report.unresolved.extend(unreadable);
        self.finish_load(&report);
        report
    }

    /// Returns the open sheet called `name`, opening it (and its references) from `source`.
    pub fn ensure_open<S: SheetSource + ?Sized>(
        &mut self,
        source: &S,
        name: &SheetName,
    ) -> (Option<SheetId>, LoadReport) {
        let place = cascade_rect;
        let mut loader = LazyLoader::new(source, &place);
        let id = loader.ensure_open(&mut self.registry, name);
        let report = loader.finish();
        self.finish_load(&report);
        (id, report)
    }

    fn finish_load(&mut self, report: &LoadReport) {
        self.z_order.extend(report.opened.iter().copied());
        for unresolved in &report.unresolved {
            debug!("left {:?} unresolved: {}", unresolved.name.as_str(), unresolved.reason);
        }
        info!(
            "load finished: {} opened, {} unresolved",
            report.opened.len(),
            report.unresolved.len()
        );
        self.rebuild_snapshot();
    }

    /// Writes every sheet to the attached folder, then the desk layout.
    ///
    /// A name shared by several open sheets is written once, from the sheet name lookups resolve
    /// to. The others are reported as failed so their content is not silently dropped.
    pub fn save_all(&self) -> Result<SaveReport, WorkspaceError> {
        let folder = self.folder.as_ref().ok_or(WorkspaceError::NoSheetFolder)?;
        let mut report = SaveReport::default();
        for id in &self.z_order {
            let Some(sheet) = self.registry.get(*id) else {
                continue;
            };
            if !self.owns_name(sheet) {
                let name = sheet.name().as_str();
                warn!("sheet {id} shares the name {name:?} with an earlier sheet; not saved");
                let err = StoreError::DuplicateName { name: sheet.name().clone() };
                report.failed.push((*id, err));
                continue;
            }
            match folder.save_sheet(sheet) {
                Ok(path) => report.saved.push(path),
                Err(err) => {
                    warn!("cannot save sheet {id}: {err}");
                    report.failed.push((*id, err));
                }
            }
        }
        self.save_layout()?;
        info!("saved {} sheets ({} failed)", report.saved.len(), report.failed.len());
        Ok(report)
    }

    /// Current arrangement of named sheets, back to front.
    pub fn layout(&self) -> DeskLayout {
        let sheets = self
            .z_order
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .filter(|sheet| !sheet.name().is_blank() && self.owns_name(sheet))
            .map(|sheet| DeskLayoutEntry {
                name: sheet.name().clone(),
                kind: sheet.kind(),
                rect: sheet.rect(),
                minimized: sheet.window_state() == WindowState::Minimized,
            })
            .collect();
        DeskLayout { sheets }
    }

    /// Blank names own nothing and fall through to the store's own name check.
    fn owns_name(&self, sheet: &Sheet) -> bool {
        sheet.name().is_blank()
            || self.registry.find_by_name(sheet.name().as_str()).map(Sheet::id) == Some(sheet.id())
    }

    /// Names of the sheets saved in the attached folder, sorted.
    pub fn saved_sheet_names(&self) -> Result<Vec<SheetName>, WorkspaceError> {
        let folder = self.folder.as_ref().ok_or(WorkspaceError::NoSheetFolder)?;
        Ok(folder.list_sheet_names()?)
    }

    pub fn save_layout(&self) -> Result<(), WorkspaceError> {
        let folder = self.folder.as_ref().ok_or(WorkspaceError::NoSheetFolder)?;
        folder.save_layout(&self.layout())?;
        Ok(())
    }

    /// Reopens the sheets recorded in the folder's desk layout.
    ///
    /// Entries whose file is missing come back as empty sheets of the recorded kind. Rects are
    /// clamped into the desk's coordinate range, and a name listed twice is placed once.
    pub fn restore_layout(&mut self) -> Result<LoadReport, WorkspaceError> {
        let folder = self.folder.clone().ok_or(WorkspaceError::NoSheetFolder)?;
        let Some(layout) = folder.load_layout()? else {
            return Ok(LoadReport::default());
        };

        let place = cascade_rect;
        let mut loader = LazyLoader::new(&folder, &place);
        let mut placed = Vec::new();
        for entry in &layout.sheets {
            let id = match loader.ensure_open(&mut self.registry, &entry.name) {
                Some(id) => id,
                None if !folder.exists(&entry.name) => {
                    let mut sheet = Sheet::new(self.registry.allocate_id(), entry.kind, entry.rect);
                    sheet.set_name(entry.name.clone());
                    self.registry.register(sheet)?
                }
                None => continue,
            };
            if placed.iter().any(|(placed_id, _, _)| *placed_id == id) {
                let name = entry.name.as_str();
                warn!("desk layout lists {name:?} more than once; keeping the first entry");
                continue;
            }
            placed.push((id, entry.rect.sanitized(), entry.minimized));
        }

        let mut report = loader.finish();
        for (id, rect, minimized) in &placed {
            if let Some(sheet) = self.registry.get_mut(*id) {
                sheet.set_rect(*rect);
                if *minimized {
                    sheet.set_window_state(WindowState::Minimized);
                }
            }
            if !report.opened.contains(id) {
                report.opened.push(*id);
            }
        }
        report.unresolved.retain(|unresolved| {
            !(unresolved.reason == UnresolvedReason::MissingRecord
                && layout.sheets.iter().any(|entry| entry.name == unresolved.name))
        });

        // Stacking follows the layout; sheets pulled in only as references go on top.
        let mut z_order: Vec<SheetId> = Vec::new();
        for (id, _, _) in &placed {
            if !z_order.contains(id) && !self.z_order.contains(id) {
                z_order.push(*id);
            }
        }
        for id in &report.opened {
            if !z_order.contains(id) && !self.z_order.contains(id) {
                z_order.push(*id);
            }
        }
        self.z_order.extend(z_order);

        info!("restored desk layout: {} sheets", placed.len());
        self.rebuild_snapshot();
        Ok(report)
    }

    /// Runs whatever periodic work is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Ticks {
        let ticks = self.scheduler.poll(now);
        if ticks.slow {
            self.reconcile_all();
        }
        if ticks.any() {
            self.rebuild_snapshot();
        }
        ticks
    }

    /// Drops every zone reference whose name no open sheet carries. Returns the number removed.
    pub fn reconcile_all(&mut self) -> usize {
        let live = self.registry.live_names();
        let mut removed = 0;
        for zone in self.registry.zone_ids() {
            let Some(references) = self.registry.get_mut(zone).and_then(Sheet::references_mut) else {
                continue;
            };
            let pruned = references.reconcile(&live);
            if pruned > 0 {
                info!("zone {zone}: reconciled away {pruned} stale references");
            }
            removed += pruned;
        }
        removed
    }

    pub fn rebuild_snapshot(&mut self) {
        self.snapshot = build_snapshot(&self.registry);
    }
}

impl CoordinateMapper for Workspace {
    fn anchor_of(&self, sheet: SheetId) -> Option<Point> {
        self.registry
            .get(sheet)
            .filter(|sheet| sheet.is_renderable())
            .map(|sheet| sheet.rect().center())
    }
}

#[cfg(test)]
mod tests;
