// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info, warn};

use crate::model::{Rect, Sheet, SheetBody, SheetId, SheetKind, SheetName, SheetRegistry};
use crate::store::{load_content, SheetRecord, SheetSource};

/// Why a referenced name was left unresolved during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The name was already being loaded further up the same load operation.
    Cycle,
    /// No persisted record exists for the name.
    MissingRecord,
    /// A record exists but could not be read or parsed.
    Unreadable(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle => f.write_str("reference cycle"),
            Self::MissingRecord => f.write_str("no saved sheet"),
            Self::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub name: SheetName,
    pub reason: UnresolvedReason,
}

/// Outcome of one top-level load operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub opened: Vec<SheetId>,
    pub unresolved: Vec<Unresolved>,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.opened.extend(other.opened);
        self.unresolved.extend(other.unresolved);
    }
}

/// Opens referenced sheets on demand, following Zone references transitively.
///
/// One loader instance spans one top-level load operation. The set of names currently being
/// loaded guards against reference cycles; recursion depth is never used as the guard.
pub struct LazyLoader<'a, S: SheetSource + ?Sized> {
    source: &'a S,
    place: &'a dyn Fn(usize) -> Rect,
    loading: BTreeSet<SheetName>,
    report: LoadReport,
}

impl<'a, S: SheetSource + ?Sized> LazyLoader<'a, S> {
    /// `place` picks the rect of a newly opened sheet from the current sheet count.
    pub fn new(source: &'a S, place: &'a dyn Fn(usize) -> Rect) -> Self {
        Self { source, place, loading: BTreeSet::new(), report: LoadReport::default() }
    }

    /// Returns the open sheet called `name`, loading it (and what it references) if needed.
    ///
    /// `None` means the name stays unresolved; the reason is recorded in the report.
    pub fn ensure_open(&mut self, registry: &mut SheetRegistry, name: &SheetName) -> Option<SheetId> {
        if let Some(open) = registry.find_by_name(name.as_str()) {
            return Some(open.id());
        }
        if name.is_blank() {
            return None;
        }
        if self.loading.contains(name) {
            debug!("lazy load: {name:?} is already loading; leaving reference unresolved");
            self.unresolved(name, UnresolvedReason::Cycle);
            return None;
        }
        if !self.source.exists(name) {
            debug!("lazy load: no saved sheet for {name:?}");
            self.unresolved(name, UnresolvedReason::MissingRecord);
            return None;
        }

        let kind = match self.source.read_kind(name) {
            Ok(kind) => kind,
            Err(err) => {
                warn!("lazy load: cannot read kind of {name:?}: {err}");
                self.unresolved(name, UnresolvedReason::Unreadable(err.to_string()));
                return None;
            }
        };
        let record = match self.source.read_record(name) {
            Ok(record) => record,
            Err(err) => {
                warn!("lazy load: cannot read {name:?}: {err}");
                self.unresolved(name, UnresolvedReason::Unreadable(err.to_string()));
                return None;
            }
        };
        if record.name != *name {
            warn!(
                "lazy load: file for {name:?} declares name {:?}; the reference will not resolve",
                record.name.as_str()
            );
        }

        self.loading.insert(name.clone());
        let id = self.open(registry, kind, &record);
        self.loading.remove(name);
        id
    }

    /// Opens `record` as a new sheet even if a sheet with the same name is already open.
    ///
    /// Used for explicit user loads; Zone references still go through [`Self::ensure_open`].
    pub fn open_record(&mut self, registry: &mut SheetRegistry, record: &SheetRecord) -> Option<SheetId> {
        let guard = (!record.name.is_blank()).then(|| record.name.clone());
        if let Some(name) = &guard {
            self.loading.insert(name.clone());
        }
        let id = self.open(registry, record.kind, record);
        if let Some(name) = &guard {
            self.loading.remove(name);
        }
        id
    }

    pub fn finish(self) -> LoadReport {
        self.report
    }

    fn open(&mut self, registry: &mut SheetRegistry, kind: SheetKind, record: &SheetRecord) -> Option<SheetId> {
        let rect = (self.place)(registry.len());
        let mut sheet = Sheet::with_body(registry.allocate_id(), SheetBody::empty_for(kind), rect);
        load_content(record, &mut sheet);

        let references = sheet
            .references()
            .map(|references| references.names_in_order().to_vec())
            .unwrap_or_default();

        let id = match registry.register(sheet) {
            Ok(id) => id,
            Err(err) => {
                warn!("lazy load: {err}");
                return None;
            }
        };
        info!("opened {kind} sheet {:?} as {id}", record.name.as_str());
        self.report.opened.push(id);

        for reference in &references {
            self.ensure_open(registry, reference);
        }

        Some(id)
    }

    fn unresolved(&mut self, name: &SheetName, reason: UnresolvedReason) {
        self.report.unresolved.push(Unresolved { name: name.clone(), reason });
    }
}
