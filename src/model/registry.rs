// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use super::ids::{SheetId, SheetName};
use super::sheet::Sheet;

/// The set of currently open sheets, in registration order.
///
/// Display names may collide. Name lookups resolve to the earliest-registered match, so a sheet
/// that shares a name with an older one is shadowed until the older one closes or is renamed.
#[derive(Debug, Clone, Default)]
pub struct SheetRegistry {
    sheets: Vec<Sheet>,
    next_id: u64,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh identity for a sheet that is about to be registered.
    pub fn allocate_id(&mut self) -> SheetId {
        self.next_id = self.next_id.saturating_add(1);
        SheetId::from_raw(self.next_id)
    }

    pub fn register(&mut self, sheet: Sheet) -> Result<SheetId, RegistryError> {
        let id = sheet.id();
        if self.contains(id) {
            return Err(RegistryError::DuplicateIdentity { id });
        }
        // Keep externally built ids from colliding with later allocations.
        self.next_id = self.next_id.max(id.get());
        self.sheets.push(sheet);
        Ok(id)
    }

    pub fn unregister(&mut self, id: SheetId) -> Option<Sheet> {
        let index = self.sheets.iter().position(|sheet| sheet.id() == id)?;
        Some(self.sheets.remove(index))
    }

    pub fn contains(&self, id: SheetId) -> bool {
        self.sheets.iter().any(|sheet| sheet.id() == id)
    }

    pub fn get(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.id() == id)
    }

    pub fn get_mut(&mut self, id: SheetId) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.id() == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Sheet> {
        if name.trim().is_empty() {
            return None;
        }
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    pub fn ids(&self) -> Vec<SheetId> {
        self.sheets.iter().map(Sheet::id).collect()
    }

    pub fn all_renderable(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter().filter(|sheet| sheet.is_renderable())
    }

    pub fn zone_ids(&self) -> Vec<SheetId> {
        self.sheets
            .iter()
            .filter(|sheet| sheet.kind().is_zone())
            .map(Sheet::id)
            .collect()
    }

    /// Non-blank names of every registered sheet, regardless of window state.
    pub fn live_names(&self) -> BTreeSet<SheetName> {
        self.sheets
            .iter()
            .map(|sheet| sheet.name())
            .filter(|name| !name.is_blank())
            .cloned()
            .collect()
    }

    /// Whether no sheet other than `except` carries `name`.
    pub fn name_is_unique(&self, name: &str, except: Option<SheetId>) -> bool {
        !self
            .sheets
            .iter()
            .any(|sheet| Some(sheet.id()) != except && sheet.name() == name)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateIdentity { id: SheetId },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateIdentity { id } => write!(f, "sheet {id} is already registered"),
        }
    }
}

impl std::error::Error for RegistryError {}
