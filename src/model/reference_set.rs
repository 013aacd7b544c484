// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::ids::SheetName;

/// Ordered list of sheet names a Zone sheet points at.
///
/// Entries are not deduplicated against each other. Duplicate suppression happens through the
/// caller's "offered" list in [`ReferenceSet::add`]; renames and loads may still introduce
/// duplicates transiently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    names: Vec<SheetName>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names(names: impl IntoIterator<Item = SheetName>) -> Self {
        Self { names: names.into_iter().collect() }
    }

    /// Appends `name` if the caller currently offers it. Returns whether it was appended.
    pub fn add(&mut self, name: &str, offered: &[SheetName]) -> bool {
        if !offered.iter().any(|candidate| candidate == name) {
            return false;
        }
        self.names.push(SheetName::new(name));
        true
    }

    /// Appends without consulting an offered list (used when restoring from a record).
    pub fn push(&mut self, name: SheetName) {
        self.names.push(name);
    }

    /// Removes the first occurrence of `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|entry| entry == name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn names_in_order(&self) -> &[SheetName] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|entry| entry == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drops every entry whose name is not in `live`. Returns the number of removed entries.
    pub fn reconcile(&mut self, live: &BTreeSet<SheetName>) -> usize {
        let before = self.names.len();
        self.names.retain(|name| live.contains(name));
        before - self.names.len()
    }

    /// Rewrites every entry equal to `old` to `new`. Returns the number of rewritten entries.
    pub fn rename(&mut self, old: &str, new: &SheetName) -> usize {
        let mut renamed = 0;
        for entry in self.names.iter_mut().filter(|entry| *entry == old) {
            *entry = new.clone();
            renamed += 1;
        }
        renamed
    }
}
