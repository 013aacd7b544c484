// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::record::{parse_kind, SheetRecord};
use super::{SheetSource, StoreError};
use crate::model::{SheetKind, SheetName};

/// In-memory sheet files keyed by name. Backs the demo desk and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySheetSource {
    files: BTreeMap<SheetName, String>,
}

impl MemorySheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<SheetName>, text: impl Into<String>) {
        self.files.insert(name.into(), text.into());
    }

    pub fn with(mut self, name: impl Into<SheetName>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &SheetName> {
        self.files.keys()
    }

    fn text(&self, name: &SheetName) -> Result<&str, StoreError> {
        self.files.get(name).map(String::as_str).ok_or_else(|| StoreError::Io {
            path: virtual_path(name),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}

impl SheetSource for MemorySheetSource {
    fn exists(&self, name: &SheetName) -> bool {
        self.files.contains_key(name)
    }

    fn read_kind(&self, name: &SheetName) -> Result<SheetKind, StoreError> {
        Ok(parse_kind(self.text(name)?))
    }

    fn read_record(&self, name: &SheetName) -> Result<SheetRecord, StoreError> {
        SheetRecord::parse(self.text(name)?)
            .map_err(|source| StoreError::MalformedRecord { path: virtual_path(name), source })
    }
}

fn virtual_path(name: &SheetName) -> PathBuf {
    PathBuf::from(format!("memory:{name}.txt"))
}
