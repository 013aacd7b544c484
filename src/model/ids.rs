// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// Opaque identity of one open sheet instance.
///
/// Ids are handed out by the registry when a sheet is created or loaded and are never
/// persisted; cross-sheet links always go through [`SheetName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(u64);

impl SheetId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User-editable display name of a sheet.
///
/// Names are the only cross-reference key between sheets. They may be blank while the user is
/// still typing; blank names never resolve and are never offered as reference targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetName(SmolStr);

impl SheetName {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Checks that the name can be used as the stem of a sheet file.
    pub fn validate_file_stem(&self) -> Result<(), NameError> {
        validate_file_stem(self.as_str())
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SheetName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for SheetName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for SheetName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SheetName {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

impl PartialEq<str> for SheetName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SheetName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    Blank,
    ContainsSeparator,
    Reserved,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("name must not be blank"),
            Self::ContainsSeparator => f.write_str("name must not contain '/' or '\\'"),
            Self::Reserved => f.write_str("name must not be '.' or '..'"),
        }
    }
}

impl std::error::Error for NameError {}

fn validate_file_stem(value: &str) -> Result<(), NameError> {
    if value.trim().is_empty() {
        return Err(NameError::Blank);
    }
    if value.contains(['/', '\\']) {
        return Err(NameError::ContainsSeparator);
    }
    if value == "." || value == ".." {
        return Err(NameError::Reserved);
    }
    Ok(())
}
