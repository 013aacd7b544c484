// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for sheets on disk.
//!
//! Each sheet is one flat text file named after the sheet; the desk layout is a JSON sidecar in
//! the same folder.

pub mod memory;
pub mod record;
pub mod sheet_folder;
#[cfg(test)]
pub(crate) mod temp_dir;

pub use memory::MemorySheetSource;
pub use record::{escape_notes, load_content, parse_kind, unescape_notes, RecordError, SheetRecord};
pub use sheet_folder::{DeskLayout, DeskLayoutEntry, SheetFolder, StoreError, WriteDurability};

use crate::model::{SheetKind, SheetName};

/// Persisted sheet records keyed by display name.
pub trait SheetSource {
    fn exists(&self, name: &SheetName) -> bool;

    /// Reads only the declared kind. Unknown or missing tags resolve to [`SheetKind::Default`].
    fn read_kind(&self, name: &SheetName) -> Result<SheetKind, StoreError>;

    fn read_record(&self, name: &SheetName) -> Result<SheetRecord, StoreError>;
}
