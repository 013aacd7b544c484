// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The zone reference graph: snapshot building and on-demand loading of referenced sheets.

pub mod loader;
pub mod snapshot;

pub use loader::{LazyLoader, LoadReport, Unresolved, UnresolvedReason};
pub use snapshot::{build_snapshot, DanglingReference, GraphSnapshot, ResolvedTarget, ZoneLinks};
