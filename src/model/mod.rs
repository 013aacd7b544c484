// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A desk holds typed sheets; Zone sheets reference other sheets by display name.

pub mod field;
pub mod geometry;
pub mod ids;
pub mod reference_set;
pub mod registry;
pub mod sheet;

pub use field::{SheetField, SheetRow};
pub use geometry::{cascade_rect, Point, Rect, DESK_COORD_LIMIT};
pub use ids::{NameError, SheetId, SheetName};
pub use reference_set::ReferenceSet;
pub use registry::{RegistryError, SheetRegistry};
pub use sheet::{
    CharacterSheet, ObstacleRow, Sheet, SheetBody, SheetKind, WindowState, APPROACHES,
};
