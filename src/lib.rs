// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fatesheet: a terminal desk for tabletop sheets with live zone-link overlays.
//!
//! Sheets live in a [`workspace::Workspace`]; Zone sheets reference other sheets by name, and the
//! [`graph`] snapshot of those links is drawn over the desk by [`overlay`].

pub mod config;
pub mod demo;
pub mod graph;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod scheduler;
pub mod store;
pub mod tui;
pub mod workspace;
