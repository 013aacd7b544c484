// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::geometry::Rect;
use super::ids::{SheetId, SheetName};
use super::reference_set::ReferenceSet;

/// The type of sheet. Fixed for the lifetime of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SheetKind {
    Character,
    Obstacle,
    Zone,
    Default,
}

impl SheetKind {
    pub const ALL: [SheetKind; 4] = [Self::Character, Self::Obstacle, Self::Zone, Self::Default];

    /// Resolves a persisted `WindowType` tag. Unknown or missing tags fall back to `Default`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("CharacterWindow") => Self::Character,
            Some("ObstacleWindow") => Self::Obstacle,
            Some("ZoneWindow") => Self::Zone,
            _ => Self::Default,
        }
    }

    /// The persisted `WindowType` tag. Default sheets are written without one.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::Character => Some("CharacterWindow"),
            Self::Obstacle => Some("ObstacleWindow"),
            Self::Zone => Some("ZoneWindow"),
            Self::Default => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Character => "Character",
            Self::Obstacle => "Obstacle",
            Self::Zone => "Zone",
            Self::Default => "Default",
        }
    }

    pub fn is_zone(self) -> bool {
        self == Self::Zone
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Hidden,
    Closing,
}

impl WindowState {
    pub fn is_renderable(self) -> bool {
        self == Self::Normal
    }
}

pub const APPROACHES: [&str; 6] = ["Careful", "Clever", "Flashy", "Forceful", "Quick", "Sneaky"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSheet {
    pub fate_points: String,
    pub refresh: String,
    /// Scores in [`APPROACHES`] order.
    pub approaches: [String; 6],
    pub high_concept: String,
    pub trouble: String,
    pub aspects: Vec<String>,
    pub stunts: Vec<String>,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            fate_points: "3".to_owned(),
            refresh: "3".to_owned(),
            approaches: std::array::from_fn(|_| "0".to_owned()),
            high_concept: String::new(),
            trouble: String::new(),
            aspects: Vec::new(),
            stunts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleRow {
    pub agent: String,
    pub score: String,
}

impl ObstacleRow {
    pub fn new(agent: impl Into<String>, score: impl Into<String>) -> Self {
        Self { agent: agent.into(), score: score.into() }
    }
}

/// Kind-specific content of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetBody {
    Character(CharacterSheet),
    Obstacle(Vec<ObstacleRow>),
    Zone(ReferenceSet),
    Default,
}

impl SheetBody {
    /// Content of a freshly created sheet of `kind`.
    pub fn new_for(kind: SheetKind) -> Self {
        match kind {
            SheetKind::Character => Self::Character(CharacterSheet::default()),
            SheetKind::Obstacle => Self::Obstacle(vec![
                ObstacleRow::new("Obstacle", "0"),
                ObstacleRow::new("", "0"),
            ]),
            SheetKind::Zone => Self::Zone(ReferenceSet::new()),
            SheetKind::Default => Self::Default,
        }
    }

    /// Empty content used before a persisted record populates it.
    pub fn empty_for(kind: SheetKind) -> Self {
        match kind {
            SheetKind::Obstacle => Self::Obstacle(Vec::new()),
            other => Self::new_for(other),
        }
    }

    pub fn kind(&self) -> SheetKind {
        match self {
            Self::Character(_) => SheetKind::Character,
            Self::Obstacle(_) => SheetKind::Obstacle,
            Self::Zone(_) => SheetKind::Zone,
            Self::Default => SheetKind::Default,
        }
    }
}

/// One open sheet window on the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    id: SheetId,
    name: SheetName,
    rect: Rect,
    window_state: WindowState,
    notes: String,
    image_path: String,
    body: SheetBody,
}

impl Sheet {
    pub fn new(id: SheetId, kind: SheetKind, rect: Rect) -> Self {
        Self::with_body(id, SheetBody::new_for(kind), rect)
    }

    pub fn with_body(id: SheetId, body: SheetBody, rect: Rect) -> Self {
        Self {
            id,
            name: SheetName::default(),
            rect,
            window_state: WindowState::Normal,
            notes: String::new(),
            image_path: String::new(),
            body,
        }
    }

    pub fn id(&self) -> SheetId {
        self.id
    }

    pub fn kind(&self) -> SheetKind {
        self.body.kind()
    }

    pub fn name(&self) -> &SheetName {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<SheetName>) {
        self.name = name.into();
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn window_state(&self) -> WindowState {
        self.window_state
    }

    pub fn set_window_state(&mut self, window_state: WindowState) {
        self.window_state = window_state;
    }

    pub fn is_renderable(&self) -> bool {
        self.window_state.is_renderable()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn set_image_path(&mut self, image_path: impl Into<String>) {
        self.image_path = image_path.into();
    }

    pub fn body(&self) -> &SheetBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut SheetBody {
        &mut self.body
    }

    pub fn references(&self) -> Option<&ReferenceSet> {
        match &self.body {
            SheetBody::Zone(references) => Some(references),
            _ => None,
        }
    }

    pub fn references_mut(&mut self) -> Option<&mut ReferenceSet> {
        match &mut self.body {
            SheetBody::Zone(references) => Some(references),
            _ => None,
        }
    }
}
