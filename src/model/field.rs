// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Field-by-field access to sheet content for editing.
//!
//! Names and zone references are not fields: they have their own desk operations because they
//! affect the reference graph.

use super::sheet::{ObstacleRow, Sheet, SheetBody, APPROACHES};

/// One editable text value on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetField {
    FatePoints,
    Refresh,
    /// Index into [`APPROACHES`].
    Approach(usize),
    HighConcept,
    Trouble,
    Aspect(usize),
    Stunt(usize),
    ObstacleAgent(usize),
    ObstacleScore(usize),
    Notes,
    ImagePath,
}

/// A list that grows and shrinks a row at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetRow {
    Aspect,
    Stunt,
    Obstacle,
}

impl SheetField {
    pub fn label(self) -> String {
        match self {
            Self::FatePoints => "Fate Points".to_owned(),
            Self::Refresh => "Refresh".to_owned(),
            Self::Approach(idx) => APPROACHES.get(idx).copied().unwrap_or("Approach").to_owned(),
            Self::HighConcept => "High Concept".to_owned(),
            Self::Trouble => "Trouble".to_owned(),
            Self::Aspect(idx) => format!("Aspect {}", idx + 1),
            Self::Stunt(idx) => format!("Stunt {}", idx + 1),
            Self::ObstacleAgent(idx) => format!("Row {} agent", idx + 1),
            Self::ObstacleScore(idx) => format!("Row {} score", idx + 1),
            Self::Notes => "Notes".to_owned(),
            Self::ImagePath => "Image Path".to_owned(),
        }
    }

    /// The removable row this field sits in, if any.
    pub fn row(self) -> Option<(SheetRow, usize)> {
        match self {
            Self::Aspect(idx) => Some((SheetRow::Aspect, idx)),
            Self::Stunt(idx) => Some((SheetRow::Stunt, idx)),
            Self::ObstacleAgent(idx) | Self::ObstacleScore(idx) => Some((SheetRow::Obstacle, idx)),
            _ => None,
        }
    }
}

impl Sheet {
    /// Editable fields in display order. Notes and image path close every list.
    pub fn fields(&self) -> Vec<SheetField> {
        let mut fields = Vec::new();
        match self.body() {
            SheetBody::Character(character) => {
                fields.extend([SheetField::FatePoints, SheetField::Refresh]);
                fields.extend((0..APPROACHES.len()).map(SheetField::Approach));
                fields.extend([SheetField::HighConcept, SheetField::Trouble]);
                fields.extend((0..character.aspects.len()).map(SheetField::Aspect));
                fields.extend((0..character.stunts.len()).map(SheetField::Stunt));
            }
            SheetBody::Obstacle(rows) => {
                for idx in 0..rows.len() {
                    fields.extend([SheetField::ObstacleAgent(idx), SheetField::ObstacleScore(idx)]);
                }
            }
            SheetBody::Zone(_) | SheetBody::Default => {}
        }
        fields.extend([SheetField::Notes, SheetField::ImagePath]);
        fields
    }

    /// Current text of `field`; `None` when the sheet has no such field.
    pub fn field_value(&self, field: SheetField) -> Option<&str> {
        match (field, self.body()) {
            (SheetField::Notes, _) => Some(self.notes()),
            (SheetField::ImagePath, _) => Some(self.image_path()),
            (SheetField::FatePoints, SheetBody::Character(c)) => Some(c.fate_points.as_str()),
            (SheetField::Refresh, SheetBody::Character(c)) => Some(c.refresh.as_str()),
            (SheetField::Approach(idx), SheetBody::Character(c)) => c.approaches.get(idx).map(String::as_str),
            (SheetField::HighConcept, SheetBody::Character(c)) => Some(c.high_concept.as_str()),
            (SheetField::Trouble, SheetBody::Character(c)) => Some(c.trouble.as_str()),
            (SheetField::Aspect(idx), SheetBody::Character(c)) => c.aspects.get(idx).map(String::as_str),
            (SheetField::Stunt(idx), SheetBody::Character(c)) => c.stunts.get(idx).map(String::as_str),
            (SheetField::ObstacleAgent(idx), SheetBody::Obstacle(rows)) => {
                rows.get(idx).map(|row| row.agent.as_str())
            }
            (SheetField::ObstacleScore(idx), SheetBody::Obstacle(rows)) => {
                rows.get(idx).map(|row| row.score.as_str())
            }
            _ => None,
        }
    }

    /// Replaces the text of `field`. Returns `false` when the sheet has no such field.
    pub fn set_field(&mut self, field: SheetField, value: impl Into<String>) -> bool {
        let value = value.into();
        match field {
            SheetField::Notes => {
                self.set_notes(value);
                return true;
            }
            SheetField::ImagePath => {
                self.set_image_path(value);
                return true;
            }
            _ => {}
        }

        let slot = match (field, self.body_mut()) {
            (SheetField::FatePoints, SheetBody::Character(c)) => Some(&mut c.fate_points),
            (SheetField::Refresh, SheetBody::Character(c)) => Some(&mut c.refresh),
            (SheetField::Approach(idx), SheetBody::Character(c)) => c.approaches.get_mut(idx),
            (SheetField::HighConcept, SheetBody::Character(c)) => Some(&mut c.high_concept),
            (SheetField::Trouble, SheetBody::Character(c)) => Some(&mut c.trouble),
            (SheetField::Aspect(idx), SheetBody::Character(c)) => c.aspects.get_mut(idx),
            (SheetField::Stunt(idx), SheetBody::Character(c)) => c.stunts.get_mut(idx),
            (SheetField::ObstacleAgent(idx), SheetBody::Obstacle(rows)) => {
                rows.get_mut(idx).map(|row| &mut row.agent)
            }
            (SheetField::ObstacleScore(idx), SheetBody::Obstacle(rows)) => {
                rows.get_mut(idx).map(|row| &mut row.score)
            }
            _ => None,
        };
        match slot {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Appends an empty row and returns its first field.
    ///
    /// New obstacle rows start as `Obstacle:0`. `None` when the sheet kind has no such list.
    pub fn add_row(&mut self, row: SheetRow) -> Option<SheetField> {
        match (row, self.body_mut()) {
            (SheetRow::Aspect, SheetBody::Character(c)) => {
                c.aspects.push(String::new());
                Some(SheetField::Aspect(c.aspects.len() - 1))
            }
            (SheetRow::Stunt, SheetBody::Character(c)) => {
                c.stunts.push(String::new());
                Some(SheetField::Stunt(c.stunts.len() - 1))
            }
            (SheetRow::Obstacle, SheetBody::Obstacle(rows)) => {
                rows.push(ObstacleRow::new("Obstacle", "0"));
                Some(SheetField::ObstacleAgent(rows.len() - 1))
            }
            _ => None,
        }
    }

    pub fn remove_row(&mut self, row: SheetRow, index: usize) -> bool {
        fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
            if index < items.len() {
                items.remove(index);
                true
            } else {
                false
            }
        }

        match (row, self.body_mut()) {
            (SheetRow::Aspect, SheetBody::Character(c)) => remove_at(&mut c.aspects, index),
            (SheetRow::Stunt, SheetBody::Character(c)) => remove_at(&mut c.stunts, index),
            (SheetRow::Obstacle, SheetBody::Obstacle(rows)) => remove_at(rows, index),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{SheetField, SheetRow};
    use crate::model::{Rect, Sheet, SheetId, SheetKind};

    fn sheet(kind: SheetKind) -> Sheet {
        Sheet::new(SheetId::from_raw(1), kind, Rect::new(0, 0, 20, 6))
    }

    #[rstest]
    #[case(SheetKind::Character, 12)]
    #[case(SheetKind::Obstacle, 6)]
    #[case(SheetKind::Zone, 2)]
    #[case(SheetKind::Default, 2)]
    fn field_lists_follow_the_kind(#[case] kind: SheetKind, #[case] count: usize) {
        let fields = sheet(kind).fields();
        assert_eq!(fields.len(), count);
        assert_eq!(fields.last(), Some(&SheetField::ImagePath));
    }

    #[test]
    fn set_field_writes_through_and_rejects_foreign_fields() {
        let mut bob = sheet(SheetKind::Character);
        assert!(bob.set_field(SheetField::Approach(3), "4"));
        assert!(bob.set_field(SheetField::HighConcept, "Retired Siege Engineer"));
        assert_eq!(bob.field_value(SheetField::Approach(3)), Some("4"));
        assert_eq!(bob.field_value(SheetField::HighConcept), Some("Retired Siege Engineer"));

        assert!(!bob.set_field(SheetField::ObstacleScore(0), "2"));
        assert!(!bob.set_field(SheetField::Aspect(0), "nope"));
        assert_eq!(bob.field_value(SheetField::Approach(9)), None);

        let mut camp = sheet(SheetKind::Zone);
        assert!(camp.set_field(SheetField::Notes, "smoky\nand cold"));
        assert_eq!(camp.notes(), "smoky\nand cold");
        assert!(!camp.set_field(SheetField::FatePoints, "1"));
    }

    #[test]
    fn rows_are_added_and_removed_per_kind() {
        let mut bob = sheet(SheetKind::Character);
        assert_eq!(bob.add_row(SheetRow::Aspect), Some(SheetField::Aspect(0)));
        assert_eq!(bob.add_row(SheetRow::Stunt), Some(SheetField::Stunt(0)));
        assert_eq!(bob.add_row(SheetRow::Obstacle), None);
        assert!(bob.fields().contains(&SheetField::Stunt(0)));

        let mut gate = sheet(SheetKind::Obstacle);
        assert_eq!(gate.add_row(SheetRow::Obstacle), Some(SheetField::ObstacleAgent(2)));
        assert_eq!(gate.field_value(SheetField::ObstacleAgent(2)), Some("Obstacle"));
        assert!(gate.remove_row(SheetRow::Obstacle, 0));
        assert!(!gate.remove_row(SheetRow::Obstacle, 5));
        assert_eq!(gate.fields().len(), 6);
    }

    #[test]
    fn row_fields_know_their_row() {
        assert_eq!(SheetField::ObstacleScore(1).row(), Some((SheetRow::Obstacle, 1)));
        assert_eq!(SheetField::Stunt(0).row(), Some((SheetRow::Stunt, 0)));
        assert_eq!(SheetField::Notes.row(), None);
        assert_eq!(SheetField::Approach(1).label(), "Clever");
    }
}
