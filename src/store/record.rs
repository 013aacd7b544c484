// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flat text sheet records.
//!
//! One file per sheet:
//!
//! ```text
//! WindowType: ZoneWindow      (absent for Default sheets)
//! Name: Camp
//! <kind-specific lines>
//! Notes: ...
//! ImagePath: ...
//! ```

use std::fmt;

use crate::model::{
    CharacterSheet, ObstacleRow, ReferenceSet, Sheet, SheetBody, SheetKind, SheetName, APPROACHES,
};

const WINDOW_TYPE_KEY: &str = "WindowType";
const NAME_KEY: &str = "Name";
const NOTES_KEY: &str = "Notes";
const IMAGE_PATH_KEY: &str = "ImagePath";

/// A parsed sheet file: header fields plus the raw kind-specific lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    pub kind: SheetKind,
    pub name: SheetName,
    pub body_lines: Vec<String>,
    pub notes: String,
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Empty,
    MissingName { line: usize },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("record is empty"),
            Self::MissingName { line } => write!(f, "expected `Name:` on line {line}"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Reads only the declared kind from the first line of a record.
pub fn parse_kind(text: &str) -> SheetKind {
    let first = text.lines().next().unwrap_or_default();
    match split_field(first) {
        Some((WINDOW_TYPE_KEY, tag)) => SheetKind::from_tag(Some(tag)),
        _ => SheetKind::Default,
    }
}

impl SheetRecord {
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let mut lines: Vec<&str> =
            text.lines().map(|line| line.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(RecordError::Empty);
        }

        let mut cursor = 0;
        let kind = match split_field(lines[0]) {
            Some((WINDOW_TYPE_KEY, tag)) => {
                cursor = 1;
                SheetKind::from_tag(Some(tag))
            }
            _ => SheetKind::Default,
        };

        let name = match lines.get(cursor).and_then(|line| split_field(line)) {
            Some((NAME_KEY, value)) => SheetName::new(value.trim()),
            _ => return Err(RecordError::MissingName { line: cursor + 1 }),
        };
        cursor += 1;

        let mut end = lines.len();
        let mut image_path = String::new();
        let mut notes = String::new();
        if end > cursor {
            if let Some((IMAGE_PATH_KEY, value)) = split_field(lines[end - 1]) {
                image_path = value.trim().to_owned();
                end -= 1;
            }
        }
        if end > cursor {
            if let Some((NOTES_KEY, value)) = split_field(lines[end - 1]) {
                notes = unescape_notes(value.trim());
                end -= 1;
            }
        }

        let body_lines = lines[cursor..end].iter().map(|line| (*line).to_owned()).collect();
        Ok(Self { kind, name, body_lines, notes, image_path })
    }

    pub fn from_sheet(sheet: &Sheet) -> Self {
        Self {
            kind: sheet.kind(),
            name: sheet.name().clone(),
            body_lines: body_lines_of(sheet.body()),
            notes: sheet.notes().to_owned(),
            image_path: sheet.image_path().to_owned(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(tag) = self.kind.tag() {
            push_field(&mut out, WINDOW_TYPE_KEY, tag);
        }
        push_field(&mut out, NAME_KEY, self.name.as_str());
        for line in &self.body_lines {
            out.push_str(line);
            out.push('\n');
        }
        push_field(&mut out, NOTES_KEY, &escape_notes(&self.notes));
        push_field(&mut out, IMAGE_PATH_KEY, &self.image_path);
        out
    }

    /// Zone references declared by this record, in file order.
    pub fn reference_names(&self) -> Vec<SheetName> {
        if !self.kind.is_zone() {
            return Vec::new();
        }
        zone_names(&self.body_lines)
    }
}

/// Populates `sheet` from `record`, interpreting the body lines for the sheet's own kind.
///
/// Lines that do not fit the kind's layout are skipped.
pub fn load_content(record: &SheetRecord, sheet: &mut Sheet) {
    sheet.set_name(record.name.clone());
    sheet.set_notes(record.notes.clone());
    sheet.set_image_path(record.image_path.clone());

    let body = match sheet.kind() {
        SheetKind::Character => SheetBody::Character(parse_character(&record.body_lines)),
        SheetKind::Obstacle => SheetBody::Obstacle(parse_obstacle_rows(&record.body_lines)),
        SheetKind::Zone => SheetBody::Zone(ReferenceSet::from_names(zone_names(&record.body_lines))),
        SheetKind::Default => SheetBody::Default,
    };
    *sheet.body_mut() = body;
}

fn body_lines_of(body: &SheetBody) -> Vec<String> {
    match body {
        SheetBody::Character(character) => {
            let mut lines = vec![
                format!("Fate Points: {}", character.fate_points),
                format!("Refresh: {}", character.refresh),
            ];
            for (label, score) in APPROACHES.iter().zip(&character.approaches) {
                lines.push(format!("{label}: {score}"));
            }
            lines.push(format!("High Concept: {}", character.high_concept));
            lines.push(format!("Trouble: {}", character.trouble));
            lines.extend(character.aspects.iter().map(|aspect| format!("Aspect: {aspect}")));
            lines.extend(character.stunts.iter().map(|stunt| format!("Stunt: {stunt}")));
            lines
        }
        SheetBody::Obstacle(rows) => {
            rows.iter().map(|row| format!("{}:{}", row.agent, row.score)).collect()
        }
        SheetBody::Zone(references) => {
            references.names_in_order().iter().map(ToString::to_string).collect()
        }
        SheetBody::Default => Vec::new(),
    }
}

fn parse_character(lines: &[String]) -> CharacterSheet {
    let mut character = CharacterSheet::default();
    for line in lines {
        let Some((key, value)) = split_field(line) else {
            continue;
        };
        let value = value.trim().to_owned();
        match key {
            "Fate Points" => character.fate_points = value,
            "Refresh" => character.refresh = value,
            "High Concept" => character.high_concept = value,
            "Trouble" => character.trouble = value,
            "Aspect" => character.aspects.push(value),
            "Stunt" => character.stunts.push(value),
            other => {
                if let Some(index) = APPROACHES.iter().position(|label| *label == other) {
                    character.approaches[index] = value;
                }
            }
        }
    }
    character
}

fn parse_obstacle_rows(lines: &[String]) -> Vec<ObstacleRow> {
    lines
        .iter()
        .filter_map(|line| line.rsplit_once(':'))
        .map(|(agent, score)| ObstacleRow::new(agent.trim(), score.trim()))
        .collect()
}

fn zone_names(lines: &[String]) -> Vec<SheetName> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(SheetName::new)
        .collect()
}

fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.strip_prefix(' ').unwrap_or(value)))
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

/// Folds notes onto one line: newlines become `\n`, backslashes double.
pub fn escape_notes(notes: &str) -> String {
    let mut out = String::with_capacity(notes.len());
    for ch in notes.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

pub fn unescape_notes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{load_content, parse_kind, RecordError, SheetRecord};
    use crate::model::{Rect, Sheet, SheetBody, SheetId, SheetKind, SheetName};

    const ZONE: &str = "WindowType: ZoneWindow\nName: Camp\nBob\nWall\nNotes: smoky\nImagePath: \n";
    const DEFAULT: &str = "Name: Map\nNotes: north is up\nImagePath: pictures/map.png\n";
    const CHARACTER: &str = "WindowType: CharacterWindow
Name: Bob
Fate Points: 2
Refresh: 3
Careful: 1
Clever: 2
Flashy: 0
Forceful: 3
Quick: 1
Sneaky: 2
High Concept: Retired wizard: reluctant
Trouble: Owes the guild
Aspect: Knows every tavern
Stunt: Because I am clever, +2 to lore
Notes: line one\\nline two
ImagePath: pictures/bob.png
";

    #[test]
    fn parses_zone_references_in_order() {
        let record = SheetRecord::parse(ZONE).expect("parse");
        assert_eq!(record.kind, SheetKind::Zone);
        assert_eq!(record.name, "Camp");
        assert_eq!(record.reference_names(), vec![SheetName::new("Bob"), SheetName::new("Wall")]);
        assert_eq!(record.notes, "smoky");
    }

    #[test]
    fn default_records_have_no_window_type_line() {
        assert_eq!(parse_kind(DEFAULT), SheetKind::Default);
        let record = SheetRecord::parse(DEFAULT).expect("parse");
        assert_eq!(record.kind, SheetKind::Default);
        assert_eq!(record.name, "Map");
        assert!(record.body_lines.is_empty());
        assert_eq!(record.image_path, "pictures/map.png");
        assert!(!record.to_text().contains("WindowType"));
    }

    #[test]
    fn unknown_window_type_falls_back_to_default() {
        let text = "WindowType: SpaceshipWindow\nName: Falcon\nNotes: \nImagePath: \n";
        assert_eq!(parse_kind(text), SheetKind::Default);
        let record = SheetRecord::parse(text).expect("parse");
        assert_eq!(record.kind, SheetKind::Default);
        assert_eq!(record.name, "Falcon");
    }

    #[test]
    fn rejects_records_without_name() {
        assert_eq!(SheetRecord::parse("\n\n"), Err(RecordError::Empty));
        assert_eq!(
            SheetRecord::parse("WindowType: ZoneWindow\nBob\n"),
            Err(RecordError::MissingName { line: 2 })
        );
    }

    #[test]
    fn loads_character_content_by_field_name() {
        let record = SheetRecord::parse(CHARACTER).expect("parse");
        let mut sheet = Sheet::new(SheetId::from_raw(1), SheetKind::Character, Rect::new(0, 0, 20, 6));
        load_content(&record, &mut sheet);

        let SheetBody::Character(character) = sheet.body() else {
            panic!("expected character body");
        };
        assert_eq!(sheet.name(), "Bob");
        assert_eq!(character.fate_points, "2");
        assert_eq!(character.approaches[3], "3");
        assert_eq!(character.high_concept, "Retired wizard: reluctant");
        assert_eq!(character.aspects, vec!["Knows every tavern".to_owned()]);
        assert_eq!(character.stunts.len(), 1);
        assert_eq!(sheet.notes(), "line one\nline two");
    }

    #[test]
    fn sheet_text_survives_a_save_and_load() {
        let record = SheetRecord::parse(CHARACTER).expect("parse");
        let mut sheet = Sheet::new(SheetId::from_raw(1), SheetKind::Character, Rect::new(0, 0, 20, 6));
        load_content(&record, &mut sheet);

        assert_eq!(SheetRecord::from_sheet(&sheet).to_text(), CHARACTER);
    }

    #[test]
    fn obstacle_rows_split_on_last_colon() {
        let text = "WindowType: ObstacleWindow\nName: Gate\nLocked: gate:4\n:0\nNotes: \nImagePath: \n";
        let record = SheetRecord::parse(text).expect("parse");
        let mut sheet = Sheet::new(SheetId::from_raw(1), SheetKind::Obstacle, Rect::new(0, 0, 20, 6));
        load_content(&record, &mut sheet);

        let SheetBody::Obstacle(rows) = sheet.body() else {
            panic!("expected obstacle body");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].agent, "Locked: gate");
        assert_eq!(rows[0].score, "4");
        assert_eq!(rows[1].agent, "");
    }
}
