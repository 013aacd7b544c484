// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::record::{parse_kind, RecordError, SheetRecord};
use super::SheetSource;
use crate::model::{NameError, Rect, Sheet, SheetKind, SheetName};

const DESK_META_FILENAME: &str = "fatesheet-desk.meta.json";
const SHEET_EXTENSION: &str = "txt";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidName {
        name: SheetName,
        source: NameError,
    },
    MalformedRecord {
        path: PathBuf,
        source: RecordError,
    },
    /// Another open sheet with the same name owns the file.
    DuplicateName {
        name: SheetName,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidName { name, source } => {
                write!(f, "cannot use sheet name {:?} as a file name: {source}", name.as_str())
            }
            Self::MalformedRecord { path, source } => {
                write!(f, "malformed sheet record at {path:?}: {source}")
            }
            Self::DuplicateName { name } => {
                write!(f, "an earlier open sheet already saves as {:?}", name.as_str())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidName { source, .. } => Some(source),
            Self::MalformedRecord { source, .. } => Some(source),
            Self::DuplicateName { .. } => None,
        }
    }
}

/// Window arrangement remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskLayout {
    pub sheets: Vec<DeskLayoutEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskLayoutEntry {
    pub name: SheetName,
    pub kind: SheetKind,
    pub rect: Rect,
    pub minimized: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place without fsync.
    #[default]
    BestEffort,

    /// Additionally flushes file contents and the directory entry where the platform allows.
    Durable,
}

/// A directory of flat text sheet files (`<name>.txt`) plus the desk layout file.
#[derive(Debug, Clone)]
pub struct SheetFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl SheetFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta_path(&self) -> PathBuf {
        self.root.join(DESK_META_FILENAME)
    }

    pub fn sheet_path(&self, name: &SheetName) -> Result<PathBuf, StoreError> {
        name.validate_file_stem()
            .map_err(|source| StoreError::InvalidName { name: name.clone(), source })?;
        Ok(self.root.join(format!("{}.{SHEET_EXTENSION}", name.as_str())))
    }

    /// Writes `sheet` to `<root>/<name>.txt`, replacing any previous file atomically.
    pub fn save_sheet(&self, sheet: &Sheet) -> Result<PathBuf, StoreError> {
        let path = self.sheet_path(sheet.name())?;
        let text = SheetRecord::from_sheet(sheet).to_text();
        write_atomic(&self.root, &path, text.as_bytes(), self.durability)?;
        Ok(path)
    }

    /// Names of every sheet file in the folder, sorted.
    pub fn list_sheet_names(&self) -> Result<Vec<SheetName>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: self.root.clone(), source }),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io { path: self.root.clone(), source })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SHEET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if !stem.starts_with('.') {
                    names.push(SheetName::new(stem));
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn load_layout(&self) -> Result<Option<DeskLayout>, StoreError> {
        let meta_path = self.meta_path();
        let meta_str = match fs::read_to_string(&meta_path) {
            Ok(meta_str) => meta_str,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path: meta_path, source }),
        };

        let layout_json: DeskLayoutJson = serde_json::from_str(&meta_str)
            .map_err(|source| StoreError::Json { path: meta_path.clone(), source })?;
        Ok(Some(layout_from_json(layout_json)))
    }

    pub fn save_layout(&self, layout: &DeskLayout) -> Result<(), StoreError> {
        let meta_path = self.meta_path();
        let meta_str = serde_json::to_string_pretty(&layout_to_json(layout))
            .map_err(|source| StoreError::Json { path: meta_path.clone(), source })?;
        write_atomic(&self.root, &meta_path, format!("{meta_str}\n").as_bytes(), self.durability)
    }

    fn read_text(&self, name: &SheetName) -> Result<(PathBuf, String), StoreError> {
        let path = self.sheet_path(name)?;
        let text = fs::read_to_string(&path)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        Ok((path, text))
    }
}

impl SheetSource for SheetFolder {
    fn exists(&self, name: &SheetName) -> bool {
        self.sheet_path(name).is_ok_and(|path| path.is_file())
    }

    fn read_kind(&self, name: &SheetName) -> Result<SheetKind, StoreError> {
        let (_, text) = self.read_text(name)?;
        Ok(parse_kind(&text))
    }

    fn read_record(&self, name: &SheetName) -> Result<SheetRecord, StoreError> {
        let (path, text) = self.read_text(name)?;
        SheetRecord::parse(&text).map_err(|source| StoreError::MalformedRecord { path, source })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeskLayoutJson {
    #[serde(default)]
    sheets: Vec<DeskLayoutEntryJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeskLayoutEntryJson {
    name: String,
    kind: SheetKindJson,
    rect: Rect,
    #[serde(default)]
    minimized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SheetKindJson {
    Character,
    Obstacle,
    Zone,
    #[serde(other)]
    Default,
}

impl From<SheetKind> for SheetKindJson {
    fn from(kind: SheetKind) -> Self {
        match kind {
            SheetKind::Character => Self::Character,
            SheetKind::Obstacle => Self::Obstacle,
            SheetKind::Zone => Self::Zone,
            SheetKind::Default => Self::Default,
        }
    }
}

impl From<SheetKindJson> for SheetKind {
    fn from(kind: SheetKindJson) -> Self {
        match kind {
            SheetKindJson::Character => Self::Character,
            SheetKindJson::Obstacle => Self::Obstacle,
            SheetKindJson::Zone => Self::Zone,
            SheetKindJson::Default => Self::Default,
        }
    }
}

fn layout_to_json(layout: &DeskLayout) -> DeskLayoutJson {
    DeskLayoutJson {
        sheets: layout
            .sheets
            .iter()
            .map(|entry| DeskLayoutEntryJson {
                name: entry.name.to_string(),
                kind: entry.kind.into(),
                rect: entry.rect,
                minimized: entry.minimized,
            })
            .collect(),
    }
}

fn layout_from_json(layout_json: DeskLayoutJson) -> DeskLayout {
    DeskLayout {
        sheets: layout_json
            .sheets
            .into_iter()
            .map(|entry| DeskLayoutEntry {
                name: SheetName::from(entry.name),
                kind: entry.kind.into(),
                rect: Rect::new(entry.rect.x, entry.rect.y, entry.rect.width, entry.rect.height),
                minimized: entry.minimized,
            })
            .collect(),
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(root).map_err(|source| StoreError::Io { path: root.to_path_buf(), source })?;

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".fatesheet.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    file.write_all(contents)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
            dir.sync_all()
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }
    }

    Ok(())
}
