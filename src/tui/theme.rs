// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Desk colors.
//!
//! Every color is tied to something the desk draws: a sheet kind, the focus frame, a dangling
//! reference. `FATESHEET_TUI_PALETTE` overrides any of them with `role=color` pairs, for example
//! `zone=#d04040, background=black, focus=light-yellow`. Colors use ratatui's names, `#rrggbb` or
//! an ANSI index.

use std::{env, error::Error, fmt, str::FromStr};

use ratatui::style::{Color, Modifier, Style};

use crate::model::SheetKind;
use crate::overlay::OverlayStyle;

const ENV_TUI_PALETTE: &str = "FATESHEET_TUI_PALETTE";

const ROLES: [&str; 10] = [
    "text",
    "background",
    "focus",
    "frame",
    "zone",
    "character",
    "obstacle",
    "default",
    "dangling",
    "muted",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TuiTheme {
    /// `None` keeps the terminal's own colors.
    text: Option<Color>,
    background: Option<Color>,
    focus: Color,
    frame: Color,
    zone: Color,
    character: Color,
    obstacle: Color,
    default_sheet: Color,
    dangling: Color,
    muted: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            text: None,
            background: None,
            focus: Color::Yellow,
            frame: Color::Gray,
            zone: Color::Red,
            character: Color::LightBlue,
            obstacle: Color::White,
            default_sheet: Color::DarkGray,
            dangling: Color::LightRed,
            muted: Color::DarkGray,
        }
    }
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        match env::var(ENV_TUI_PALETTE) {
            Ok(value) => Self::with_overrides(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ThemeError::NotUnicode),
        }
    }

    /// Default colors with each `role=color` pair in `overrides` applied on top.
    pub(crate) fn with_overrides(overrides: &str) -> Result<Self, ThemeError> {
        let mut theme = Self::default();
        for pair in overrides.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
            let (role, value) = pair
                .split_once('=')
                .ok_or_else(|| ThemeError::MissingColor { role: pair.to_owned() })?;
            let (role, value) = (role.trim().to_ascii_lowercase(), value.trim());
            let color = Color::from_str(value).map_err(|_| ThemeError::InvalidColor {
                role: role.clone(),
                value: value.to_owned(),
            })?;
            let slot = match role.as_str() {
                "text" => {
                    theme.text = Some(color);
                    continue;
                }
                "background" => {
                    theme.background = Some(color);
                    continue;
                }
                "focus" => &mut theme.focus,
                "frame" => &mut theme.frame,
                "zone" => &mut theme.zone,
                "character" => &mut theme.character,
                "obstacle" => &mut theme.obstacle,
                "default" => &mut theme.default_sheet,
                "dangling" => &mut theme.dangling,
                "muted" => &mut theme.muted,
                _ => return Err(ThemeError::UnknownRole(role)),
            };
            *slot = color;
        }
        Ok(theme)
    }

    pub(crate) fn base_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(text) = self.text {
            style = style.fg(text);
        }
        if let Some(background) = self.background {
            style = style.bg(background);
        }
        style
    }

    fn kind_color(&self, kind: SheetKind) -> Color {
        match kind {
            SheetKind::Character => self.character,
            SheetKind::Obstacle => self.obstacle,
            SheetKind::Zone => self.zone,
            SheetKind::Default => self.default_sheet,
        }
    }

    pub(crate) fn sheet_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.focus).add_modifier(Modifier::BOLD)
        } else {
            self.base_style().fg(self.frame)
        }
    }

    pub(crate) fn sheet_kind_style(&self, kind: SheetKind) -> Style {
        self.base_style().fg(self.kind_color(kind))
    }

    /// Lines and markers take the target's kind color; zone anchors are bold.
    pub(crate) fn overlay_style(&self, style: OverlayStyle) -> Style {
        let base = self.base_style();
        match style {
            OverlayStyle::Zone => base.fg(self.zone).add_modifier(Modifier::BOLD),
            OverlayStyle::Character => base.fg(self.character),
            OverlayStyle::Obstacle => base.fg(self.obstacle),
            OverlayStyle::Default => base.fg(self.default_sheet),
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    /// References whose target is no longer open.
    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.dangling)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(self.muted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ThemeError {
    NotUnicode,
    MissingColor { role: String },
    UnknownRole(String),
    InvalidColor { role: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUnicode => write!(f, "{ENV_TUI_PALETTE} is not valid unicode"),
            Self::MissingColor { role } => {
                write!(f, "{ENV_TUI_PALETTE}: {role:?} needs a color (role=color)")
            }
            Self::UnknownRole(role) => write!(
                f,
                "{ENV_TUI_PALETTE}: unknown role {role:?}, expected one of {}",
                ROLES.join(", ")
            ),
            Self::InvalidColor { role, value } => {
                write!(f, "{ENV_TUI_PALETTE}: {value:?} is not a color (role {role})")
            }
        }
    }
}

impl Error for ThemeError {}
