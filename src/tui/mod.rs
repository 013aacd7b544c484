// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The desk shell (ratatui + crossterm): sheet windows, the reference overlay painted on top of
//! them, a one-line footer and modal prompts. The loop sleeps until the next scheduler deadline or
//! the next input event, whichever comes first.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::graph::GraphSnapshot;
use crate::model::{
    Point, Rect as DeskRect, Sheet, SheetBody, SheetField, SheetId, SheetKind, SheetName, SheetRow,
    WindowState, APPROACHES,
};
use crate::overlay::{render_overlay, OverlayCanvas, OverlayStats};
use crate::store::{escape_notes, unescape_notes};
use crate::workspace::Workspace;

mod picker;
mod theme;

use picker::rank_candidates;
use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_DURATION: Duration = Duration::from_secs(2);
const MOVE_STEP_X: i32 = 2;
const MOVE_STEP_Y: i32 = 1;

/// Runs the interactive desk until the user quits.
pub fn run(desk: Workspace) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(desk, theme);

    while !app.should_quit {
        app.on_tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        let timeout = app.desk.scheduler().timeout_from(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    info!("desk closed with {} open sheets", app.desk.len());
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let now = Instant::now();
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let desk_area = layout[0];
    let status_area = layout[1];
    app.desk_area = desk_area;

    frame.render_widget(Block::default().style(app.theme.base_style()), desk_area);
    {
        let view: &App = app;
        for id in view.desk.z_order() {
            if let Some(sheet) = view.desk.sheet(*id).filter(|sheet| sheet.is_renderable()) {
                render_sheet(frame, view, desk_area, sheet);
            }
        }
    }

    if app.overlay.width() != usize::from(desk_area.width)
        || app.overlay.height() != usize::from(desk_area.height)
    {
        app.overlay = OverlayCanvas::new(desk_area.width, desk_area.height);
    } else {
        app.overlay.clear();
    }
    app.overlay_stats = render_overlay(app.desk.snapshot(), &app.desk, &mut app.overlay);
    blit_overlay(frame, &app.overlay, desk_area, &app.theme);

    frame.render_widget(Paragraph::new(footer_help_line(app, now)), status_area);

    match &app.input {
        InputMode::Normal => {}
        InputMode::Rename { buffer } => render_prompt(frame, "Rename", buffer, None, desk_area),
        InputMode::Load { buffer, saved } => {
            let hint = saved_names_hint(saved);
            let label = "Load sheets (comma separated)";
            render_prompt(frame, label, buffer, Some(hint.as_str()), desk_area)
        }
        InputMode::Edit { sheet, field, buffer } => {
            let label = edit_prompt_label(app, *sheet, *field);
            let hint = "Tab/↓ next, Shift-Tab/↑ previous, Del removes the row";
            render_prompt(frame, &label, buffer, Some(hint), desk_area)
        }
        InputMode::Picker { query, selection } => {
            let ranked = app.picker_candidates(query);
            render_picker(frame, query, &ranked, *selection, desk_area);
        }
    }

    if app.show_help {
        render_help(frame, app, desk_area);
    }
}

// Sheet window, footer, prompt and help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum InputMode {
    #[default]
    Normal,
    Rename { buffer: String },
    /// `saved` is the folder listing taken when the prompt opened.
    Load { buffer: String, saved: Vec<SheetName> },
    Picker { query: String, selection: usize },
    Edit { sheet: SheetId, field: SheetField, buffer: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKey {
    Edited,
    Submit,
    Cancel,
    Ignored,
}

fn edit_buffer(buffer: &mut String, code: KeyCode) -> PromptKey {
    match code {
        KeyCode::Enter => PromptKey::Submit,
        KeyCode::Esc => PromptKey::Cancel,
        KeyCode::Backspace => {
            buffer.pop();
            PromptKey::Edited
        }
        KeyCode::Char(ch) if !ch.is_control() => {
            buffer.push(ch);
            PromptKey::Edited
        }
        _ => PromptKey::Ignored,
    }
}

struct App {
    desk: Workspace,
    theme: TuiTheme,
    focused: Option<SheetId>,
    /// Row in the focused zone's reference list.
    selected_reference: usize,
    input: InputMode,
    show_help: bool,
    help_scroll: u16,
    toast: Option<Toast>,
    should_quit: bool,
    /// Last drawn desk area; mouse hits are translated through it.
    desk_area: Rect,
    overlay: OverlayCanvas,
    overlay_stats: OverlayStats,
}

impl App {
    fn new(desk: Workspace, theme: TuiTheme) -> Self {
        let focused = desk.z_order().last().copied();
        Self {
            desk,
            theme,
            focused,
            selected_reference: 0,
            input: InputMode::Normal,
            show_help: false,
            help_scroll: 0,
            toast: None,
            should_quit: false,
            desk_area: Rect::default(),
            overlay: OverlayCanvas::new(0, 0),
            overlay_stats: OverlayStats::default(),
        }
    }

    fn focused_sheet(&self) -> Option<&Sheet> {
        self.focused.and_then(|id| self.desk.sheet(id))
    }

    fn focused_zone(&self) -> Option<SheetId> {
        self.focused_sheet().filter(|sheet| sheet.kind().is_zone()).map(Sheet::id)
    }

    fn on_tick(&mut self, now: Instant) {
        let ticks = self.desk.tick(now);
        if ticks.slow {
            self.clamp_selected_reference();
        }
        if self.focused.is_some_and(|id| self.desk.sheet(id).is_none()) {
            self.focused = self.desk.z_order().last().copied();
        }
        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.toast = None;
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_DURATION });
    }

    fn toast_message(&self, now: Instant) -> Option<&str> {
        self.toast.as_ref().filter(|toast| now < toast.expires_at).map(|toast| toast.message.as_str())
    }

    fn minimized_names(&self) -> Vec<String> {
        self.desk
            .z_order()
            .iter()
            .filter_map(|id| self.desk.sheet(*id))
            .filter(|sheet| sheet.window_state() == WindowState::Minimized)
            .map(|sheet| {
                let name = if sheet.name().is_blank() { "(unnamed)" } else { sheet.name().as_str() };
                if self.focused == Some(sheet.id()) {
                    format!("[{name}]")
                } else {
                    name.to_owned()
                }
            })
            .collect()
    }

    fn picker_candidates(&self, query: &str) -> Vec<SheetName> {
        match self.focused_zone() {
            Some(zone) => rank_candidates(query, &self.desk.picker_options(zone)),
            None => Vec::new(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            return self.handle_help_key(code);
        }

        match std::mem::take(&mut self.input) {
            InputMode::Normal => return self.handle_normal_key(code),
            InputMode::Rename { mut buffer } => match edit_buffer(&mut buffer, code) {
                PromptKey::Submit => self.commit_rename(&buffer),
                PromptKey::Cancel => {}
                PromptKey::Edited | PromptKey::Ignored => self.input = InputMode::Rename { buffer },
            },
            InputMode::Load { mut buffer, saved } => match edit_buffer(&mut buffer, code) {
                PromptKey::Submit => self.commit_load(&buffer),
                PromptKey::Cancel => {}
                PromptKey::Edited | PromptKey::Ignored => {
                    self.input = InputMode::Load { buffer, saved }
                }
            },
            InputMode::Edit { sheet, field, mut buffer } => match code {
                KeyCode::Tab | KeyCode::Down => {
                    self.commit_edit(sheet, field, &buffer);
                    self.step_edit(sheet, field, true);
                }
                KeyCode::BackTab | KeyCode::Up => {
                    self.commit_edit(sheet, field, &buffer);
                    self.step_edit(sheet, field, false);
                }
                KeyCode::Delete => self.remove_edited_row(sheet, field),
                _ => match edit_buffer(&mut buffer, code) {
                    PromptKey::Submit => {
                        self.commit_edit(sheet, field, &buffer);
                        self.set_toast(format!("Updated {}", field.label()));
                    }
                    PromptKey::Cancel => {}
                    PromptKey::Edited | PromptKey::Ignored => {
                        self.input = InputMode::Edit { sheet, field, buffer }
                    }
                },
            },
            InputMode::Picker { mut query, mut selection } => {
                match code {
                    KeyCode::Down => selection = selection.saturating_add(1),
                    KeyCode::Up => selection = selection.saturating_sub(1),
                    _ => match edit_buffer(&mut query, code) {
                        PromptKey::Submit => {
                            self.commit_pick(&query, selection);
                            return false;
                        }
                        PromptKey::Cancel => return false,
                        PromptKey::Edited => selection = 0,
                        PromptKey::Ignored => {}
                    },
                }
                let count = self.picker_candidates(&query).len();
                selection = selection.min(count.saturating_sub(1));
                self.input = InputMode::Picker { query, selection };
            }
        }
        false
    }

    fn handle_help_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
            KeyCode::Char('j') | KeyCode::Down => self.help_scroll = self.help_scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.help_scroll = self.help_scroll.saturating_sub(1),
            _ => {}
        }
        false
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            KeyCode::Char('c') => self.create_sheet(SheetKind::Character),
            KeyCode::Char('o') => self.create_sheet(SheetKind::Obstacle),
            KeyCode::Char('z') => self.create_sheet(SheetKind::Zone),
            KeyCode::Char('d') => self.create_sheet(SheetKind::Default),
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Left => self.move_focused(-MOVE_STEP_X, 0),
            KeyCode::Right => self.move_focused(MOVE_STEP_X, 0),
            KeyCode::Up => self.move_focused(0, -MOVE_STEP_Y),
            KeyCode::Down => self.move_focused(0, MOVE_STEP_Y),
            KeyCode::Char('H') => self.resize_focused(-MOVE_STEP_X, 0),
            KeyCode::Char('L') => self.resize_focused(MOVE_STEP_X, 0),
            KeyCode::Char('K') => self.resize_focused(0, -MOVE_STEP_Y),
            KeyCode::Char('J') => self.resize_focused(0, MOVE_STEP_Y),
            KeyCode::Char('j') => self.step_selected_reference(true),
            KeyCode::Char('k') => self.step_selected_reference(false),
            KeyCode::Char('r') => {
                if let Some(buffer) = self.focused_sheet().map(|sheet| sheet.name().as_str().to_owned()) {
                    self.input = InputMode::Rename { buffer };
                }
            }
            KeyCode::Char('e') => {
                let first = self.focused_sheet().and_then(|sheet| sheet.fields().first().copied());
                if let (Some(id), Some(field)) = (self.focused, first) {
                    self.open_edit(id, field);
                }
            }
            KeyCode::Char('+') => self.add_row_to_focused(None),
            KeyCode::Char('*') => self.add_row_to_focused(Some(SheetRow::Stunt)),
            KeyCode::Char('a') => self.open_picker(),
            KeyCode::Char('x') => self.remove_selected_reference(),
            KeyCode::Char('m') => {
                if let Some(id) = self.focused {
                    match self.desk.toggle_minimized(id) {
                        Some(WindowState::Minimized) => self.set_toast("Minimized (m to restore)"),
                        Some(_) => {
                            self.desk.raise(id);
                        }
                        None => {}
                    }
                }
            }
            KeyCode::Char('w') => self.close_focused(),
            KeyCode::Char('W') => {
                let closed = self.desk.close_all();
                self.focused = None;
                self.selected_reference = 0;
                self.set_toast(format!("Closed {closed} sheets"));
            }
            KeyCode::Char('s') => self.save_all(),
            KeyCode::Char('l') => self.open_load_prompt(),
            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.show_help || self.input != InputMode::Normal {
            return;
        }
        let area = self.desk_area;
        if mouse.column < area.x
            || mouse.row < area.y
            || mouse.column >= area.right()
            || mouse.row >= area.bottom()
        {
            return;
        }

        let point = Point::new(i32::from(mouse.column - area.x), i32::from(mouse.row - area.y));
        if let Some(id) = self.desk.hit_test(point) {
            self.focus_sheet(id);
        }
    }

    fn focus_sheet(&mut self, id: SheetId) {
        if self.focused != Some(id) {
            self.selected_reference = 0;
        }
        self.focused = Some(id);
        self.desk.raise(id);
    }

    /// Cycles in registration order so raising does not reshuffle the cycle.
    fn cycle_focus(&mut self, forward: bool) {
        let ids = self.desk.registry().ids();
        if ids.is_empty() {
            self.focused = None;
            return;
        }
        let current = self.focused.and_then(|id| ids.iter().position(|other| *other == id));
        let next = match (current, forward) {
            (Some(idx), true) => (idx + 1) % ids.len(),
            (Some(idx), false) => (idx + ids.len() - 1) % ids.len(),
            (None, true) => 0,
            (None, false) => ids.len() - 1,
        };
        self.focus_sheet(ids[next]);
    }

    fn create_sheet(&mut self, kind: SheetKind) {
        match self.desk.new_sheet(kind) {
            Ok(id) => {
                self.focus_sheet(id);
                self.set_toast(format!("New {kind} sheet (r to name it)"));
            }
            Err(err) => {
                warn!("cannot create {kind} sheet: {err}");
                self.set_toast(format!("Cannot create sheet: {err}"));
            }
        }
    }

    fn move_focused(&mut self, dx: i32, dy: i32) {
        if let Some(id) = self.focused {
            self.desk.move_sheet(id, dx, dy);
        }
    }

    fn resize_focused(&mut self, dw: i32, dh: i32) {
        if let Some(id) = self.focused {
            self.desk.resize_sheet(id, dw, dh);
        }
    }

    fn close_focused(&mut self) {
        let Some(id) = self.focused else {
            return;
        };
        self.desk.close_sheet(id);
        self.focused = self.desk.z_order().last().copied();
        self.selected_reference = 0;
    }

    fn focused_reference_names(&self) -> Vec<SheetName> {
        self.focused_sheet()
            .and_then(Sheet::references)
            .map(|references| references.names_in_order().to_vec())
            .unwrap_or_default()
    }

    fn step_selected_reference(&mut self, forward: bool) {
        let count = self.focused_reference_names().len();
        if count == 0 {
            return;
        }
        self.selected_reference = if forward {
            (self.selected_reference + 1).min(count - 1)
        } else {
            self.selected_reference.saturating_sub(1)
        };
    }

    fn clamp_selected_reference(&mut self) {
        let count = self.focused_reference_names().len();
        self.selected_reference = self.selected_reference.min(count.saturating_sub(1));
    }

    fn open_picker(&mut self) {
        let Some(zone) = self.focused_zone() else {
            self.set_toast("Focus a zone sheet to add references");
            return;
        };
        if self.desk.picker_options(zone).is_empty() {
            self.set_toast("Nothing to add: name other sheets first");
            return;
        }
        self.input = InputMode::Picker { query: String::new(), selection: 0 };
    }

    fn commit_pick(&mut self, query: &str, selection: usize) {
        let Some(zone) = self.focused_zone() else {
            return;
        };
        let candidates = self.picker_candidates(query);
        let Some(name) = candidates.get(selection) else {
            return;
        };
        if self.desk.add_reference(zone, name.as_str()) {
            self.selected_reference = self.focused_reference_names().len().saturating_sub(1);
            self.set_toast(format!("Added {}", name.as_str()));
        }
    }

    fn remove_selected_reference(&mut self) {
        let Some(zone) = self.focused_zone() else {
            return;
        };
        let Some(name) = self.focused_reference_names().get(self.selected_reference).cloned() else {
            return;
        };
        if self.desk.remove_reference(zone, name.as_str()) {
            self.clamp_selected_reference();
            self.set_toast(format!("Removed {}", name.as_str()));
        }
    }

    fn commit_rename(&mut self, buffer: &str) {
        let Some(id) = self.focused else {
            return;
        };
        let name = buffer.trim();
        let Some(outcome) = self.desk.rename_sheet(id, name) else {
            return;
        };
        if outcome.shadowed {
            self.set_toast(format!("Another sheet is already named {name}"));
        } else if outcome.substituted > 0 {
            self.set_toast(format!("Renamed; {} zone references follow", outcome.substituted));
        } else {
            self.set_toast("Renamed");
        }
    }

    fn open_load_prompt(&mut self) {
        let saved = match self.desk.saved_sheet_names() {
            Ok(names) => names,
            Err(err) => {
                warn!("cannot list saved sheets: {err}");
                Vec::new()
            }
        };
        self.input = InputMode::Load { buffer: String::new(), saved };
    }

    fn open_edit(&mut self, sheet: SheetId, field: SheetField) {
        let Some(value) = self.desk.sheet(sheet).and_then(|s| s.field_value(field)) else {
            return;
        };
        // Notes are edited on one line.
        let buffer = if field == SheetField::Notes { escape_notes(value) } else { value.to_owned() };
        self.input = InputMode::Edit { sheet, field, buffer };
    }

    fn commit_edit(&mut self, sheet: SheetId, field: SheetField, buffer: &str) {
        let value = if field == SheetField::Notes { unescape_notes(buffer) } else { buffer.to_owned() };
        let unchanged = self.desk.sheet(sheet).and_then(|s| s.field_value(field)) == Some(value.as_str());
        if !unchanged {
            self.desk.set_field(sheet, field, value);
        }
    }

    /// Moves the edit prompt to the neighbouring field, wrapping at either end.
    fn step_edit(&mut self, sheet: SheetId, field: SheetField, forward: bool) {
        let Some(fields) = self.desk.sheet(sheet).map(Sheet::fields) else {
            return;
        };
        let Some(pos) = fields.iter().position(|candidate| *candidate == field) else {
            return;
        };
        let next = if forward { (pos + 1) % fields.len() } else { (pos + fields.len() - 1) % fields.len() };
        self.open_edit(sheet, fields[next]);
    }

    fn remove_edited_row(&mut self, sheet: SheetId, field: SheetField) {
        let Some((row, index)) = field.row() else {
            self.set_toast(format!("{} is not a removable row", field.label()));
            self.open_edit(sheet, field);
            return;
        };
        let pos = self
            .desk
            .sheet(sheet)
            .and_then(|s| s.fields().iter().position(|candidate| *candidate == field))
            .unwrap_or(0);
        if self.desk.remove_row(sheet, row, index) {
            self.set_toast(format!("Removed {}", field.label()));
        }
        let fields = self.desk.sheet(sheet).map(Sheet::fields).unwrap_or_default();
        if let Some(next) = fields.get(pos.min(fields.len().saturating_sub(1))).copied() {
            self.open_edit(sheet, next);
        }
    }

    /// `None` picks the sheet's main list: aspects on a character, rows on an obstacle.
    fn add_row_to_focused(&mut self, row: Option<SheetRow>) {
        let Some((id, kind)) = self.focused_sheet().map(|sheet| (sheet.id(), sheet.kind())) else {
            return;
        };
        let row = match (row, kind) {
            (Some(row), _) => row,
            (None, SheetKind::Character) => SheetRow::Aspect,
            (None, _) => SheetRow::Obstacle,
        };
        match self.desk.add_row(id, row) {
            Some(field) => self.open_edit(id, field),
            None => self.set_toast(format!("{kind} sheets have no {row:?} rows")),
        }
    }

    fn commit_load(&mut self, buffer: &str) {
        let names: Vec<SheetName> = buffer
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(SheetName::from)
            .collect();
        if names.is_empty() {
            return;
        }

        match self.desk.load_sheets(&names) {
            Ok(report) => {
                if let Some(id) = report.opened.first().copied() {
                    self.focus_sheet(id);
                }
                if report.unresolved.is_empty() {
                    self.set_toast(format!("Loaded {} sheets", report.opened.len()));
                } else {
                    self.set_toast(format!(
                        "Loaded {} sheets, {} unresolved",
                        report.opened.len(),
                        report.unresolved.len()
                    ));
                }
            }
            Err(err) => self.set_toast(format!("Load failed: {err}")),
        }
    }

    fn save_all(&mut self) {
        match self.desk.save_all() {
            Ok(report) if report.failed.is_empty() => {
                self.set_toast(format!("Saved {} sheets", report.saved.len()));
            }
            Ok(report) => {
                let first = report.failed.first().map(|(_, err)| err.to_string()).unwrap_or_default();
                self.set_toast(format!(
                    "Saved {} sheets, {} failed: {first}",
                    report.saved.len(),
                    report.failed.len()
                ));
            }
            Err(err) => self.set_toast(format!("Save failed: {err}")),
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
