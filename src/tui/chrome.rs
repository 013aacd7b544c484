// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Sheet window, footer, prompt, picker and help helpers used by TUI rendering.
fn sheet_title(sheet: &Sheet) -> String {
    let name = if sheet.name().is_blank() { "(unnamed)" } else { sheet.name().as_str() };
    format!(" [{}] {name} ", sheet.kind())
}

/// Maps a desk rect onto the screen, clipped to `area`. `None` when nothing is visible.
fn screen_rect(area: Rect, rect: DeskRect) -> Option<Rect> {
    let left = i64::from(area.x) + i64::from(rect.x);
    let top = i64::from(area.y) + i64::from(rect.y);
    let right = left + i64::from(rect.width);
    let bottom = top + i64::from(rect.height);

    let clip_left = left.max(i64::from(area.x));
    let clip_top = top.max(i64::from(area.y));
    let clip_right = right.min(i64::from(area.x) + i64::from(area.width));
    let clip_bottom = bottom.min(i64::from(area.y) + i64::from(area.height));
    if clip_right <= clip_left || clip_bottom <= clip_top {
        return None;
    }

    Some(Rect::new(
        clamp_to_u16(clip_left),
        clamp_to_u16(clip_top),
        clamp_to_u16(clip_right - clip_left),
        clamp_to_u16(clip_bottom - clip_top),
    ))
}

fn clamp_to_u16(value: i64) -> u16 {
    value.clamp(0, i64::from(u16::MAX)) as u16
}

/// Body text of a sheet window. `selected` highlights a zone reference row.
fn sheet_body_lines(
    sheet: &Sheet,
    snapshot: &GraphSnapshot,
    selected: Option<usize>,
    theme: &TuiTheme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::<Line<'static>>::new();
    let label_style = theme.dim_style();

    match sheet.body() {
        SheetBody::Character(character) => {
            lines.push(Line::from(vec![
                Span::styled("FP ".to_owned(), label_style),
                Span::raw(character.fate_points.clone()),
                Span::styled("  Refresh ".to_owned(), label_style),
                Span::raw(character.refresh.clone()),
            ]));
            lines.push(labeled_line("HC ", &character.high_concept, label_style));
            lines.push(labeled_line("Trouble ", &character.trouble, label_style));
            let approaches: Vec<_> = APPROACHES.iter().zip(character.approaches.iter()).collect();
            for row in approaches.chunks(3) {
                let mut spans = Vec::<Span<'static>>::new();
                for (approach, score) in row {
                    if !spans.is_empty() {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(Span::styled(format!("{approach} "), label_style));
                    spans.push(Span::raw((*score).clone()));
                }
                lines.push(Line::from(spans));
            }
            for aspect in &character.aspects {
                lines.push(Line::from(format!("• {aspect}")));
            }
            for stunt in &character.stunts {
                lines.push(Line::from(format!("★ {stunt}")));
            }
        }
        SheetBody::Obstacle(rows) => {
            for row in rows {
                lines.push(Line::from(vec![
                    Span::raw(row.agent.clone()),
                    Span::styled(": ".to_owned(), label_style),
                    Span::raw(row.score.clone()),
                ]));
            }
        }
        SheetBody::Zone(references) => {
            if references.is_empty() {
                lines.push(Line::from(Span::styled("(no references, a to add)".to_owned(), label_style)));
            }
            for (idx, name) in references.names_in_order().iter().enumerate() {
                let dangling = snapshot.is_dangling(sheet.id(), name.as_str());
                let mut style = if dangling { theme.error_style() } else { theme.base_style() };
                if selected == Some(idx) {
                    style = style.patch(theme.selection_style());
                }
                let text = if dangling {
                    format!("→ {} (missing)", name.as_str())
                } else {
                    format!("→ {}", name.as_str())
                };
                lines.push(Line::from(Span::styled(text, style)));
            }
        }
        SheetBody::Default => {}
    }

    if !sheet.notes().is_empty() {
        if !lines.is_empty() {
            lines.push(Line::from(String::new()));
        }
        lines.extend(sheet.notes().lines().map(|line| Line::from(line.to_owned())));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("(empty)".to_owned(), label_style)));
    }

    lines
}

fn labeled_line(label: &str, value: &str, label_style: Style) -> Line<'static> {
    Line::from(vec![Span::styled(label.to_owned(), label_style), Span::raw(value.to_owned())])
}

fn render_sheet(
    frame: &mut Frame<'_>,
    app: &App,
    desk_area: Rect,
    sheet: &Sheet,
) {
    let Some(area) = screen_rect(desk_area, sheet.rect()) else {
        return;
    };
    let focused = app.focused == Some(sheet.id());
    let selected = if focused { Some(app.selected_reference) } else { None };

    let title = Line::from(Span::styled(
        sheet_title(sheet),
        app.theme.sheet_kind_style(sheet.kind()).add_modifier(Modifier::BOLD),
    ));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(app.theme.sheet_border_style(focused))
        .style(app.theme.base_style());
    let body = sheet_body_lines(sheet, app.desk.snapshot(), selected, &app.theme);

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(body).block(block).wrap(Wrap { trim: false }), area);
}

/// Paints the overlay canvas onto the buffer, offset to `desk_area`.
fn blit_overlay(frame: &mut Frame<'_>, canvas: &OverlayCanvas, desk_area: Rect, theme: &TuiTheme) {
    let buf = frame.buffer_mut();
    for (x, y, cell) in canvas.painted() {
        let (Ok(dx), Ok(dy)) = (u16::try_from(x), u16::try_from(y)) else {
            continue;
        };
        let (sx, sy) = (desk_area.x.saturating_add(dx), desk_area.y.saturating_add(dy));
        if sx >= desk_area.right() || sy >= desk_area.bottom() {
            continue;
        }
        buf.get_mut(sx, sy).set_char(cell.ch).set_style(theme.overlay_style(cell.style));
    }
}

fn footer_help_line(app: &App, now: Instant) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match &app.input {
        InputMode::Normal => {
            push_footer_entry(&mut spans, "NEW", "c/o/z/d");
            push_footer_entry(&mut spans, "FOCUS", "Tab");
            push_footer_entry(&mut spans, "RENAME", "r");
            push_footer_entry_maybe_disabled(&mut spans, "EDIT", "e", app.focused.is_none());
            let zone_focused = app.focused_sheet().is_some_and(|sheet| sheet.kind().is_zone());
            push_footer_entry_maybe_disabled(&mut spans, "REF", "a/x", !zone_focused);
            push_footer_entry(&mut spans, "SAVE", "s");
            push_footer_entry(&mut spans, "LOAD", "l");
            push_footer_entry(&mut spans, "HELP", "?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
        InputMode::Edit { .. } => {
            push_footer_entry(&mut spans, "NEXT", "Tab");
            push_footer_entry(&mut spans, "DONE", "Enter");
            push_footer_entry(&mut spans, "DROP ROW", "Del");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
        InputMode::Rename { .. } | InputMode::Load { .. } | InputMode::Picker { .. } => {
            push_footer_entry(&mut spans, "ACCEPT", "Enter");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
    }

    if app.overlay_stats.lines > 0 {
        push_footer_entry_with_separator(&mut spans, "LINKS", &app.overlay_stats.lines.to_string(), " | ");
    }

    let minimized = app.minimized_names();
    if !minimized.is_empty() {
        push_footer_entry_with_separator(&mut spans, "MIN", &minimized.join(", "), " | ");
    }

    if let Some(message) = app.toast_message(now) {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(message.to_owned()));
    }

    Line::from(spans)
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Desk",
        &[
            ("?", "Help (toggle)"),
            ("q", "Quit"),
            ("c/o/z/d", "New Character/Obstacle/Zone/Default sheet"),
            ("Tab/Shift-Tab", "Focus next/previous sheet"),
            ("click", "Focus the sheet under the cursor"),
            ("s", "Save all sheets and the desk layout"),
            ("l", "Load sheets by name (comma separated)"),
            ("W", "Close all sheets"),
        ],
    ),
    (
        "Focused sheet",
        &[
            ("←/→/↑/↓", "Move"),
            ("H/L", "Narrower/wider"),
            ("K/J", "Shorter/taller"),
            ("r", "Rename"),
            ("e", "Edit fields (Tab/Shift-Tab to move, Enter to finish)"),
            ("+", "Add an aspect (character) or a row (obstacle)"),
            ("*", "Add a stunt (character)"),
            ("Del", "While editing: remove the aspect, stunt or row"),
            ("m", "Minimize/restore"),
            ("w", "Close"),
        ],
    ),
    (
        "Zone",
        &[
            ("j/k", "Select next/previous reference"),
            ("a", "Add reference (type to filter)"),
            ("x", "Remove selected reference"),
        ],
    ),
];

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = HELP_SECTIONS
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (idx, (header, entries)) in HELP_SECTIONS.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(String::new()));
        }
        lines.push(Line::from(Span::styled(format!("--- {header} ---"), header_style)));
        for (key, desc) in entries.iter() {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(FOOTER_KEY_COLOR));
    let inner = block.inner(area);
    let max_scroll = lines
        .len()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// One-line text prompt at the bottom of the desk.
fn render_prompt(
    frame: &mut Frame<'_>,
    label: &str,
    buffer: &str,
    hint: Option<&str>,
    desk_area: Rect,
) {
    let height = if hint.is_some() { 4 } else { 3 };
    if desk_area.height < height {
        return;
    }
    let area = Rect::new(desk_area.x, desk_area.bottom() - height, desk_area.width, height);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {label} "))
        .border_style(Style::default().fg(FOOTER_KEY_COLOR));
    let mut lines = vec![Line::from(buffer.to_owned())];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(hint.to_owned(), Style::default().fg(FOOTER_LABEL_COLOR))));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let cursor_x = area.x + 1 + buffer.chars().count().min(usize::from(u16::MAX)) as u16;
    if cursor_x < area.right().saturating_sub(1) {
        frame.set_cursor(cursor_x, area.y + 1);
    }
}

fn saved_names_hint(saved: &[SheetName]) -> String {
    if saved.is_empty() {
        return "No saved sheets".to_owned();
    }
    let names: Vec<&str> = saved.iter().map(SheetName::as_str).collect();
    format!("Saved: {}", names.join(", "))
}

fn edit_prompt_label(app: &App, sheet: SheetId, field: SheetField) -> String {
    let name = app
        .desk
        .sheet(sheet)
        .map(|sheet| sheet.name().as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("(unnamed)");
    format!("{name}: {}", field.label())
}

fn render_picker(
    frame: &mut Frame<'_>,
    query: &str,
    ranked: &[SheetName],
    selection: usize,
    desk_area: Rect,
) {
    let area = centered_rect(50, 60, desk_area);
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from(vec![
        Span::styled("> ".to_owned(), help_key_style()),
        Span::raw(query.to_owned()),
    ])];
    if ranked.is_empty() {
        lines.push(Line::from(Span::styled(
            "(nothing to add)".to_owned(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (idx, name) in ranked.iter().enumerate() {
        let style = if idx == selection {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(name.as_str().to_owned(), style)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add reference ")
        .border_style(Style::default().fg(FOOTER_KEY_COLOR));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, " ", disabled);
}

fn push_footer_entry_with_separator(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, separator, false);
}

fn push_footer_entry_with_separator_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(separator.to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    vec![Span::styled(value.to_owned(), Style::default().fg(color).add_modifier(Modifier::BOLD))]
}
