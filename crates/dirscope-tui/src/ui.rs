//! Rendering for the TUI.

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Gauge, Padding, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::alert::AlertKind;
use crate::app::{App, Row};
use crate::event::get_help_sections;

/// Braille spinner animation frames.
const SPINNER_GLYPHS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Width of the per-entry size bar in cells.
const BAR_WIDTH: usize = 12;

/// Width of the details side panel.
const DETAILS_WIDTH: u16 = 36;

/// Render the full UI for one frame.
pub(crate) fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;

    let outer = Block::bordered()
        .title(" dirscope ")
        .title_alignment(Alignment::Center)
        .title_style(theme.title)
        .border_style(theme.border);
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let [path_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_path_line(frame, app, path_area);

    if app.show_details && main_area.width > DETAILS_WIDTH + 20 {
        let [list_area, details_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(DETAILS_WIDTH)])
                .areas(main_area);
        render_entries(frame, app, list_area);
        render_details(frame, app, details_area);
    } else {
        render_entries(frame, app, main_area);
    }

    render_status_line(frame, app, status_area);

    if app.show_help {
        render_help(frame, app, frame.area());
    }
    if let Some(alert) = &app.alert {
        render_alert(frame, app, alert, frame.area());
    }
}

fn render_path_line(frame: &mut Frame, app: &App, area: Rect) {
    let path = app.root.display().to_string();
    let line = Line::from(vec![
        Span::styled(" ", app.theme.path_line),
        Span::styled(
            truncate_to_width(&path, area.width.saturating_sub(2) as usize),
            app.theme.path_line,
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(app.theme.path_line), area);
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    if app.rows.is_empty() {
        let empty = Paragraph::new("  (empty directory)")
            .style(Style::default().fg(app.theme.muted));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let offset = if app.selected >= height {
        app.selected + 1 - height
    } else {
        0
    };

    let lines: Vec<Line> = app
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, row)| entry_line(app, row, index == app.selected, area.width as usize))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn entry_line<'a>(app: &App, row: &'a Row, selected: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let size_text = format!("{:>10}", format_size(row.stats.size, BINARY));
    let share = if app.total_size > 0 {
        row.stats.size as f64 / app.total_size as f64
    } else {
        0.0
    };
    let percent_text = format!("{:>5.1}%", share * 100.0);

    // marker(2) + size(10) + gap + percent(6) + gap + bar + gaps
    let fixed = 2 + 10 + 1 + 6 + 1 + BAR_WIDTH + 2;
    let name_width = width.saturating_sub(fixed).max(8);

    let (marker, name_style) = if !row.entry.exists {
        ("✗ ", theme.missing)
    } else if row.entry.is_symlink {
        ("→ ", theme.symlink)
    } else if row.stats.is_directory {
        ("▸ ", theme.directory)
    } else {
        ("  ", theme.file)
    };

    let name = pad_to_width(&truncate_to_width(&row.name, name_width), name_width);

    let filled = (share * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);

    let spans = vec![
        Span::styled(marker, name_style),
        Span::styled(name, name_style),
        Span::styled(size_text, Style::default().fg(theme.foreground)),
        Span::raw(" "),
        Span::styled(percent_text, Style::default().fg(theme.muted)),
        Span::raw(" "),
        Span::styled("█".repeat(filled), theme.bar_filled),
        Span::styled("░".repeat(BAR_WIDTH - filled), theme.bar_empty),
    ];
    let line = Line::from(spans);
    if selected {
        return line.style(theme.selected);
    }
    line
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Details ")
        .title_style(theme.title)
        .border_style(theme.border)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(row) = app.rows.get(app.selected) else {
        return;
    };

    let kind = if !row.entry.exists {
        "Missing"
    } else if row.entry.is_symlink {
        "Symlink"
    } else if row.entry.is_directory {
        "Directory"
    } else if row.entry.is_regular_file {
        "File"
    } else {
        "Special"
    };

    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.foreground);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name  ", label),
            Span::styled(row.name.to_string(), value),
        ]),
        Line::from(vec![Span::styled("Kind  ", label), Span::styled(kind, value)]),
        Line::from(vec![
            Span::styled("Size  ", label),
            Span::styled(
                format!("{} ({} B)", format_size(row.stats.size, BINARY), row.stats.size),
                value,
            ),
        ]),
    ];

    if row.stats.is_directory {
        lines.push(Line::from(vec![
            Span::styled("Items ", label),
            Span::styled(row.stats.count.to_string(), value),
        ]));
    }

    if let Some(modified) = row.entry.modified {
        let stamp: DateTime<Local> = modified.into();
        lines.push(Line::from(vec![
            Span::styled("Mod   ", label),
            Span::styled(stamp.format("%d-%b-%Y %H:%M:%S").to_string(), value),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Perm  ", label),
        Span::styled(row.entry.permissions.rwx_string(), value),
    ]));

    if row.entry.file_size.is_none() && row.entry.is_regular_file {
        lines.push(Line::from(Span::styled(
            "size unresolved",
            Style::default().fg(theme.warning),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let glyph = SPINNER_GLYPHS[app.spinner_frame() % SPINNER_GLYPHS.len()];

    let position = if app.rows.is_empty() {
        "0/0".to_string()
    } else {
        format!("{}/{}", app.selected + 1, app.rows.len())
    };

    let [left_area, gauge_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(34)]).areas(area);

    let left = Line::from(vec![
        Span::styled(format!(" {glyph} "), Style::default().fg(theme.info)),
        Span::styled(position, Style::default().fg(theme.foreground)),
        Span::styled(
            format!("  total {}", format_size(app.total_size, BINARY)),
            Style::default().fg(theme.muted),
        ),
        Span::styled("  ? help", Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(left), left_area);

    let gauge = Gauge::default()
        .gauge_style(theme.gauge)
        .ratio(app.space.used_ratio().clamp(0.0, 1.0))
        .label(format!(
            "{} free of {}",
            format_size(app.space.available, BINARY),
            format_size(app.space.capacity, BINARY),
        ));
    frame.render_widget(gauge, gauge_area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let popup = centered_rect(area, 44, 20);
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .title_style(theme.title)
        .border_style(theme.border)
        .padding(Padding::horizontal(1));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    for section in get_help_sections() {
        lines.push(Line::from(Span::styled(section.title, theme.title)));
        for binding in section.bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", binding.keys), theme.help_key),
                Span::styled(binding.description, theme.help_desc),
            ]));
        }
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_alert(frame: &mut Frame, app: &App, alert: &crate::alert::AlertState, area: Rect) {
    let theme = &app.theme;
    let color = match alert.kind {
        AlertKind::Info => theme.info,
        AlertKind::Warning => theme.warning,
        AlertKind::Error => theme.error,
    };

    let popup = centered_rect(area, 50, 9);
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(format!(" {}: {} ", alert.kind.label(), alert.header))
        .title_alignment(Alignment::Center)
        .title_style(theme.alert_title(color))
        .border_style(Style::default().fg(color))
        .padding(Padding::uniform(1));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [body_area, buttons_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let body = Paragraph::new(alert.body.as_str())
        .style(Style::default().fg(theme.foreground))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, body_area);

    let buttons = alert
        .buttons
        .labels()
        .iter()
        .map(|label| format!("[ {label} ]"))
        .collect::<Vec<_>>()
        .join("  ");
    let buttons = Paragraph::new(buttons)
        .style(theme.help_key)
        .alignment(Alignment::Center);
    frame.render_widget(buttons, buttons_area);
}

/// Fixed-size popup rectangle centered in `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad to an exact display width.
fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - current));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_preserves_short_text() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_cuts_with_ellipsis() {
        let cut = truncate_to_width("a-very-long-name.tar.gz", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 8);
    }

    #[test]
    fn test_truncate_handles_wide_glyphs() {
        let cut = truncate_to_width("日本語のファイル", 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_pad_reaches_exact_width() {
        assert_eq!(pad_to_width("ab", 5).width(), 5);
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_centered_rect_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect(area, 50, 50);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
