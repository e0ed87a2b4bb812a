//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Variant, View};

/// Render the header bar with the overall condition summary.
///
/// Displays: condition indicator, day count, latest date, issue count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let note = match app.variant {
            Variant::Document if app.document.is_some() => "| Raw document",
            _ => "| Loading...",
        };
        let line = Line::from(vec![
            Span::styled(
                " FARMWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(note),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let issues = data.issues.len();
    let days = data.entries.len();

    // Overall condition indicator
    let status_style = app.theme.condition_style(issues > 0);

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("FARMWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", days),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" day(s) │ "),
    ];

    if let Some(latest) = data.latest() {
        spans.push(Span::raw(format!("latest {} │ ", latest.date)));
    }

    if issues > 0 {
        spans.push(Span::styled(
            format!("{}", issues),
            Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled("0", Style::default().add_modifier(Modifier::DIM)));
    }
    spans.push(Span::raw(" issue(s)"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(" 2:Trends "),
        Line::from(" 3:History "),
        Line::from(" 4:Raw "),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Trends => 1,
        View::History => 2,
        View::Raw => 3,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last fetch, available controls. Retained
/// fetch diagnostics surface here while the content views stay on their
/// loading placeholder.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::History => "↑↓:select Tab:switch r:refresh ?:help q:quit",
        View::Raw => "↑↓:scroll Tab:switch r:refresh ?:help q:quit",
        _ => "Tab:switch r:refresh ?:help q:quit",
    };

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else if let Some(fetched_at) = app.fetched_at {
        format!(
            " {} | Updated {:.1}s ago | {}",
            app.source_description(),
            fetched_at.elapsed().as_secs_f64(),
            controls,
        )
    } else {
        format!(" {} | Loading... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1-4         Jump to a view"),
        Line::from("  ↑/↓ j/k     Select day / scroll"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Back to Overview"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Fetch a fresh report"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 19u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
