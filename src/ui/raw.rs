//! Raw document rendering.
//!
//! Pretty-prints the fetched JSON body verbatim, 2-space indented.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the fetched document as scrollable pretty-printed JSON.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(text) = app.raw_pretty() else {
        let paragraph = Paragraph::new("Loading...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Raw document "));
        frame.render_widget(paragraph, area);
        return;
    };

    // Clamp the scroll offset so the last line stays on screen
    let line_count = text.lines().count() as u16;
    let visible = area.height.saturating_sub(2); // borders
    let max_scroll = line_count.saturating_sub(visible);
    if app.raw_scroll > max_scroll {
        app.raw_scroll = max_scroll;
    }

    let title = format!(" Raw document ({} lines) ", line_count);
    let paragraph = Paragraph::new(text)
        .scroll((app.raw_scroll, 0))
        .block(block.title(title));

    frame.render_widget(paragraph, area);
}
