//! History table rendering.
//!
//! One row per received day, newest first, with flagged days highlighted.
//! This is the per-day inspection surface: every series value for the
//! selected day is visible on one row.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the History view showing all received days in a table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(ref data) = app.data else {
        let paragraph = Paragraph::new("Loading...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Daily readings "));
        frame.render_widget(paragraph, area);
        return;
    };

    if data.entries.is_empty() {
        let paragraph = Paragraph::new("No readings in this report")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Daily readings "));
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Health"),
        Cell::from("Score"),
        Cell::from("Moist%"),
        Cell::from("pH"),
        Cell::from("Nutrients"),
        Cell::from("Pest"),
        Cell::from("Prob"),
        Cell::from("!"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = data
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let flagged = data.is_issue_at(i);
            let marker = if flagged { "!" } else { "" };
            let row_style = if flagged {
                Style::default().fg(app.theme.alert)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(entry.date.clone()),
                Cell::from(entry.crop_health.status.clone()),
                Cell::from(format!("{:.0}", entry.crop_health.score)),
                Cell::from(format!("{:.1}", entry.soil_condition.moisture)),
                Cell::from(format!("{:.1}", entry.soil_condition.ph)),
                Cell::from(entry.soil_condition.nutrients.clone()),
                Cell::from(entry.pest_risk.risk.clone()),
                Cell::from(format!("{:.2}", entry.pest_risk.probability)),
                Cell::from(marker).style(app.theme.condition_style(flagged)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Fill(2),   // Date
        Constraint::Fill(1),   // Health
        Constraint::Length(6), // Score
        Constraint::Length(7), // Moisture
        Constraint::Length(5), // pH
        Constraint::Fill(1),   // Nutrients
        Constraint::Fill(1),   // Pest
        Constraint::Length(5), // Probability
        Constraint::Length(2), // Flag
    ];

    let selected = app.selected_day.min(data.entries.len().saturating_sub(1));
    let title = format!(
        " Daily readings ({}) [{}/{}] ",
        data.entries.len(),
        selected + 1,
        data.entries.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
