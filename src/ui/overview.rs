//! Overview rendering.
//!
//! The at-a-glance page: three summary cards built from the most recent
//! entry, the trend chart, and the alert banner when any day is flagged.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Variant};
use crate::source::HistoryEntry;
use crate::ui::chart;

/// Card area stacks vertically below this width.
const NARROW_WIDTH: u16 = 90;
/// Height of one summary card.
const CARD_HEIGHT: u16 = 5;

/// Render the Overview: cards, chart, and the alert banner if present.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        let message = match app.variant {
            Variant::Document => "Raw document source - see the Raw view (4)",
            Variant::History { .. } => "Loading...",
        };
        render_placeholder(frame, app, area, message);
        return;
    };

    let Some(latest) = data.latest().cloned() else {
        render_placeholder(frame, app, area, "No readings in this report");
        return;
    };

    let alert = data.alert_message();

    // Layout mode is re-derived from the frame area every render, so a
    // resize reflows immediately.
    let narrow = area.width < NARROW_WIDTH;
    let cards_height = if narrow { CARD_HEIGHT * 3 } else { CARD_HEIGHT };

    let mut constraints = vec![
        Constraint::Length(cards_height),
        Constraint::Min(8), // Chart
    ];
    if alert.is_some() {
        constraints.push(Constraint::Length(3));
    }
    let chunks = Layout::vertical(constraints).split(area);

    render_cards(frame, app, chunks[0], &latest, narrow);
    chart::render(frame, app, chunks[1]);

    if let Some(message) = alert {
        render_alert(frame, app, chunks[2], &message);
    }
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect, message: &str) {
    let block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let paragraph = Paragraph::new(message)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(block);
    frame.render_widget(paragraph, area);
}

/// The three summary cards, side by side or stacked when narrow.
fn render_cards(frame: &mut Frame, app: &App, area: Rect, latest: &HistoryEntry, narrow: bool) {
    let chunks = if narrow {
        Layout::vertical([
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(CARD_HEIGHT),
        ])
        .split(area)
    } else {
        Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area)
    };

    let health_flagged = latest.crop_health.score < app.thresholds.poor_health;
    let health_style = app.theme.condition_style(health_flagged);
    let crop_lines = vec![
        Line::from(Span::styled(
            latest.crop_health.status.clone(),
            health_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(
                format!("{:.0}", latest.crop_health.score),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    render_card(frame, app, chunks[0], " Crop Health ", crop_lines, health_flagged);

    let soil_lines = vec![
        Line::from(Span::styled(
            latest.soil_condition.nutrients.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Moisture: {:.1}%", latest.soil_condition.moisture)),
        Line::from(format!("pH: {:.1}", latest.soil_condition.ph)),
    ];
    render_card(frame, app, chunks[1], " Soil Condition ", soil_lines, false);

    let pest_flagged = latest.pest_risk.probability > app.thresholds.high_pest;
    let pest_style = app.theme.condition_style(pest_flagged);
    let pest_lines = vec![
        Line::from(Span::styled(
            latest.pest_risk.risk.clone(),
            pest_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Probability: "),
            Span::styled(
                format!("{:.2}", latest.pest_risk.probability),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    render_card(frame, app, chunks[2], " Pest Risk ", pest_lines, pest_flagged);
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    lines: Vec<Line>,
    flagged: bool,
) {
    let border_style = if flagged {
        Style::default().fg(app.theme.alert)
    } else {
        Style::default().fg(app.theme.border)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The alert banner, shown only when at least one day is flagged.
fn render_alert(frame: &mut Frame, app: &App, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.alert));

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        format!("⚠ {}", message),
        Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD),
    )]))
    .centered()
    .block(block);

    frame.render_widget(paragraph, area);
}
