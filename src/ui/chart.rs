//! Trend chart rendering.
//!
//! Draws the three history series as lines on a shared canvas. Each series
//! keeps its own fixed axis range - health 0-100, moisture 0-50, pest
//! probability 0-1 - by scaling onto a unit Y axis, so a value outside its
//! range clips exactly as it would against a fixed-range axis.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;

/// Fixed axis range for crop health scores.
const HEALTH_RANGE: f64 = 100.0;
/// Fixed axis range for soil moisture (percent).
const MOISTURE_RANGE: f64 = 50.0;
/// Fixed axis range for pest probability.
const PEST_RANGE: f64 = 1.0;

/// Render the trend chart for the fetched history window.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(ref data) = app.data else {
        let paragraph = Paragraph::new("Loading...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Trends "));
        frame.render_widget(paragraph, area);
        return;
    };

    if data.series.is_empty() {
        let paragraph = Paragraph::new("No readings to chart")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Trends "));
        frame.render_widget(paragraph, area);
        return;
    }

    let series = &data.series;
    let health = scaled_points(&series.crop_health_scores, HEALTH_RANGE);
    let moisture = scaled_points(&series.soil_moisture, MOISTURE_RANGE);
    let pest = scaled_points(&series.pest_probabilities, PEST_RANGE);

    let datasets = vec![
        Dataset::default()
            .name("Health (0-100)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.crop_health))
            .data(&health),
        Dataset::default()
            .name("Moisture (0-50%)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.soil_moisture))
            .data(&moisture),
        Dataset::default()
            .name("Pest risk (0-1)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.pest_risk))
            .data(&pest),
    ];

    let axis_labels: Vec<Span> = x_labels(&series.labels)
        .into_iter()
        .map(Span::raw)
        .collect();

    let x_axis = Axis::default()
        .title("Day")
        .style(Style::default().fg(app.theme.border))
        .bounds([0.0, (series.len().saturating_sub(1)).max(1) as f64])
        .labels(axis_labels);

    let y_axis = Axis::default()
        .title("% of range")
        .style(Style::default().fg(app.theme.border))
        .bounds([0.0, 1.0])
        .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]);

    let title = format!(" Trends - last {} day(s) ", series.len());
    let chart = Chart::new(datasets)
        .block(block.title(title))
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Scale values onto the unit Y axis, keyed by position on the X axis.
///
/// Values above `range` map above 1.0 and are clipped by the axis bounds.
fn scaled_points(values: &[f64], range: f64) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v / range))
        .collect()
}

/// First, middle and last date of the window, for the X axis.
fn x_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_points_keep_fixed_ranges() {
        let points = scaled_points(&[0.0, 50.0, 100.0], HEALTH_RANGE);
        assert_eq!(points, vec![(0.0, 0.0), (1.0, 0.5), (2.0, 1.0)]);

        let points = scaled_points(&[25.0], MOISTURE_RANGE);
        assert_eq!(points, vec![(0.0, 0.5)]);

        // Out-of-range values scale past the axis and clip visually
        let points = scaled_points(&[120.0], HEALTH_RANGE);
        assert!(points[0].1 > 1.0);
    }

    #[test]
    fn test_x_labels_pick_first_middle_last() {
        let labels: Vec<String> = (1..=7).map(|d| format!("2025-08-0{}", d)).collect();
        assert_eq!(
            x_labels(&labels),
            vec!["2025-08-01", "2025-08-04", "2025-08-07"]
        );

        assert_eq!(x_labels(&labels[..1]), vec!["2025-08-01"]);
        assert!(x_labels(&[]).is_empty());
    }
}
