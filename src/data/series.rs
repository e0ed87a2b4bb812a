//! Chart series derivation.

use crate::source::HistoryEntry;

/// Parallel, chronologically ordered sequences for the trend chart.
///
/// The backend delivers history newest-first; each sequence here is
/// independently reversed to oldest-first so the chart reads left to right.
/// All four sequences always have the same length as the input history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    /// Dates, oldest-first.
    pub labels: Vec<String>,
    pub crop_health_scores: Vec<f64>,
    pub soil_moisture: Vec<f64>,
    pub pest_probabilities: Vec<f64>,
}

impl TrendSeries {
    /// Derive the chart series from history entries in wire order.
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let labels = entries.iter().map(|e| e.date.clone()).rev().collect();
        let crop_health_scores = entries.iter().map(|e| e.crop_health.score).rev().collect();
        let soil_moisture = entries.iter().map(|e| e.soil_condition.moisture).rev().collect();
        let pest_probabilities = entries.iter().map(|e| e.pest_risk.probability).rev().collect();

        Self {
            labels,
            crop_health_scores,
            soil_moisture,
            pest_probabilities,
        }
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CropHealth, PestRisk, SoilCondition};

    fn entry(date: &str, score: f64, moisture: f64, probability: f64) -> HistoryEntry {
        HistoryEntry {
            date: date.to_string(),
            crop_health: CropHealth {
                status: "Healthy".to_string(),
                score,
            },
            soil_condition: SoilCondition {
                moisture,
                ph: 6.5,
                nutrients: "Medium".to_string(),
            },
            pest_risk: PestRisk {
                risk: "Low".to_string(),
                probability,
            },
        }
    }

    #[test]
    fn test_series_reverses_to_oldest_first() {
        // Wire order: newest first
        let entries = vec![
            entry("2025-08-06", 90.0, 20.0, 0.1),
            entry("2025-08-05", 40.0, 25.0, 0.2),
            entry("2025-08-04", 60.0, 30.0, 0.9),
        ];

        let series = TrendSeries::from_entries(&entries);

        assert_eq!(series.labels, vec!["2025-08-04", "2025-08-05", "2025-08-06"]);
        assert_eq!(series.crop_health_scores, vec![60.0, 40.0, 90.0]);
        assert_eq!(series.soil_moisture, vec![30.0, 25.0, 20.0]);
        assert_eq!(series.pest_probabilities, vec![0.9, 0.2, 0.1]);
    }

    #[test]
    fn test_series_lengths_match_input() {
        let entries: Vec<HistoryEntry> = (0..7)
            .map(|i| entry(&format!("2025-08-0{}", i + 1), 50.0 + i as f64, 20.0, 0.3))
            .collect();

        let series = TrendSeries::from_entries(&entries);

        assert_eq!(series.len(), entries.len());
        assert_eq!(series.labels.len(), 7);
        assert_eq!(series.crop_health_scores.len(), 7);
        assert_eq!(series.soil_moisture.len(), 7);
        assert_eq!(series.pest_probabilities.len(), 7);
    }

    #[test]
    fn test_empty_history_yields_empty_series() {
        let series = TrendSeries::from_entries(&[]);

        assert!(series.is_empty());
        assert!(series.labels.is_empty());
        assert!(series.crop_health_scores.is_empty());
        assert!(series.soil_moisture.is_empty());
        assert!(series.pest_probabilities.is_empty());
    }
}
