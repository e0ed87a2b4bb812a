//! Processed farm data and the issue predicate.

use crate::source::{HistoryEntry, HistoryResponse};

use super::series::TrendSeries;

/// Thresholds for flagging a day as an issue.
///
/// A day is an issue when its crop health score falls below `poor_health`
/// or its pest probability rises above `high_pest`. Both comparisons are
/// strict, so boundary values are not flagged.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Crop health score below which a day is flagged.
    pub poor_health: f64,
    /// Pest probability above which a day is flagged.
    pub high_pest: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            poor_health: 50.0,
            high_pest: 0.7,
        }
    }
}

impl Thresholds {
    /// The poor-health-or-high-pest-risk predicate.
    pub fn is_issue(&self, entry: &HistoryEntry) -> bool {
        entry.crop_health.score < self.poor_health
            || entry.pest_risk.probability > self.high_pest
    }
}

/// Complete processed farm data ready for display.
///
/// `entries` keeps the wire order (newest-first); `issues` holds the
/// indices of flagged entries in that same order, with no dedup and no
/// reordering.
#[derive(Debug, Clone)]
pub struct FarmData {
    pub entries: Vec<HistoryEntry>,
    pub series: TrendSeries,
    pub issues: Vec<usize>,
}

impl FarmData {
    /// Convert a decoded history response into display-ready data.
    pub fn from_response(response: HistoryResponse, thresholds: &Thresholds) -> Self {
        let entries = response.history;
        let series = TrendSeries::from_entries(&entries);
        let issues = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| thresholds.is_issue(e))
            .map(|(i, _)| i)
            .collect();

        Self {
            entries,
            series,
            issues,
        }
    }

    /// The most recent entry, used for the summary cards.
    ///
    /// `None` when the backend returned an empty history; callers render a
    /// placeholder in that case.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Whether the entry at `index` (wire order) is flagged.
    pub fn is_issue_at(&self, index: usize) -> bool {
        self.issues.contains(&index)
    }

    /// The flagged entries, in wire order.
    pub fn issue_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.issues.iter().map(|&i| &self.entries[i])
    }

    /// Alert banner text, present only when at least one day is flagged.
    pub fn alert_message(&self) -> Option<String> {
        if self.issues.is_empty() {
            return None;
        }
        Some(format!(
            "Alert: {} day(s) with poor crop health or high pest risk detected!",
            self.issues.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CropHealth, PestRisk, SoilCondition};

    fn entry(date: &str, score: f64, probability: f64) -> HistoryEntry {
        HistoryEntry {
            date: date.to_string(),
            crop_health: CropHealth {
                status: "Healthy".to_string(),
                score,
            },
            soil_condition: SoilCondition {
                moisture: 22.0,
                ph: 6.8,
                nutrients: "Medium".to_string(),
            },
            pest_risk: PestRisk {
                risk: "Low".to_string(),
                probability,
            },
        }
    }

    fn data(entries: Vec<HistoryEntry>) -> FarmData {
        FarmData::from_response(
            HistoryResponse { history: entries },
            &Thresholds::default(),
        )
    }

    #[test]
    fn test_issue_filter_keeps_input_order() {
        // Scores {90, 40, 60}, probabilities {0.1, 0.2, 0.9}: the second
        // entry fails on health, the third on pest risk.
        let farm = data(vec![
            entry("2025-08-06", 90.0, 0.1),
            entry("2025-08-05", 40.0, 0.2),
            entry("2025-08-04", 60.0, 0.9),
        ]);

        assert_eq!(farm.issues, vec![1, 2]);
        let flagged: Vec<&str> = farm.issue_entries().map(|e| e.date.as_str()).collect();
        assert_eq!(flagged, vec!["2025-08-05", "2025-08-04"]);
    }

    #[test]
    fn test_boundary_values_are_not_issues() {
        let farm = data(vec![entry("2025-08-06", 50.0, 0.7)]);
        assert!(farm.issues.is_empty());
        assert!(farm.alert_message().is_none());
    }

    #[test]
    fn test_alert_message_contains_count() {
        let farm = data(vec![
            entry("2025-08-06", 30.0, 0.1),
            entry("2025-08-05", 45.0, 0.9),
        ]);

        let message = farm.alert_message().unwrap();
        assert!(message.contains('2'));
        assert_eq!(
            message,
            "Alert: 2 day(s) with poor crop health or high pest risk detected!"
        );
    }

    #[test]
    fn test_no_alert_without_issues() {
        let farm = data(vec![entry("2025-08-06", 90.0, 0.1)]);
        assert!(farm.alert_message().is_none());
    }

    #[test]
    fn test_latest_is_first_wire_entry() {
        let farm = data(vec![
            entry("2025-08-06", 90.0, 0.1),
            entry("2025-08-05", 40.0, 0.2),
        ]);

        assert_eq!(farm.latest().unwrap().date, "2025-08-06");
    }

    #[test]
    fn test_empty_history() {
        let farm = data(Vec::new());

        assert!(farm.latest().is_none());
        assert!(farm.series.is_empty());
        assert!(farm.issues.is_empty());
        assert!(farm.alert_message().is_none());
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            poor_health: 70.0,
            high_pest: 0.5,
        };
        let farm = FarmData::from_response(
            HistoryResponse {
                history: vec![entry("2025-08-06", 65.0, 0.1), entry("2025-08-05", 80.0, 0.6)],
            },
            &thresholds,
        );

        assert_eq!(farm.issues, vec![0, 1]);
    }
}
