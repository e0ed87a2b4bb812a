//! Wire types for the farm history endpoint.
//!
//! These types match the JSON produced by the backend's
//! `/farm-data/history` endpoint. Field names follow the wire format,
//! including the capitalized `pH`.

use serde::{Deserialize, Serialize};

/// Response body of `GET /farm-data/history?days=N`.
///
/// Entries arrive newest-first; the chart reverses them for chronological
/// left-to-right display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// One day's sensor-derived snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub crop_health: CropHealth,
    pub soil_condition: SoilCondition,
    pub pest_risk: PestRisk,
}

/// Crop health reading. `score` is conceptually 0-100 but is not validated;
/// out-of-range values clip on the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropHealth {
    pub status: String,
    pub score: f64,
}

/// Soil condition reading. `moisture` is a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilCondition {
    pub moisture: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub nutrients: String,
}

/// Pest risk reading. `probability` is conceptually 0-1, not validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestRisk {
    pub risk: String,
    pub probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_history() {
        let json = r#"{
            "history": [
                {
                    "date": "2025-08-06",
                    "crop_health": { "status": "Healthy", "score": 87 },
                    "soil_condition": { "moisture": 23.41, "pH": 6.8, "nutrients": "Medium" },
                    "pest_risk": { "risk": "Low", "probability": 0.12 }
                },
                {
                    "date": "2025-08-05",
                    "crop_health": { "status": "Stressed", "score": 44 },
                    "soil_condition": { "moisture": 31.05, "pH": 7.2, "nutrients": "High" },
                    "pest_risk": { "risk": "High", "probability": 0.81 }
                }
            ]
        }"#;

        let response: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.history.len(), 2);

        let latest = &response.history[0];
        assert_eq!(latest.date, "2025-08-06");
        assert_eq!(latest.crop_health.status, "Healthy");
        assert_eq!(latest.crop_health.score, 87.0);
        assert_eq!(latest.soil_condition.ph, 6.8);
        assert_eq!(latest.soil_condition.nutrients, "Medium");
        assert_eq!(latest.pest_risk.probability, 0.12);
    }

    #[test]
    fn test_ph_keeps_wire_capitalization() {
        let entry = HistoryEntry {
            date: "2025-08-06".to_string(),
            crop_health: CropHealth {
                status: "Healthy".to_string(),
                score: 90.0,
            },
            soil_condition: SoilCondition {
                moisture: 20.0,
                ph: 6.5,
                nutrients: "Low".to_string(),
            },
            pest_risk: PestRisk {
                risk: "Low".to_string(),
                probability: 0.1,
            },
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["soil_condition"].get("pH").is_some());
        assert!(json["soil_condition"].get("ph").is_none());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        // soil_condition.pH absent
        let json = r#"{
            "history": [
                {
                    "date": "2025-08-06",
                    "crop_health": { "status": "Healthy", "score": 87 },
                    "soil_condition": { "moisture": 23.41, "nutrients": "Medium" },
                    "pest_risk": { "risk": "Low", "probability": 0.12 }
                }
            ]
        }"#;

        assert!(serde_json::from_str::<HistoryResponse>(json).is_err());
    }
}
