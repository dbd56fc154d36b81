//! Database models
//!
//! Records serialize with upper-case column names (`COMMON_NAME`,
//! `SAMPLING_EVENT_IDENTIFIER`, ...) and a lower-case `id`, the shape the
//! checklist front-end reads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Species {
    #[serde(rename = "id")]
    pub id: i64,
    pub common_name: String,
}

/// One species entry of a submitted checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Sighting {
    #[serde(rename = "id")]
    pub id: i64,
    #[serde(rename = "SAMPLING_EVENT_IDENTIFIER")]
    pub sampling_event_id: String,
    pub common_name: String,
    /// Free-form count; eBird uses "X" for present-but-uncounted
    pub observation_count: Option<String>,
}

/// Historical community checklist (seed data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Checklist {
    #[serde(rename = "id")]
    pub id: i64,
    #[serde(rename = "SAMPLING_EVENT_IDENTIFIER")]
    pub sampling_event_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub observation_date: Option<String>,
    #[serde(rename = "TIME_OBSERVATIONS_STARTED")]
    pub time_started: Option<String>,
    pub observer_id: Option<String>,
    pub duration_minutes: Option<f64>,
}

/// Checklist owned by a signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MyChecklist {
    #[serde(rename = "id")]
    pub id: i64,
    #[serde(rename = "SAMPLING_EVENT_IDENTIFIER")]
    pub sampling_event_id: String,
    pub common_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observation_date: String,
    #[serde(rename = "TIME_OBSERVATIONS_STARTED")]
    pub time_started: Option<String>,
    pub observer_id: Option<String>,
    pub duration_minutes: f64,
    pub observation_count: i64,
    pub user_email: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_wire_names() {
        let row = Checklist {
            id: 7,
            sampling_event_id: "S100".to_string(),
            latitude: Some(36.97),
            longitude: None,
            observation_date: Some("2024-05-01".to_string()),
            time_started: Some("07:15:00".to_string()),
            observer_id: Some("obsr1".to_string()),
            duration_minutes: Some(45.0),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["SAMPLING_EVENT_IDENTIFIER"], "S100");
        assert_eq!(json["TIME_OBSERVATIONS_STARTED"], "07:15:00");
        assert_eq!(json["OBSERVER_ID"], "obsr1");
        assert!(json["LONGITUDE"].is_null());
    }

    #[test]
    fn test_species_wire_names() {
        let json = serde_json::to_value(Species {
            id: 1,
            common_name: "American Robin".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "COMMON_NAME": "American Robin"}));
    }
}
