//! Checklist request bodies
//!
//! Submission uses the add-checklist form's camelCase keys; editing uses the
//! upper-case column names the my-checklists page sends back.

use serde_json::Value;

use crate::validation::{FieldResult, Fields};

/// Validated checklist fields, shared by submit and edit
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistInput {
    pub common_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observation_date: String,
    pub time_started: Option<String>,
    pub duration_minutes: f64,
    pub observation_count: i64,
    pub observer_id: Option<String>,
}

/// One `species[]` entry of a submission
#[derive(Debug, Clone, PartialEq)]
pub struct SightingInput {
    pub common_name: String,
    pub observation_count: Option<String>,
}

/// A new checklist and its species entries
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub checklist: ChecklistInput,
    pub sightings: Vec<SightingInput>,
}

impl Submission {
    pub fn from_json(body: &Value) -> FieldResult<Self> {
        let fields = Fields::from_body(body)?;

        let checklist = ChecklistInput {
            common_name: fields.text("speciesName")?,
            latitude: fields.latitude("latitude")?,
            longitude: fields.longitude("longitude")?,
            observation_date: fields.date("observationDate")?,
            time_started: fields.optional_time("timeObservationsStarted")?,
            duration_minutes: fields.non_negative("durationMinutes")?,
            observation_count: fields.count("observationCount")?,
            observer_id: fields.optional_text("observerId")?,
        };

        let sightings = fields
            .objects("species")?
            .into_iter()
            .map(|entry| {
                Ok(SightingInput {
                    common_name: entry.text("COMMON_NAME")?,
                    observation_count: entry.optional_text("count")?,
                })
            })
            .collect::<FieldResult<Vec<_>>>()?;

        Ok(Self { checklist, sightings })
    }
}

impl ChecklistInput {
    /// Edit body; observer id is optional and cleared when absent
    pub fn from_edit_json(body: &Value) -> FieldResult<Self> {
        let fields = Fields::from_body(body)?;

        Ok(Self {
            common_name: fields.text("COMMON_NAME")?,
            latitude: fields.latitude("LATITUDE")?,
            longitude: fields.longitude("LONGITUDE")?,
            observation_date: fields.date("OBSERVATION_DATE")?,
            time_started: fields.optional_time("TIME_OBSERVATIONS_STARTED")?,
            duration_minutes: fields.non_negative("DURATION_MINUTES")?,
            observation_count: fields.count("OBSERVATION_COUNT")?,
            observer_id: fields.optional_text("OBSERVER_ID")?,
        })
    }
}
