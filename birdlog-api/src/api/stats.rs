//! Per-species observation summary

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::CurrentUser;
use crate::db::{MyChecklistRepo, Observation};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    #[serde(default)]
    pub common_name: String,
}

/// Where, when and how many of one species the user has logged
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesDetails {
    /// Distinct dates, ascending
    pub dates_observed: Vec<String>,
    /// Sum of counts across all checklists
    pub times_observed: i64,
    /// Date -> summed count
    pub counts: BTreeMap<String, i64>,
    /// One `[lat, lon]` per checklist, duplicates kept
    pub locations: Vec<(f64, f64)>,
}

/// Fold observation rows into a summary in one pass
pub fn summarize(observations: &[Observation]) -> SpeciesDetails {
    let mut details = SpeciesDetails::default();

    // The schema does not bound stored counts
    for obs in observations {
        let count = obs.observation_count.max(0);
        let day = details.counts.entry(obs.observation_date.clone()).or_insert(0);
        *day = day.saturating_add(count);
        details.times_observed = details.times_observed.saturating_add(count);
        details.locations.push((obs.latitude, obs.longitude));
    }

    details.dates_observed = details.counts.keys().cloned().collect();
    details
}

/// GET /get_species_details?common_name=
pub async fn get_species_details(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DetailsQuery>,
) -> ApiResult<Json<SpeciesDetails>> {
    let name = query.common_name.trim();
    if name.is_empty() {
        return Ok(Json(SpeciesDetails::default()));
    }

    let observations = MyChecklistRepo::new(&state.db)
        .observations_of(user.email(), name)
        .await?;

    Ok(Json(summarize(&observations)))
}
