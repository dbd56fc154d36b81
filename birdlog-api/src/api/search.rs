//! Species names in the user's own checklists

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::api::{species::SearchQuery, CurrentUser};
use crate::db::MyChecklistRepo;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct SpeciesName {
    #[serde(rename = "COMMON_NAME")]
    pub common_name: String,
}

#[derive(Debug, Serialize)]
pub struct SpeciesNamesResponse {
    pub species: Vec<SpeciesName>,
}

/// GET /search_my_checklist?q=
///
/// Unlike `/search_species`, a blank query lists every species the user has
/// recorded.
pub async fn search_my_checklist(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SpeciesNamesResponse>> {
    let needle = query.needle();
    let names = MyChecklistRepo::new(&state.db)
        .distinct_names(user.email(), needle.as_deref())
        .await?;

    Ok(Json(SpeciesNamesResponse {
        species: names
            .into_iter()
            .map(|common_name| SpeciesName { common_name })
            .collect(),
    }))
}
