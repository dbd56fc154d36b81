//! Species reference list and lookup

use axum::{
    extract::{Query, State},
    Json,
};
use birdlog_common::db::Species;
use serde::{Deserialize, Serialize};

use crate::db::SpeciesRepo;
use crate::error::QueryError;
use crate::AppState;

/// `?q=` query string shared by the search endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl SearchQuery {
    /// Trimmed, lower-cased needle; `None` when blank
    pub fn needle(&self) -> Option<String> {
        let q = self.q.trim();
        (!q.is_empty()).then(|| q.to_lowercase())
    }
}

#[derive(Debug, Serialize)]
pub struct SpeciesResponse {
    pub species: Vec<Species>,
}

/// GET /get_species
pub async fn get_species(State(state): State<AppState>) -> Result<Json<SpeciesResponse>, QueryError> {
    let species = SpeciesRepo::new(&state.db).list_all().await?;
    Ok(Json(SpeciesResponse { species }))
}

/// GET /search_species?q=
///
/// A blank query matches nothing.
pub async fn search_species(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SpeciesResponse>, QueryError> {
    let species = match query.needle() {
        Some(needle) => SpeciesRepo::new(&state.db).search(&needle).await?,
        None => Vec::new(),
    };
    Ok(Json(SpeciesResponse { species }))
}
