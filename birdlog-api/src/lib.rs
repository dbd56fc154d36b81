//! birdlog-api library
//!
//! JSON endpoints for logging bird checklists against a SQLite store.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod validation;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Reference endpoints and `/health` are public; the rest take a
/// [`api::CurrentUser`] and answer 401 without one.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    let reference = Router::new()
        .route("/get_species", get(api::get_species))
        .route("/search_species", get(api::search_species));

    let personal = Router::new()
        .route("/get_checklists", get(api::get_checklists))
        .route("/get_my_checklists", get(api::get_my_checklists))
        .route("/submit_checklist", post(api::submit_checklist))
        .route("/edit_checklist/:id", post(api::edit_checklist))
        .route("/delete_checklist/:id", delete(api::delete_checklist))
        .route("/search_my_checklist", get(api::search_my_checklist))
        .route("/get_species_details", get(api::get_species_details));

    Router::new()
        .merge(reference)
        .merge(personal)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
