//! Checklist listing and mutation
//!
//! Mutations answer `{status: "success", ...}` or an [`ApiError`]. Every
//! per-user lookup is scoped to the caller, so another user's checklist id
//! yields the same 404 as an unknown one.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    Json,
};
use birdlog_common::db::{Checklist, MyChecklist};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::CurrentUser;
use crate::db::{MyChecklistRepo, ReferenceChecklistRepo};
use crate::error::{ApiError, ApiResult};
use crate::forms::{ChecklistInput, Submission};
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::validation::ValidationError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct ChecklistPage {
    pub checklists: Vec<Checklist>,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_rows: i64,
}

#[derive(Debug, Serialize)]
pub struct MyChecklistsResponse {
    pub checklists: Vec<MyChecklist>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: &'static str,
    pub id: i64,
    pub sampling_event_id: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusResponse {
    fn success(message: &'static str) -> Json<Self> {
        Json(Self {
            status: "success",
            message,
        })
    }
}

/// GET /get_checklists?page=
///
/// Community checklists, 100 per page. Out-of-range pages are clamped.
pub async fn get_checklists(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ChecklistPage>> {
    let repo = ReferenceChecklistRepo::new(&state.db);

    let total_rows = repo.count().await?;
    let pagination = calculate_pagination(total_rows, query.page);
    let checklists = repo.page(PAGE_SIZE, pagination.offset).await?;

    Ok(Json(ChecklistPage {
        checklists,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
        total_rows,
    }))
}

/// GET /get_my_checklists
pub async fn get_my_checklists(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<MyChecklistsResponse>> {
    let checklists = MyChecklistRepo::new(&state.db)
        .list_for_user(user.email())
        .await?;
    Ok(Json(MyChecklistsResponse { checklists }))
}

/// POST /submit_checklist
pub async fn submit_checklist(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let Json(body) = body.map_err(malformed_body)?;
    let submission = Submission::from_json(&body).map_err(|e| rejected("submit", e))?;

    let created = MyChecklistRepo::new(&state.db)
        .submit(user.email(), &submission)
        .await?;

    info!(
        "Checklist {} submitted by {} ({} species)",
        created.id,
        user.email(),
        submission.sightings.len()
    );

    Ok(Json(SubmitResponse {
        status: "success",
        id: created.id,
        sampling_event_id: created.sampling_event_id,
    }))
}

/// POST /edit_checklist/:id
pub async fn edit_checklist(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let repo = MyChecklistRepo::new(&state.db);

    // Unknown ids are reported before the body is looked at
    if repo.get(user.email(), id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let Json(body) = body.map_err(malformed_body)?;
    let input = ChecklistInput::from_edit_json(&body).map_err(|e| rejected("edit", e))?;

    if !repo.update(user.email(), id, &input).await? {
        return Err(ApiError::NotFound);
    }

    info!("Checklist {} updated by {}", id, user.email());
    Ok(StatusResponse::success("Checklist updated successfully"))
}

/// DELETE /delete_checklist/:id
pub async fn delete_checklist(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    if !MyChecklistRepo::new(&state.db).delete(user.email(), id).await? {
        return Err(ApiError::NotFound);
    }

    info!("Checklist {} deleted by {}", id, user.email());
    Ok(StatusResponse::success("Checklist deleted successfully"))
}

fn malformed_body(rejection: JsonRejection) -> ApiError {
    warn!("Malformed request body: {}", rejection.body_text());
    ApiError::Validation(ValidationError::new("body", "must be a JSON object"))
}

fn rejected(action: &str, error: ValidationError) -> ApiError {
    warn!("Rejected checklist {}: {}", action, error);
    ApiError::Validation(error)
}
