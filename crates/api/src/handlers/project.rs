//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::listing::Page;
use folio_core::project::{
    parse_date, validate_client, validate_date_range, validate_name, MISSING_FIELDS_MESSAGE,
};
use folio_core::record_store::RecordStore;
use folio_core::search_history::normalize_term;
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, UpdateProject};
use folio_db::repositories::{ProjectRepo, SearchHistoryRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ProjectForm;
use crate::query::ProjectListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// Trimmed text, or `None` when absent or blank.
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /api/projects
///
/// Filtered, sorted and paginated listing. A search term long enough to
/// filter is also recorded in the search history.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<Page<Project>>> {
    let query = params.into_list_query()?;
    let page = state.projects().list(&query).await?;

    if let Some(term) = query.search.as_deref().and_then(normalize_term) {
        if let Err(e) = SearchHistoryRepo::record(&state.pool, &term).await {
            tracing::warn!(error = %e, term = %term, "Failed to record search term");
        }
    }

    Ok(Json(page))
}

/// POST /api/projects
///
/// Accepts JSON or a multipart form with an optional `coverImage` file.
pub async fn create(
    State(state): State<AppState>,
    form: ProjectForm,
) -> AppResult<(StatusCode, Json<Project>)> {
    let ProjectForm {
        payload,
        cover_image,
    } = form;

    let (Some(name), Some(client), Some(start), Some(end)) = (
        required(payload.name),
        required(payload.client),
        required(payload.start_date),
        required(payload.end_date),
    ) else {
        return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.into()).into());
    };

    validate_name(&name)?;
    validate_client(&client)?;
    let start_date = parse_date("startDate", &start)?;
    let end_date = parse_date("endDate", &end)?;
    validate_date_range(start_date, end_date)?;

    let cover_image = match cover_image {
        Some(bytes) => Some(state.uploads.save_cover(&bytes).await?),
        None => None,
    };

    let input = CreateProject {
        name,
        client,
        start_date,
        end_date,
        cover_image,
        is_favorite: payload.is_favorite,
    };
    let project = match ProjectRepo::create(&state.pool, &input).await {
        Ok(project) => project,
        Err(e) => {
            if let Some(path) = &input.cover_image {
                state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
///
/// Partial update. Date order is checked against the stored dates for any
/// date not supplied. A new cover image replaces and deletes the old file.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: ProjectForm,
) -> AppResult<Json<Project>> {
    let ProjectForm {
        payload,
        cover_image,
    } = form;

    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let name = payload.name.map(|n| n.trim().to_string());
    if let Some(name) = &name {
        validate_name(name)?;
    }
    let client = payload.client.map(|c| c.trim().to_string());
    if let Some(client) = &client {
        validate_client(client)?;
    }
    let start_date = payload
        .start_date
        .as_deref()
        .map(|v| parse_date("startDate", v))
        .transpose()?;
    let end_date = payload
        .end_date
        .as_deref()
        .map(|v| parse_date("endDate", v))
        .transpose()?;
    validate_date_range(
        start_date.unwrap_or(existing.start_date),
        end_date.unwrap_or(existing.end_date),
    )?;

    let cover_image = match cover_image {
        Some(bytes) => Some(state.uploads.save_cover(&bytes).await?),
        None => None,
    };

    let input = UpdateProject {
        name,
        client,
        start_date,
        end_date,
        cover_image,
        is_favorite: payload.is_favorite,
    };
    let updated = match ProjectRepo::update(&state.pool, id, &input).await {
        Ok(Some(project)) => project,
        result => {
            if let Some(path) = &input.cover_image {
                state.uploads.remove(path).await;
            }
            return Err(match result {
                Err(e) => e.into(),
                Ok(_) => not_found(id),
            });
        }
    };

    if let (Some(_), Some(old)) = (&input.cover_image, &existing.cover_image) {
        if updated.cover_image.as_ref() != Some(old) {
            state.uploads.remove(old).await;
        }
    }

    tracing::info!(project_id = id, "Project updated");
    Ok(Json(updated))
}

/// PATCH /api/projects/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::toggle_favorite(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(project_id = id, is_favorite = project.is_favorite, "Project favorite toggled");
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let project = ProjectRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(path) = &project.cover_image {
        state.uploads.remove(path).await;
    }

    tracing::info!(project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
