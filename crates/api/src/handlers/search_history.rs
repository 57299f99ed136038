//! Handlers for the `/search-history` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::search_history::MAX_HISTORY_ITEMS;
use folio_db::repositories::SearchHistoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/search-history
///
/// Most recent terms first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let entries = SearchHistoryRepo::list_recent(&state.pool, MAX_HISTORY_ITEMS).await?;
    let data: Vec<String> = entries.into_iter().map(|e| e.term).collect();
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/search-history
pub async fn clear(State(state): State<AppState>) -> AppResult<StatusCode> {
    let removed = SearchHistoryRepo::clear(&state.pool).await?;
    tracing::info!(removed, "Search history cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/search-history/{term}
pub async fn remove(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> AppResult<StatusCode> {
    if SearchHistoryRepo::remove(&state.pool, &term).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Search term '{term}' not found")))
    }
}
