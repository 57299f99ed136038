use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::search_history;
use crate::state::AppState;

/// Routes mounted at `/search-history`.
///
/// ```text
/// GET    /          -> list
/// DELETE /          -> clear
/// DELETE /{term}    -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_history::list).delete(search_history::clear))
        .route("/{term}", delete(search_history::remove))
}
