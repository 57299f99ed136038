pub mod health;
pub mod project;
pub mod search_history;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects            project CRUD, listing, favorites
/// /search-history      recent search terms
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/search-history", search_history::router())
}
