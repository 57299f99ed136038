//! PostgreSQL-backed [`RecordStore`] for projects.

use async_trait::async_trait;
use folio_core::listing::{ListQuery, Page};
use folio_core::record_store::RecordStore;

use crate::models::project::Project;
use crate::repositories::ProjectRepo;
use crate::DbPool;

/// Serves project listings by pushing the query down to PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Project> for PgProjectStore {
    type Error = sqlx::Error;

    async fn list(&self, query: &ListQuery) -> Result<Page<Project>, Self::Error> {
        ProjectRepo::list(&self.pool, query).await
    }
}
