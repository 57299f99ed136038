use std::sync::Arc;

use folio_db::store::PgProjectStore;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cover image storage.
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(pool: folio_db::DbPool, config: ServerConfig) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone(), config.max_upload_bytes);
        Self {
            pool,
            config: Arc::new(config),
            uploads,
        }
    }

    /// Listing store backed by the pool.
    pub fn projects(&self) -> PgProjectStore {
        PgProjectStore::new(self.pool.clone())
    }
}
