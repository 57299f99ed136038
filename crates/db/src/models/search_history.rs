//! Search history entries.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `search_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: DbId,
    pub term: String,
    pub created_at: Timestamp,
}
