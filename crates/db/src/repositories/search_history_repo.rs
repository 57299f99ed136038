//! Repository for the `search_history` table.

use folio_core::search_history::MAX_HISTORY_ITEMS;
use sqlx::PgPool;

use crate::models::search_history::SearchHistoryEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, term, created_at";

/// Provides operations on recently applied search terms.
pub struct SearchHistoryRepo;

impl SearchHistoryRepo {
    /// Record a term as the most recent search.
    ///
    /// A term already present (compared case-insensitively) is moved to the
    /// front with the new spelling. Entries beyond [`MAX_HISTORY_ITEMS`] are
    /// pruned in the same transaction.
    pub async fn record(pool: &PgPool, term: &str) -> Result<SearchHistoryEntry, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO search_history (term) VALUES ($1)
             ON CONFLICT ((lower(term)))
             DO UPDATE SET term = EXCLUDED.term, created_at = clock_timestamp()
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, SearchHistoryEntry>(&query)
            .bind(term)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM search_history WHERE id NOT IN (
                SELECT id FROM search_history ORDER BY created_at DESC, id DESC LIMIT $1
             )",
        )
        .bind(MAX_HISTORY_ITEMS)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Most recent entries first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<SearchHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM search_history ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, SearchHistoryEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Remove one term, compared case-insensitively. Returns `true` if a row
    /// was removed.
    pub async fn remove(pool: &PgPool, term: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM search_history WHERE lower(term) = lower($1)")
            .bind(term.trim())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every entry. Returns the number of rows removed.
    pub async fn clear(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM search_history")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
