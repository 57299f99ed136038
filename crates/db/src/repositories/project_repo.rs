//! Repository for the `projects` table.

use folio_core::listing::{
    fold_case, ListCriteria, ListQuery, Page, PaginationMeta, SortField, SortOrder,
};
use folio_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, client, start_date, end_date, cover_image, is_favorite, created_at, updated_at";

/// Provides CRUD and listing operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `is_favorite` is `None` in the input, defaults to `false`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, client, start_date, end_date, cover_image, is_favorite,
                 name_folded, client_folded)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.client)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.cover_image)
            .bind(input.is_favorite)
            .bind(fold_case(&input.name))
            .bind(fold_case(&input.client))
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every project in ascending `id` order, the candidate order listings
    /// break ties with.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id ASC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Filter, sort and paginate projects inside PostgreSQL.
    ///
    /// Produces the same page as [`folio_core::listing::list`] over
    /// [`ProjectRepo::list_all`]: literal substring search over the
    /// [`fold_case`]d columns, byte-wise name ordering, ties broken by
    /// ascending `id`. Matching is independent of the cluster's locale.
    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Project>, sqlx::Error> {
        let criteria = query.criteria();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects");
        push_filters(&mut count, &criteria);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM projects"));
        push_filters(&mut select, &criteria);
        select
            .push(" ORDER BY ")
            .push(order_by(criteria.sort_by, criteria.sort_order))
            .push(" LIMIT ")
            .push_bind(criteria.window.limit)
            .push(" OFFSET ")
            .push_bind(criteria.window.offset());
        let data = select.build_query_as::<Project>().fetch_all(pool).await?;

        Ok(Page::new(data, PaginationMeta::new(criteria.window, total)))
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                client = COALESCE($3, client),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                cover_image = COALESCE($6, cover_image),
                is_favorite = COALESCE($7, is_favorite),
                name_folded = COALESCE($8, name_folded),
                client_folded = COALESCE($9, client_folded)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.client)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.cover_image)
            .bind(input.is_favorite)
            .bind(input.name.as_deref().map(fold_case))
            .bind(input.client.as_deref().map(fold_case))
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_favorite` in a single statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn toggle_favorite(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET is_favorite = NOT is_favorite WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("DELETE FROM projects WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of projects.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }
}

/// Append the `WHERE` clause for the search and favorites filters.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, criteria: &ListCriteria) {
    qb.push(" WHERE TRUE");
    if let Some(term) = &criteria.search {
        let pattern = contains_pattern(&fold_case(term));
        qb.push(" AND (name_folded LIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR client_folded LIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }
    if criteria.favorites_only {
        qb.push(" AND is_favorite");
    }
}

/// Build a `LIKE` pattern matching `term` literally anywhere in the value.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `ORDER BY` body for a sort key and direction. Ties fall back to `id ASC`
/// in both directions.
fn order_by(sort_by: SortField, sort_order: SortOrder) -> String {
    let column = match sort_by {
        SortField::Name => r#"name COLLATE "C""#,
        SortField::StartDate => "start_date",
        SortField::EndDate => "end_date",
    };
    let direction = match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!("{column} {direction}, id ASC")
}
