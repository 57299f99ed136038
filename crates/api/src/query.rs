//! Query string coercion for the project listing.
//!
//! Every parameter arrives as text. Blank values mean "not given" except for
//! `onlyFavorites`, where a blank value is `false`.

use folio_core::error::CoreError;
use folio_core::listing::{ListQuery, SortField, SortOrder};
use serde::Deserialize;

/// Raw `GET /api/projects` query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub search: Option<String>,
    pub only_favorites: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProjectListParams {
    /// Coerce the raw strings into a [`ListQuery`].
    pub fn into_list_query(self) -> Result<ListQuery, CoreError> {
        let only_favorites = match self.only_favorites.as_deref() {
            None => None,
            Some(raw) => Some(parse_flag(raw).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid onlyFavorites '{raw}'. Valid values: true, false, 1, 0"
                ))
            })?),
        };

        Ok(ListQuery {
            search: self.search,
            only_favorites,
            sort_by: non_blank(self.sort_by.as_deref())
                .map(str::parse::<SortField>)
                .transpose()?,
            sort_order: non_blank(self.sort_order.as_deref())
                .map(str::parse::<SortOrder>)
                .transpose()?,
            page: parse_integer("page", self.page.as_deref())?,
            limit: parse_integer("limit", self.limit.as_deref())?,
        })
    }
}

/// Parse a boolean flag: `true`/`1` or `false`/`0`/empty, case-insensitive.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_integer(name: &str, raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    non_blank(raw)
        .map(|value| {
            value.parse::<i64>().map_err(|_| {
                CoreError::Validation(format!("{name} must be an integer, got '{value}'"))
            })
        })
        .transpose()
}
