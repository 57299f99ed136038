//! Filtering, sorting and pagination for project listings.
//!
//! [`list`] is the reference implementation of the listing contract: a pure
//! function from a [`ListQuery`] and a candidate set to a [`Page`]. Storage
//! adapters that push the work down to a query language must produce the
//! same observable result, and should reuse [`ListCriteria`] and
//! [`PaginationMeta`] so normalisation and metadata derivation stay shared.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page served when the request does not name one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request omits `limit` or sends a non-positive one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Search text shorter than this (after trimming) is ignored entirely.
pub const MIN_SEARCH_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Sort key and direction
// ---------------------------------------------------------------------------

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    StartDate,
    EndDate,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::StartDate => "startDate",
            SortField::EndDate => "endDate",
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "startDate" | "start_date" => Ok(SortField::StartDate),
            "endDate" | "end_date" => Ok(SortField::EndDate),
            other => Err(CoreError::Validation(format!(
                "Invalid sortBy '{other}'. Valid values: name, startDate, endDate"
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(CoreError::Validation(format!(
                "Invalid sortOrder '{s}'. Valid values: asc, desc"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Query specification
// ---------------------------------------------------------------------------

/// A listing request as coerced from query parameters. Every field is
/// optional; [`ListQuery::criteria`] applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub only_favorites: Option<bool>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    /// The effective search text, or `None` when absent or too short.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| s.chars().count() >= MIN_SEARCH_LEN)
    }

    /// Normalise into fully-resolved criteria. Never fails.
    pub fn criteria(&self) -> ListCriteria {
        ListCriteria {
            search: self.search_term().map(str::to_string),
            favorites_only: self.only_favorites.unwrap_or(false),
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),
            window: PageWindow::new(self.page, self.limit),
        }
    }
}

/// Normalised listing criteria with all defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCriteria {
    /// Trimmed search text, at least [`MIN_SEARCH_LEN`] characters.
    pub search: Option<String>,
    pub favorites_only: bool,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub window: PageWindow,
}

/// The slice of the filtered, sorted set a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number, always >= 1.
    pub page: i64,
    /// Page size, always >= 1.
    pub limit: i64,
}

impl PageWindow {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = match limit {
            Some(l) if l >= 1 => l,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// Number of records skipped before this window starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Pagination metadata describing the filtered set, independent of the
/// records on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(window: PageWindow, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = if total == 0 {
            0
        } else {
            (total - 1) / window.limit + 1
        };
        Self {
            page: window.page,
            limit: window.limit,
            total,
            total_pages,
            has_next: window.page < total_pages,
            has_prev: window.page > 1,
        }
    }
}

/// One page of results plus pagination metadata.
///
/// Serializes as `{ "data": [...], "pagination": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self { data, pagination }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Case folding used for search matching. Stores that match outside Rust
/// must compare against text folded by this function.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Read access to the fields a listing filters and sorts on.
pub trait ListRecord {
    fn name(&self) -> &str;
    fn client(&self) -> &str;
    fn start_date(&self) -> NaiveDate;
    fn end_date(&self) -> NaiveDate;
    fn is_favorite(&self) -> bool;
}

impl ListCriteria {
    /// Whether a record survives the search and favorites filters.
    pub fn matches<R: ListRecord + ?Sized>(&self, record: &R) -> bool {
        if self.favorites_only && !record.is_favorite() {
            return false;
        }
        match &self.search {
            Some(term) => {
                let needle = fold_case(term);
                fold_case(record.name()).contains(&needle)
                    || fold_case(record.client()).contains(&needle)
            }
            None => true,
        }
    }

    /// Order two records by the requested key and direction.
    ///
    /// Names compare by code point, which for UTF-8 is byte order.
    pub fn compare<R: ListRecord + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        let ordering = match self.sort_by {
            SortField::Name => a.name().cmp(b.name()),
            SortField::StartDate => a.start_date().cmp(&b.start_date()),
            SortField::EndDate => a.end_date().cmp(&b.end_date()),
        };
        self.sort_order.apply(ordering)
    }
}

/// Filter, sort and paginate `records` according to `query`.
///
/// Ties on the sort key keep their order from `records`.
pub fn list<T: ListRecord + Clone>(query: &ListQuery, records: &[T]) -> Page<T> {
    let criteria = query.criteria();

    let mut filtered: Vec<&T> = records.iter().filter(|r| criteria.matches(*r)).collect();
    // `sort_by` is stable, which is what keeps tied records in place.
    filtered.sort_by(|a, b| criteria.compare(*a, *b));

    let total = i64::try_from(filtered.len()).unwrap_or(i64::MAX);
    let window = criteria.window;
    let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(window.limit).unwrap_or(usize::MAX);

    let data = filtered
        .into_iter()
        .skip(skip)
        .take(take)
        .cloned()
        .collect();

    Page::new(data, PaginationMeta::new(window, total))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
