//! Search history rules.
//!
//! Terms are recorded when a listing search is actually applied, so the
//! minimum length matches [`listing::MIN_SEARCH_LEN`](crate::listing::MIN_SEARCH_LEN).

use crate::listing::MIN_SEARCH_LEN;

/// Number of recent terms kept and returned.
pub const MAX_HISTORY_ITEMS: i64 = 5;

/// Longest term stored; longer input is cut at a character boundary.
pub const MAX_TERM_LEN: usize = 100;

/// Normalise a raw search string into a storable term.
///
/// Returns `None` when the trimmed text is too short to have filtered a
/// listing.
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_SEARCH_LEN {
        return None;
    }
    Some(trimmed.chars().take(MAX_TERM_LEN).collect())
}
