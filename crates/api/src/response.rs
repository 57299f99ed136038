//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Listing responses carry their own `{ data, pagination }` shape via
/// [`folio_core::listing::Page`]; everything else that returns a collection
/// uses this wrapper.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
