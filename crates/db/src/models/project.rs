//! Project entity model and DTOs.

use chrono::NaiveDate;
use folio_core::listing::ListRecord;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Public path of the stored cover image, e.g. `/uploads/coverImage-<uuid>.png`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub is_favorite: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListRecord for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn client(&self) -> &str {
        &self.client
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }
}

/// DTO for creating a new project. Fields are expected to be validated and
/// trimmed already.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cover_image: Option<String>,
    /// Defaults to `false` if omitted.
    pub is_favorite: Option<bool>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub is_favorite: Option<bool>,
}
