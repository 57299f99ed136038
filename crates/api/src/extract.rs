//! Request body extraction for project create and update.
//!
//! Both endpoints accept either a JSON body or a `multipart/form-data` form
//! whose `coverImage` part carries the uploaded file.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Json;
use folio_core::cover_image::{FIELD_NAME, FILE_TOO_LARGE_MESSAGE};
use folio_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppError;
use crate::query::parse_flag;

/// Project fields as submitted. Dates stay textual until validated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_favorite: Option<bool>,
}

/// A project form plus the optional cover image bytes.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub payload: ProjectPayload,
    pub cover_image: Option<Bytes>,
}

impl<S> FromRequest<S> for ProjectForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            read_multipart(multipart).await
        } else {
            let Json(payload) = Json::<ProjectPayload>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self {
                payload,
                cover_image: None,
            })
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ProjectForm, AppError> {
    let mut form = ProjectForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        if name == FIELD_NAME {
            let has_file_name = field.file_name().is_some_and(|f| !f.is_empty());
            let data = field.bytes().await.map_err(multipart_error)?;
            // Browsers submit an empty part when no file was chosen.
            if has_file_name || !data.is_empty() {
                form.cover_image = Some(data);
            }
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        let payload = &mut form.payload;
        match name.as_str() {
            "name" => payload.name = Some(text),
            "client" => payload.client = Some(text),
            "startDate" => payload.start_date = Some(text),
            "endDate" => payload.end_date = Some(text),
            "isFavorite" => {
                payload.is_favorite = Some(parse_flag(&text).ok_or_else(|| {
                    CoreError::Validation(format!("isFavorite must be true or false, got '{text}'"))
                })?);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::Validation(FILE_TOO_LARGE_MESSAGE.into()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}
