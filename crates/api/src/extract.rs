//! Form extraction for generation endpoints.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use fluxgate_core::form::{FormFields, ImageBlob};

use crate::error::AppError;

/// Every part of a `multipart/form-data` (or url-encoded) body, drained into
/// a [`FormFields`].
///
/// Parts carrying a filename or a non-text content type are kept as binary
/// [`ImageBlob`]s; all other parts are read as text.
#[derive(Debug)]
pub struct GenerationForm(pub FormFields);

impl<S> FromRequest<S> for GenerationForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_urlencoded = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_urlencoded {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            let mut fields = FormFields::new();
            for (name, value) in pairs {
                fields.insert_text(name, value);
            }
            return Ok(GenerationForm(fields));
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        read_multipart(multipart).await.map(GenerationForm)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormFields, AppError> {
    let mut fields = FormFields::new();
    let mut parts = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue; // unnamed parts carry nothing addressable
        };
        parts += 1;

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        if is_binary_part(file_name.as_deref(), content_type.as_deref()) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let mut blob = ImageBlob::new(data.to_vec());
            blob.content_type = content_type;
            blob.file_name = file_name;
            fields.insert_file(name, blob);
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            fields.insert_text(name, text);
        }
    }

    tracing::debug!(parts, "Read generation form");
    Ok(fields)
}

/// A part is kept as raw bytes when it names a file or declares a non-text
/// content type. Only untyped or `text/*` parts are decoded as text.
fn is_binary_part(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    file_name.is_some() || content_type.is_some_and(|ct| !ct.starts_with("text/"))
}
