//! Multipart form assembly.

use reqwest::multipart::{Form, Part};

use aviary_domain::{ApiError, ApiResult, FormPart};

/// Builds a `reqwest` multipart form from domain form parts.
///
/// File parts without an explicit content type get one guessed from the
/// filename, falling back to `application/octet-stream`.
///
/// # Errors
/// Returns `ApiError::InvalidRequestShape` when an explicit content type
/// does not parse as a MIME type.
pub fn build_form(parts: Vec<FormPart>) -> ApiResult<Form> {
    let mut form = Form::new();

    for FormPart {
        name,
        filename,
        content_type,
        data,
    } in parts
    {
        let mut part = Part::bytes(data);
        if let Some(filename) = &filename {
            part = part.file_name(filename.clone());
        }
        let resolved = content_type.or_else(|| {
            filename
                .as_ref()
                .map(|f| mime_guess::from_path(f).first_or_octet_stream().to_string())
        });
        if let Some(mime) = resolved {
            part = part
                .mime_str(&mime)
                .map_err(|e| ApiError::InvalidRequestShape {
                    message: format!("invalid content type {mime:?}: {e}"),
                })?;
        }
        form = form.part(name, part);
    }

    Ok(form)
}
