//! HTTP handler for image uploads.

use axum::extract::{Json, Multipart, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::UploadImageCommand;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// `POST /api/uploadImage` - returns `{ url, path }`.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request("file", format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request("file", format!("Malformed upload: {}", e)))?;

        let stored = state
            .upload_image_handler()
            .handle(UploadImageCommand {
                owner: user.id,
                content_type,
                bytes: bytes.to_vec(),
            })
            .await?;
        return Ok(Json(stored));
    }

    Err(ApiError::bad_request("file", "No file provided"))
}
