use axum::{extract::State, response::Json};
use axum_extra::extract::Multipart;
use serde::Serialize;
use std::path::Path as StdPath;
use tokio::fs;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

/// Saves the uploaded image and runs OCR over it, returning the
/// recognized lines joined with newlines in engine order.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>> {
    let mut image_data = None;
    let mut file_name = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let name = field.file_name().unwrap_or("").to_string();
        if name.is_empty() {
            return Err(AppError::MissingFilename);
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(e.to_string()))?;
        file_name = Some(name);
        image_data = Some(data);
    }

    let image_data = image_data.ok_or(AppError::NoFileUploaded)?;
    let file_name = file_name.ok_or(AppError::MissingFilename)?;

    let ocr_service = state
        .ocr_service
        .as_ref()
        .ok_or_else(|| AppError::OcrUnavailable("OCR engine not initialized".to_string()))?;

    fs::create_dir_all(&state.upload_dir).await.map_err(AppError::Io)?;

    // Stored under a generated name so concurrent uploads with the same
    // filename cannot clobber each other.
    let stored_name = stored_file_name(&file_name);
    let file_path = format!("{}/{}", state.upload_dir, stored_name);
    fs::write(&file_path, &image_data).await.map_err(AppError::Io)?;

    tracing::info!(original = %file_name, stored = %file_path, "Image saved for OCR");

    let lines = ocr_service.extract_lines(&image_data).await?;

    Ok(Json(ExtractTextResponse {
        text: lines.join("\n"),
    }))
}

fn stored_file_name(original: &str) -> String {
    let sanitized = sanitize_filename::sanitize(original);
    let extension = StdPath::new(&sanitized)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin")
        .to_lowercase();
    format!("{}.{}", Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_extension_only() {
        let name = stored_file_name("prescription.PNG");
        assert!(name.ends_with(".png"));
        assert!(!name.contains("prescription"));
    }

    #[test]
    fn stored_name_survives_path_traversal_attempts() {
        let name = stored_file_name("../../etc/passwd.jpg");
        assert!(!name.contains(".."));
        assert!(!name.contains('/'));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn extension_defaults_when_absent() {
        let name = stored_file_name("scan");
        assert!(name.ends_with(".bin"));
    }
}
