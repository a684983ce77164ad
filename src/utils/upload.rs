use crate::errors::ApiError;
use actix_multipart::Multipart;
use actix_web::web;
use actix_web::web::Bytes;
use futures_util::TryStreamExt;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error};

/// Form field the CSV is expected under. Any part with a filename is also accepted.
pub const FILE_FIELD: &str = "file";

/// An uploaded file copied to disk. The file is deleted when this is dropped.
pub struct StagedUpload {
    file: NamedTempFile,
    pub filename: Option<String>,
    pub size: usize,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

fn io_failure(e: impl std::fmt::Display) -> ApiError {
    error!(error = %e, "Failed to stage upload");
    ApiError::Internal(format!("Error uploading data: {}", e))
}

/// Appends `chunk` on the blocking pool and hands the file back.
async fn append(mut file: NamedTempFile, chunk: Bytes) -> Result<NamedTempFile, ApiError> {
    web::block(move || {
        file.write_all(&chunk)?;
        file.flush()?;
        Ok::<_, std::io::Error>(file)
    })
    .await
    .map_err(io_failure)?
    .map_err(io_failure)
}

/// Streams the first file part of `payload` into a temp file under `dir`.
pub async fn stage_upload(
    mut payload: Multipart,
    dir: &Path,
    max_bytes: usize,
) -> Result<StagedUpload, ApiError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let disposition = field.content_disposition();
        let filename = disposition.get_filename().map(str::to_string);
        if filename.is_none() && disposition.get_name() != Some(FILE_FIELD) {
            debug!(field = ?disposition.get_name(), "Ignoring form field");
            continue;
        }

        let builder_dir = dir.to_path_buf();
        let mut file = web::block(move || {
            tempfile::Builder::new()
                .prefix("employees_upload_")
                .suffix(".csv")
                .tempfile_in(builder_dir)
        })
        .await
        .map_err(io_failure)?
        .map_err(io_failure)?;

        let mut size = 0usize;
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            size += chunk.len();
            if size > max_bytes {
                return Err(ApiError::PayloadTooLarge(format!(
                    "File exceeds the {} byte upload limit",
                    max_bytes
                )));
            }
            file = append(file, chunk).await?;
        }

        debug!(path = %file.path().display(), size, "Upload staged");
        return Ok(StagedUpload { file, filename, size });
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}
