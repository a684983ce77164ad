use crate::{
    config::Config,
    errors::ApiError,
    ingest::{SkippedRow, parse_employees_file},
    store::EmployeeStore,
    utils::upload::stage_upload,
};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "Successfully uploaded 2 records.")]
    pub message: String,
    /// Rows left out of the batch, with the reason.
    pub skipped: Vec<SkippedRow>,
}

/// Multipart form accepted by `/upload_csv`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadCsvForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// List Employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "Every stored employee", body = [crate::model::employee::Employee]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Error fetching data"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn EmployeeStore>) -> Result<HttpResponse, ApiError> {
    let employees = store.list_all().await.map_err(|e| {
        error!(error = %e, "Failed to fetch employees");
        ApiError::Internal("Error fetching data".to_string())
    })?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Upload Employees CSV
///
/// Rows with an unparseable `Date of birth` (dd/mm/yyyy) or without `First Name`
/// or `Email` are left out. The remaining rows are inserted as one transaction.
#[utoipa::path(
    post,
    path = "/upload_csv",
    request_body(content = UploadCsvForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Batch committed", body = UploadResponse),
        (status = 400, description = "Missing columns or no file", body = Object, example = json!({
            "message": "CSV is missing required columns: Email"
        })),
        (status = 413, description = "File too large", body = Object),
        (status = 500, description = "Batch rejected by storage", body = Object, example = json!({
            "message": "Error uploading data: Duplicate entry 'jane@x.com' for key 'employees.uq_employees_email'"
        }))
    ),
    tag = "Employee"
)]
pub async fn upload_csv(
    store: web::Data<dyn EmployeeStore>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    // removed from disk when `staged` goes out of scope, on every path
    let staged = stage_upload(payload, &config.upload_dir, config.max_upload_bytes).await?;
    info!(filename = ?staged.filename, bytes = staged.size, "CSV upload received");

    let path = staged.path().to_path_buf();
    let report = web::block(move || parse_employees_file(&path))
        .await
        .map_err(|e| {
            error!(error = %e, "CSV parse task failed");
            ApiError::Internal(format!("Error uploading data: {}", e))
        })??;

    let inserted = store.insert_batch(&report.records).await.map_err(|e| {
        error!(error = %e, rows = report.records.len(), "Failed to insert employee batch");
        ApiError::Internal(format!("Error uploading data: {}", e))
    })?;

    info!(inserted, skipped = report.skipped.len(), "Employee batch committed");

    Ok(HttpResponse::Ok().json(UploadResponse {
        message: format!("Successfully uploaded {} records.", inserted),
        skipped: report.skipped,
    }))
}
