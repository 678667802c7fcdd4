//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! analysis pipeline or the persistence service layer.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use base64::Engine;

use super::dto::{
    AnalyzeResponse, BatchAnalyzeResponse, CameraDto, CameraListResponse, CameraResponse,
    CreateCameraRequest, CreateReportRequest, DashboardSummaryResponse, HealthResponse,
    MessageResponse, ReportDto, ReportImageResponse, ReportListQuery, ReportListResponse,
    ReportQuery, ReportResponse, StatisticsUpdateResponse, UpdateCameraRequest,
    UpdateReportRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    CameraId, CameraStatus, CameraUpdate, NewCamera, NewReport, Priority, ReportFilter, ReportId,
    ReportStatus, ReportUpdate, Statistics,
};
use crate::db::services as db_services;
use crate::services::analyzer::{run_analysis, run_batch_analysis};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Location recorded when the client does not send one.
const DEFAULT_LOCATION: &str = "Nairobi";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        service: "WasteSpotter AI API".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Analysis
// =============================================================================

/// POST /api/analyze
///
/// Analyze one uploaded image. Expects multipart form data with an `image`
/// file and an optional `location` text field.
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HandlerResult<AnalyzeResponse> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut location: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().unwrap_or("upload.jpg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read image field: {}", e)))?;
                image = Some((filename, bytes.to_vec()));
            }
            Some("location") => {
                location = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read location field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        image.ok_or_else(|| AppError::BadRequest("No image file provided".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }

    state
        .storage
        .save_upload(&bytes, file_extension(&filename))
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    let location = location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let outcome =
        run_analysis(&state.analyzer, state.repository.as_ref(), &bytes, &location).await?;

    Ok(Json(AnalyzeResponse::from_outcome(&outcome)))
}

/// POST /api/batch-analyze
///
/// Analyze multiple uploaded images. Expects multipart form data with
/// repeated `images` file fields. Per-image failures are skipped.
pub async fn batch_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HandlerResult<BatchAnalyzeResponse> {
    let mut images: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("images") {
            continue;
        }
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read image field: {}", e)))?;
        if bytes.is_empty() {
            continue;
        }

        if let Err(e) = state.storage.save_upload(&bytes, file_extension(&filename)) {
            return Err(AppError::Internal(format!("Failed to store upload: {}", e)));
        }
        images.push((filename, bytes.to_vec()));
    }

    if images.is_empty() {
        return Err(AppError::BadRequest("No images provided".to_string()));
    }

    let batch = run_batch_analysis(&state.analyzer, state.repository.as_ref(), images).await;
    Ok(Json(BatchAnalyzeResponse::from_outcome(&batch)))
}

// =============================================================================
// Reports
// =============================================================================

/// POST /api/reports
///
/// Create a report directly (e.g. from the manual reporting form).
pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    if request.location.trim().is_empty() {
        return Err(AppError::BadRequest("Location is required".to_string()));
    }

    let (image_data, image_name) = match request.image {
        Some(ref encoded) if !encoded.is_empty() => {
            let data = decode_base64_image(encoded)
                .map_err(|e| AppError::BadRequest(format!("Invalid image data: {}", e)))?;
            let name = request.image_name.clone().unwrap_or_else(|| {
                format!("report_{}.jpg", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
            });
            (Some(data), Some(name))
        }
        _ => (None, None),
    };

    let new_report = NewReport {
        location: request.location,
        priority: request.priority.unwrap_or(Priority::Medium),
        status: request.status.unwrap_or(ReportStatus::Pending),
        ai_confidence: request.ai_confidence.unwrap_or(0),
        image_data,
        image_name,
    };

    let report = db_services::create_report(state.repository.as_ref(), &new_report).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            message: "Report created successfully".to_string(),
            report: ReportDto::from_report(&report, None),
        }),
    ))
}

/// GET /api/reports
///
/// List reports with optional status/priority filters, most recent first.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
) -> HandlerResult<ReportListResponse> {
    let filter = ReportFilter {
        status: query.status,
        priority: query.priority,
        limit: query.limit,
    };

    let reports = db_services::list_reports(state.repository.as_ref(), &filter).await?;
    let reports: Vec<ReportDto> = reports
        .iter()
        .map(|r| ReportDto::from_report(r, None))
        .collect();

    Ok(Json(ReportListResponse {
        count: reports.len(),
        reports,
    }))
}

/// GET /api/reports/{report_id}
///
/// Fetch one report; `include_image=true` inlines the base64 image payload.
pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> HandlerResult<ReportDto> {
    let report =
        db_services::get_report(state.repository.as_ref(), ReportId::new(report_id)).await?;

    let image = if query.include_image.unwrap_or(false) {
        report
            .image_data
            .as_ref()
            .map(|data| base64::engine::general_purpose::STANDARD.encode(data))
    } else {
        None
    };

    Ok(Json(ReportDto::from_report(&report, image)))
}

/// PUT /api/reports/{report_id}
///
/// Update report details.
pub async fn update_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
    Json(request): Json<UpdateReportRequest>,
) -> HandlerResult<ReportResponse> {
    let changes = ReportUpdate {
        location: request.location,
        priority: request.priority,
        status: request.status,
        ai_confidence: request.ai_confidence,
    };

    let report =
        db_services::update_report(state.repository.as_ref(), ReportId::new(report_id), &changes)
            .await?;

    Ok(Json(ReportResponse {
        message: "Report updated successfully".to_string(),
        report: ReportDto::from_report(&report, None),
    }))
}

/// DELETE /api/reports/{report_id}
pub async fn delete_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    db_services::delete_report(state.repository.as_ref(), ReportId::new(report_id)).await?;

    Ok(Json(MessageResponse {
        message: "Report deleted successfully".to_string(),
    }))
}

/// GET /api/reports/{report_id}/image
///
/// Fetch the image payload of one report.
pub async fn get_report_image(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> HandlerResult<ReportImageResponse> {
    let report =
        db_services::get_report(state.repository.as_ref(), ReportId::new(report_id)).await?;

    let image_data = report.image_data.as_ref().ok_or_else(|| {
        AppError::NotFound("No image available for this report".to_string())
    })?;

    Ok(Json(ReportImageResponse {
        image: base64::engine::general_purpose::STANDARD.encode(image_data),
        image_name: report.image_name.clone(),
    }))
}

// =============================================================================
// Cameras
// =============================================================================

/// POST /api/cameras
pub async fn add_camera(
    State(state): State<AppState>,
    Json(request): Json<CreateCameraRequest>,
) -> Result<(StatusCode, Json<CameraResponse>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Camera name is required".to_string()));
    }
    if request.ip_address.trim().is_empty() {
        return Err(AppError::BadRequest("IP address is required".to_string()));
    }

    let new_camera = NewCamera {
        name: request.name,
        location: request.location.unwrap_or_default(),
        status: request.status.unwrap_or(CameraStatus::Active),
        ip_address: request.ip_address,
    };

    let camera = db_services::add_camera(state.repository.as_ref(), &new_camera).await?;

    Ok((
        StatusCode::CREATED,
        Json(CameraResponse {
            message: "Camera added successfully".to_string(),
            camera: CameraDto::from(&camera),
        }),
    ))
}

/// GET /api/cameras
pub async fn list_cameras(State(state): State<AppState>) -> HandlerResult<CameraListResponse> {
    let cameras = db_services::list_cameras(state.repository.as_ref()).await?;
    let cameras: Vec<CameraDto> = cameras.iter().map(CameraDto::from).collect();

    Ok(Json(CameraListResponse {
        count: cameras.len(),
        cameras,
    }))
}

/// GET /api/cameras/{camera_id}
pub async fn get_camera(
    State(state): State<AppState>,
    Path(camera_id): Path<i64>,
) -> HandlerResult<CameraDto> {
    let camera =
        db_services::get_camera(state.repository.as_ref(), CameraId::new(camera_id)).await?;
    Ok(Json(CameraDto::from(&camera)))
}

/// PUT /api/cameras/{camera_id}
pub async fn update_camera(
    State(state): State<AppState>,
    Path(camera_id): Path<i64>,
    Json(request): Json<UpdateCameraRequest>,
) -> HandlerResult<CameraResponse> {
    let changes = CameraUpdate {
        name: request.name,
        location: request.location,
        status: request.status,
        ip_address: request.ip_address,
    };

    let camera =
        db_services::update_camera(state.repository.as_ref(), CameraId::new(camera_id), &changes)
            .await?;

    Ok(Json(CameraResponse {
        message: "Camera updated successfully".to_string(),
        camera: CameraDto::from(&camera),
    }))
}

/// DELETE /api/cameras/{camera_id}
pub async fn delete_camera(
    State(state): State<AppState>,
    Path(camera_id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    db_services::delete_camera(state.repository.as_ref(), CameraId::new(camera_id)).await?;

    Ok(Json(MessageResponse {
        message: "Camera deleted successfully".to_string(),
    }))
}

// =============================================================================
// Statistics
// =============================================================================

/// GET /api/statistics
pub async fn get_statistics(State(state): State<AppState>) -> HandlerResult<Statistics> {
    let stats = db_services::get_statistics(state.repository.as_ref()).await?;
    Ok(Json(stats))
}

/// POST /api/statistics/update
///
/// Manually trigger a statistics recompute.
pub async fn update_statistics(
    State(state): State<AppState>,
) -> HandlerResult<StatisticsUpdateResponse> {
    let statistics = db_services::refresh_statistics(state.repository.as_ref()).await?;

    Ok(Json(StatisticsUpdateResponse {
        message: "Statistics updated successfully".to_string(),
        statistics,
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /api/dashboard/summary
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> HandlerResult<DashboardSummaryResponse> {
    let summary = db_services::dashboard_summary(state.repository.as_ref()).await?;
    Ok(Json(DashboardSummaryResponse::from(summary)))
}

// =============================================================================
// Helpers
// =============================================================================

/// Lowercased file extension, defaulting to jpg.
fn file_extension(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or_default();
    match ext.to_lowercase().as_str() {
        "png" => "png",
        "gif" => "gif",
        "webp" => "webp",
        "bmp" => "bmp",
        "jpeg" => "jpeg",
        _ => "jpg",
    }
}

/// Decode base64 image data, tolerating a `data:image/...;base64,` prefix.
fn decode_base64_image(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = match encoded.split_once("base64,") {
        Some((_, rest)) => rest,
        None => encoded,
    };
    base64::engine::general_purpose::STANDARD.decode(payload.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.PNG"), "png");
        assert_eq!(file_extension("photo.jpeg"), "jpeg");
        assert_eq!(file_extension("photo.tiff"), "jpg");
        assert_eq!(file_extension("noext"), "jpg");
    }

    #[test]
    fn test_decode_base64_image_plain() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"raw");
        assert_eq!(decode_base64_image(&encoded).unwrap(), b"raw");
    }

    #[test]
    fn test_decode_base64_image_with_data_url_prefix() {
        let encoded = format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(b"raw")
        );
        assert_eq!(decode_base64_image(&encoded).unwrap(), b"raw");
    }

    #[test]
    fn test_decode_base64_image_rejects_garbage() {
        assert!(decode_base64_image("!!not base64!!").is_err());
    }
}
