use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireReporter;
use crate::features::reports::dtos::{CreateReportDto, ReportSubmittedDto};
use crate::features::reports::services::ReportService;
use crate::shared::types::ApiResponse;

/// File an item report (Pelaporan Barang)
///
/// Without uploaded photos a single placeholder evidence entry is sent.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report filed", body = ApiResponse<ReportSubmittedDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Asset not found")
    ),
    tag = "reports",
    security(("bearer_auth" = []))
)]
pub async fn create_report(
    RequireReporter(session): RequireReporter,
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportSubmittedDto>>)> {
    dto.validate()?;

    let submitted = service.submit(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(submitted),
            Some("Laporan berhasil dikirim.".to_string()),
            None,
        )),
    ))
}
