use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::approvals::dtos::*;
use crate::features::approvals::services::{ApprovalService, LetterFile};
use crate::features::auth::guards::{RequireAtasan, RequireViewer};
use crate::shared::types::{ApiResponse, Meta};

/// List approval rows
#[utoipa::path(
    get,
    path = "/api/approvals",
    params(ListApprovalsQuery),
    responses(
        (status = 200, description = "Approval rows", body = ApiResponse<Vec<ApprovalRowDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    tag = "approvals",
    security(("bearer_auth" = []))
)]
pub async fn list_approvals(
    RequireViewer(session): RequireViewer,
    State(service): State<Arc<ApprovalService>>,
    Query(query): Query<ListApprovalsQuery>,
) -> Result<Json<ApiResponse<Vec<ApprovalRowDto>>>> {
    let rows = service.list(&session, &query.q).await?;
    let total = rows.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(rows),
        None,
        Some(Meta { total }),
    )))
}

/// Get one report with its full evidence list
#[utoipa::path(
    get,
    path = "/api/approvals/{id}",
    params(
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report detail", body = ApiResponse<ReportDetailDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "approvals",
    security(("bearer_auth" = []))
)]
pub async fn get_approval(
    RequireViewer(session): RequireViewer,
    State(service): State<Arc<ApprovalService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportDetailDto>>> {
    let detail = service.detail(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/api/approvals/{id}",
    params(
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found")
    ),
    tag = "approvals",
    security(("bearer_auth" = []))
)]
pub async fn delete_approval(
    RequireViewer(session): RequireViewer,
    State(service): State<Arc<ApprovalService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Pelaporan dihapus".to_string()),
        None,
    )))
}

/// Approve or reject the selected reports
///
/// Each selected report gets its own outcome. `success` is false when any
/// row failed.
#[utoipa::path(
    post,
    path = "/api/approvals/decision",
    request_body = DecisionRequestDto,
    responses(
        (status = 200, description = "Per-row outcome", body = ApiResponse<DecisionOutcomeDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only atasan may decide")
    ),
    tag = "approvals",
    security(("bearer_auth" = []))
)]
pub async fn decide_approvals(
    RequireAtasan(session): RequireAtasan,
    State(service): State<Arc<ApprovalService>>,
    AppJson(dto): AppJson<DecisionRequestDto>,
) -> Result<Json<ApiResponse<DecisionOutcomeDto>>> {
    dto.validate()?;

    let outcome = service.decide(&session, dto).await?;
    let message = outcome.message().to_string();
    let complete = outcome.is_complete();

    let mut response = ApiResponse::success(Some(outcome), Some(message), None);
    response.success = complete;
    Ok(Json(response))
}

/// Download the approval request letter as PDF
#[utoipa::path(
    get,
    path = "/api/approvals/{id}/letter",
    params(
        ("id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "PDF letter", content_type = "application/pdf"),
        (status = 404, description = "Report not found")
    ),
    tag = "approvals",
    security(("bearer_auth" = []))
)]
pub async fn download_letter(
    RequireViewer(session): RequireViewer,
    State(service): State<Arc<ApprovalService>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let file = service.letter(&session, &id).await?;
    Ok(pdf_attachment(file))
}

fn pdf_attachment(file: LetterFile) -> Response {
    let ascii_name: String = file
        .filename
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_name,
        urlencoding::encode(&file.filename)
    );

    let mut response = file.bytes.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
