use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireViewer;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get the dashboard widgets
///
/// Returns the stat cards, the seven-day approval chart, the asset
/// condition ratio and the latest reports.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard widgets", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    RequireViewer(session): RequireViewer,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = service.summary(&session).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
