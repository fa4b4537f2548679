use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireReporter};
use crate::features::equipment::dtos::*;
use crate::features::equipment::services::EquipmentService;
use crate::shared::types::{ApiResponse, Meta};

/// List assets (paginated, searchable by name)
#[utoipa::path(
    get,
    path = "/api/equipment",
    params(ListEquipmentQuery),
    responses(
        (status = 200, description = "List of assets", body = ApiResponse<Vec<AssetDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "equipment",
    security(("bearer_auth" = []))
)]
pub async fn list_equipment(
    RequireReporter(session): RequireReporter,
    State(service): State<Arc<EquipmentService>>,
    Query(query): Query<ListEquipmentQuery>,
) -> Result<Json<ApiResponse<Vec<AssetDto>>>> {
    let (assets, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(assets),
        None,
        Some(Meta { total }),
    )))
}

/// Manufacturers and items for the report form
#[utoipa::path(
    get,
    path = "/api/equipment/options",
    responses(
        (status = 200, description = "Selector options", body = ApiResponse<EquipmentOptionsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "equipment",
    security(("bearer_auth" = []))
)]
pub async fn get_options(
    RequireReporter(session): RequireReporter,
    State(service): State<Arc<EquipmentService>>,
) -> Result<Json<ApiResponse<EquipmentOptionsDto>>> {
    let options = service.options(&session).await?;
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// Register a new asset
#[utoipa::path(
    post,
    path = "/api/equipment",
    request_body = CreateAssetDto,
    responses(
        (status = 201, description = "Asset created", body = ApiResponse<AssetDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    ),
    tag = "equipment",
    security(("bearer_auth" = []))
)]
pub async fn create_equipment(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<EquipmentService>>,
    AppJson(dto): AppJson<CreateAssetDto>,
) -> Result<(StatusCode, Json<ApiResponse<AssetDto>>)> {
    dto.validate()?;

    let asset = service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(asset),
            Some("Item ditambahkan".to_string()),
            None,
        )),
    ))
}

/// Edit an asset
#[utoipa::path(
    put,
    path = "/api/equipment/{id}",
    params(
        ("id" = String, Path, description = "Asset unique id")
    ),
    request_body = UpdateAssetDto,
    responses(
        (status = 200, description = "Asset updated"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Asset not found")
    ),
    tag = "equipment",
    security(("bearer_auth" = []))
)]
pub async fn update_equipment(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<EquipmentService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateAssetDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.update(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item diperbarui".to_string()),
        None,
    )))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    params(
        ("id" = String, Path, description = "Asset unique id")
    ),
    responses(
        (status = 200, description = "Asset deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Asset not found")
    ),
    tag = "equipment",
    security(("bearer_auth" = []))
)]
pub async fn delete_equipment(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<EquipmentService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item dihapus".to_string()),
        None,
    )))
}
