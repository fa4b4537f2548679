use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::core::middleware::bearer_session_id;
use crate::features::auth::dtos::{
    AccessQuery, AccessResponseDto, LoginRequestDto, LoginResponseDto, MeResponseDto,
    MenuResponseDto,
};
use crate::features::auth::model::Session;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 502, description = "Backend unreachable")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()?;

    let (session, message) = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(session), Some(message), None)))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    session: Session,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.logout(&session).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Berhasil keluar".to_string()),
        None,
    )))
}

/// Get current session info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current session retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    session: Session,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(
        Some(service.me(&session)),
        None,
        None,
    )))
}

/// Sidebar entries for the current session's role
#[utoipa::path(
    get,
    path = "/api/auth/menu",
    responses(
        (status = 200, description = "Menu retrieved successfully", body = ApiResponse<MenuResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_menu(
    session: Session,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<MenuResponseDto>>> {
    Ok(Json(ApiResponse::success(
        Some(service.menu(&session)),
        None,
        None,
    )))
}

/// Decide whether a page may be shown, and where to go otherwise
#[utoipa::path(
    get,
    path = "/api/auth/access",
    params(AccessQuery),
    responses(
        (status = 200, description = "Access decision", body = ApiResponse<AccessResponseDto>)
    ),
    tag = "auth"
)]
pub async fn check_access(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
    Query(query): Query<AccessQuery>,
) -> Result<Json<ApiResponse<AccessResponseDto>>> {
    let access = service
        .access(bearer_session_id(&headers), &query.path)
        .await;
    Ok(Json(ApiResponse::success(Some(access), None, None)))
}
