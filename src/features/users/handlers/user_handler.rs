use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::*;
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserDto>>),
        (status = 403, description = "Forbidden")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>> {
    let users = service.list(&session, &query.q).await?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserFormDto,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UserFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    dto.validate()?;

    service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            None,
            Some("User ditambahkan".to_string()),
            None,
        )),
    ))
}

/// Edit a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UserFormDto,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UserFormDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.update(&session, id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User diperbarui".to_string()),
        None,
    )))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User dihapus".to_string()),
        None,
    )))
}
