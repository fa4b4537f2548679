use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::auth::gate::{GateDecision, MenuItem};
use crate::shared::validation::not_blank;

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(custom(function = "not_blank", message = "Password wajib diisi"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Opaque session key; send it back as `Authorization: Bearer <session_token>`
    pub session_token: String,
    pub role: String,
    pub name: String,
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub role: String,
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AccessQuery {
    /// Client-side page path, e.g. `/manajemen-aset`
    pub path: String,
}

/// Gate decision for one page path
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessResponseDto {
    /// Page that will actually be shown after static redirects
    pub path: String,
    pub decision: GateDecision,
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponseDto {
    pub items: Vec<MenuItem>,
}
