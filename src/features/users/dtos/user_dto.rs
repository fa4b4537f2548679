use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::backend::models::{UserPayload, UserRecord};
use crate::shared::validation::{not_blank, ROLE_REGEX};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Matches name or email, case-insensitive
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

impl From<UserRecord> for UserDto {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

/// Request DTO for creating or editing a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserFormDto {
    #[validate(custom(function = "not_blank", message = "Nama wajib diisi"))]
    pub name: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    /// One of "admin", "pegawai", "atasan"
    #[validate(regex(path = *ROLE_REGEX, message = "Role harus admin, pegawai, atau atasan"))]
    pub role: String,

    pub is_active: bool,
}

impl From<UserFormDto> for UserPayload {
    fn from(dto: UserFormDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            role: dto.role,
            is_active: u8::from(dto.is_active),
        }
    }
}
