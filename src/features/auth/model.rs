use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_ATASAN, ROLE_PEGAWAI};

/// Dashboard roles as the backend names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Staff; files reports
    Pegawai,
    /// Supervisor; approves or rejects reports
    Atasan,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Pegawai, Role::Atasan];

    /// Parse a stored role string. Unknown roles have no access anywhere.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_PEGAWAI => Some(Role::Pegawai),
            ROLE_ATASAN => Some(Role::Atasan),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Pegawai => ROLE_PEGAWAI,
            Role::Atasan => ROLE_ATASAN,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The values a browser session holds: logged-in flag, backend token, role
/// and display name. Passed explicitly into every service call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque key the browser presents as its bearer token
    pub id: Uuid,
    pub is_login: bool,
    pub token: String,
    pub role: String,
    pub name: String,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    /// Backend bearer token, if the session carries one
    pub fn bearer(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|t| !t.is_empty())
    }
}
