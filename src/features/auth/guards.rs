//! Role-based authorization guards for the application.
//!
//! These guards extract the session put in place by the session middleware
//! and verify its role against the page the endpoint belongs to:
//! - admin: everything, including asset and user management
//! - pegawai: dashboard, filing reports, viewing the approval list
//! - atasan: dashboard, viewing and deciding on reports

use crate::core::error::AppError;
use crate::features::auth::gate::{evaluate, GateDecision, ProtectedPage};
use crate::features::auth::model::{Role, Session};
use axum::{extract::FromRequestParts, http::request::Parts};

fn authorize(parts: &Parts, allowed: &[Role], denied: &str) -> Result<Session, AppError> {
    let session = parts.extensions.get::<Session>();

    match evaluate(session, allowed) {
        GateDecision::Allow => session
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Silakan login terlebih dahulu".to_string())),
        GateDecision::RedirectLogin => Err(AppError::Unauthorized(
            "Silakan login terlebih dahulu".to_string(),
        )),
        GateDecision::RedirectUnauthorized => Err(AppError::Forbidden(denied.to_string())),
    }
}

/// Guard for asset and user management.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(session): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub Session);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(
            parts,
            ProtectedPage::ManajemenAset.allowed_roles(),
            "Hanya admin yang dapat mengakses halaman ini",
        )
        .map(RequireAdmin)
    }
}

/// Guard for filing reports and reading the equipment they refer to.
///
/// Allows "admin" and "pegawai".
pub struct RequireReporter(pub Session);

impl<S> FromRequestParts<S> for RequireReporter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(
            parts,
            ProtectedPage::PelaporanBarang.allowed_roles(),
            "Anda tidak memiliki akses ke pelaporan barang",
        )
        .map(RequireReporter)
    }
}

/// Guard for read-only pages open to every role (dashboard, approval list).
pub struct RequireViewer(pub Session);

impl<S> FromRequestParts<S> for RequireViewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(
            parts,
            ProtectedPage::Dashboard.allowed_roles(),
            "Anda tidak memiliki akses ke halaman ini",
        )
        .map(RequireViewer)
    }
}

/// Guard for approve/reject actions. Only "atasan" may decide on a report.
pub struct RequireAtasan(pub Session);

impl<S> FromRequestParts<S> for RequireAtasan
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(
            parts,
            &[Role::Atasan],
            "Hanya atasan yang dapat menyetujui atau menolak laporan",
        )
        .map(RequireAtasan)
    }
}
