//! Page-level access decisions.
//!
//! A page is rendered only for a logged-in session whose role is in the
//! page's allowed set. Without a session the client goes to the login page;
//! with the wrong role it goes to the unauthorized page.

use serde::Serialize;
use utoipa::ToSchema;

use crate::features::auth::model::{Role, Session};
use crate::shared::constants::{DASHBOARD_PATH, LOGIN_PATH, UNAUTHORIZED_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Allow,
    RedirectLogin,
    RedirectUnauthorized,
}

impl GateDecision {
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::RedirectLogin => Some(LOGIN_PATH),
            GateDecision::RedirectUnauthorized => Some(UNAUTHORIZED_PATH),
        }
    }
}

/// Decide access for a session against a set of allowed roles
pub fn evaluate(session: Option<&Session>, allowed: &[Role]) -> GateDecision {
    let Some(session) = session.filter(|s| s.is_login) else {
        return GateDecision::RedirectLogin;
    };

    match session.role() {
        Some(role) if allowed.contains(&role) => GateDecision::Allow,
        _ => GateDecision::RedirectUnauthorized,
    }
}

/// Role-gated pages of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectedPage {
    Dashboard,
    PelaporanBarang,
    ApprovalPelaporan,
    ManajemenAset,
    ManajemenUser,
}

impl ProtectedPage {
    pub const ALL: [ProtectedPage; 5] = [
        ProtectedPage::Dashboard,
        ProtectedPage::PelaporanBarang,
        ProtectedPage::ApprovalPelaporan,
        ProtectedPage::ManajemenAset,
        ProtectedPage::ManajemenUser,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ProtectedPage::Dashboard => DASHBOARD_PATH,
            ProtectedPage::PelaporanBarang => "/pelaporan-barang",
            ProtectedPage::ApprovalPelaporan => "/approval-pelaporan",
            ProtectedPage::ManajemenAset => "/manajemen-aset",
            ProtectedPage::ManajemenUser => "/manajemen-user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProtectedPage::Dashboard => "Dashboard",
            ProtectedPage::PelaporanBarang => "Pelaporan Barang",
            ProtectedPage::ApprovalPelaporan => "Approval Pelaporan",
            ProtectedPage::ManajemenAset => "Manajemen Aset",
            ProtectedPage::ManajemenUser => "Manajemen User",
        }
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            ProtectedPage::Dashboard | ProtectedPage::ApprovalPelaporan => &Role::ALL,
            ProtectedPage::PelaporanBarang => &[Role::Admin, Role::Pegawai],
            ProtectedPage::ManajemenAset | ProtectedPage::ManajemenUser => &[Role::Admin],
        }
    }

    pub fn from_path(path: &str) -> Option<ProtectedPage> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }
}

/// Outcome of resolving a client-side page path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAccess {
    pub requested: String,
    /// Path after static redirects (`/` and unknown paths)
    pub path: String,
    pub decision: GateDecision,
}

impl PageAccess {
    /// Where the client should navigate instead, if anywhere
    pub fn redirect(&self) -> Option<String> {
        match self.decision {
            GateDecision::Allow if self.path != self.requested => Some(self.path.clone()),
            GateDecision::Allow => None,
            other => other.redirect().map(String::from),
        }
    }
}

/// Resolve a page path the way the client router does: public pages always
/// render, `/` goes to login, unknown paths fall back to the dashboard (and
/// are gated as the dashboard).
pub fn resolve_page(path: &str, session: Option<&Session>) -> PageAccess {
    let requested = normalize(path);

    let (path, decision) = match requested.as_str() {
        LOGIN_PATH | UNAUTHORIZED_PATH => (requested.clone(), GateDecision::Allow),
        "/" => (LOGIN_PATH.to_string(), GateDecision::Allow),
        _ => {
            let page = ProtectedPage::from_path(&requested).unwrap_or(ProtectedPage::Dashboard);
            (
                page.path().to_string(),
                evaluate(session, page.allowed_roles()),
            )
        }
    };

    PageAccess {
        requested,
        path,
        decision,
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// One sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
}

/// Sidebar entries visible to a role, in display order, ending with logout
pub fn menu_for(role: Option<Role>) -> Vec<MenuItem> {
    let Some(role) = role else {
        return Vec::new();
    };

    ProtectedPage::ALL
        .iter()
        .filter(|page| page.allowed_roles().contains(&role))
        .map(|page| MenuItem {
            key: page.path().to_string(),
            label: page.label().to_string(),
        })
        .chain(std::iter::once(MenuItem {
            key: "/logout".to_string(),
            label: "Keluar".to_string(),
        }))
        .collect()
}
