use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Session;
use crate::modules::backend::models::*;
use crate::modules::backend::DashboardBackend;

pub fn session_for(role: &str, name: &str) -> Session {
    Session {
        id: Uuid::new_v4(),
        is_login: true,
        token: format!("token-{}", role),
        role: role.to_string(),
        name: name.to_string(),
    }
}

/// Attach a fixed session to every request, standing in for the session middleware
pub fn with_session(router: Router, session: Session) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let session = session.clone();
            async move {
                request.extensions_mut().insert(session);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

pub fn equipment(id: &str, nama: &str, manufaktur: &str, quantity: i64, kondisi: &str) -> EquipmentRecord {
    EquipmentRecord {
        unique_id: Some(id.to_string()),
        nama_item: nama.to_string(),
        manufaktur: manufaktur.to_string(),
        quantity: Some(quantity),
        kondisi_barang: kondisi.to_string(),
        umur: Some(2),
        created_at: "2026-01-10".to_string(),
    }
}

pub fn evidence(user: &str, status: &str, sequence: i64) -> EvidenceRecord {
    EvidenceRecord {
        name: "foto.jpg".to_string(),
        url: Some("https://files.example/foto.jpg".to_string()),
        user_maker: user.to_string(),
        status_approve: status.to_string(),
        tanggal_approve: None,
        created_at: "2026-10-15T02:00:00.000Z".to_string(),
        approval_sequence: Some(sequence),
    }
}

pub fn report(id: &str, nama: &str, created_at: &str, evidence: Vec<EvidenceRecord>) -> ReportRecord {
    ReportRecord {
        id: Some(id.to_string()),
        manufaktur: "Acer".to_string(),
        nama_barang: nama.to_string(),
        riwayat: "pernah".to_string(),
        kelayakan: Some("80".to_string()),
        catatan: None,
        created_at: created_at.to_string(),
        evidence,
    }
}

/// Recorded state of the in-memory backend
#[derive(Default)]
pub struct FakeState {
    /// (email, password, role, name)
    pub accounts: Vec<(String, String, String, String)>,
    pub equipment: Vec<EquipmentRecord>,
    pub reports: Vec<ReportRecord>,
    pub users: Vec<UserRecord>,
    pub created_reports: Vec<NewReportPayload>,
    pub decisions: Vec<(String, ReportDecisionPayload)>,
    pub summary: Option<EquipmentSummary>,
    pub detail_summary: Option<EquipmentDetailSummary>,
    /// Report ids whose decision request fails
    pub failing_decisions: HashSet<String>,
    pub fail_report_listing: bool,
    /// Operation names in call order
    pub calls: Vec<String>,
    /// Bearer token of the most recent call
    pub last_token: Option<String>,
    next_id: i64,
}

/// In-memory `DashboardBackend` with failure injection
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake backend state poisoned")
    }

    pub fn count(&self, call: &str) -> usize {
        self.state().calls.iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str, token: Option<&str>) -> MutexGuard<'_, FakeState> {
        let mut state = self.state();
        state.calls.push(call.to_string());
        state.last_token = token.map(String::from);
        state
    }
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Data tidak ditemukan".to_string())
}

#[async_trait]
impl DashboardBackend for FakeBackend {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let state = self.record("login", None);
        state
            .accounts
            .iter()
            .find(|(email, password, _, _)| {
                *email == credentials.email && *password == credentials.password
            })
            .map(|(email, _, role, name)| LoginResponse {
                message: Some("Login berhasil".to_string()),
                data: LoginData {
                    token: format!("backend-{}", email),
                    user: LoginUser {
                        role: role.clone(),
                        name: name.clone(),
                    },
                },
            })
            .ok_or_else(|| AppError::Unauthorized("Email atau password salah".to_string()))
    }

    async fn list_equipment(
        &self,
        token: Option<&str>,
        query: &EquipmentQuery,
    ) -> Result<Page<EquipmentRecord>> {
        let state = self.record("list_equipment", token);
        let needle = query.search.to_lowercase();
        let matching: Vec<EquipmentRecord> = state
            .equipment
            .iter()
            .filter(|e| needle.is_empty() || e.nama_item.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let per_page = query.per_page.max(1) as usize;
        let skip = (query.page.max(1) as usize - 1) * per_page;
        Ok(Page {
            total: matching.len() as i64,
            items: matching.into_iter().skip(skip).take(per_page).collect(),
        })
    }

    async fn create_equipment(
        &self,
        token: Option<&str>,
        payload: &EquipmentPayload,
    ) -> Result<EquipmentRecord> {
        let mut state = self.record("create_equipment", token);
        let id = state.next_id();
        let record = EquipmentRecord {
            unique_id: Some(format!("EQ-{}", id)),
            nama_item: payload.nama_item.clone(),
            manufaktur: payload.manufaktur.clone(),
            quantity: Some(payload.quantity),
            kondisi_barang: payload.kondisi_barang.clone(),
            umur: Some(payload.umur),
            created_at: payload.created_at.clone().unwrap_or_default(),
        };
        state.equipment.push(record.clone());
        Ok(record)
    }

    async fn update_equipment(
        &self,
        token: Option<&str>,
        id: &str,
        payload: &EquipmentPayload,
    ) -> Result<()> {
        let mut state = self.record("update_equipment", token);
        let record = state
            .equipment
            .iter_mut()
            .find(|e| e.unique_id.as_deref() == Some(id))
            .ok_or_else(not_found)?;
        record.nama_item = payload.nama_item.clone();
        record.manufaktur = payload.manufaktur.clone();
        record.quantity = Some(payload.quantity);
        record.kondisi_barang = payload.kondisi_barang.clone();
        record.umur = Some(payload.umur);
        if let Some(created_at) = &payload.created_at {
            record.created_at = created_at.clone();
        }
        Ok(())
    }

    async fn delete_equipment(&self, token: Option<&str>, id: &str) -> Result<()> {
        let mut state = self.record("delete_equipment", token);
        let before = state.equipment.len();
        state.equipment.retain(|e| e.unique_id.as_deref() != Some(id));
        if state.equipment.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list_reports(&self, token: Option<&str>) -> Result<Vec<ReportRecord>> {
        let state = self.record("list_reports", token);
        if state.fail_report_listing {
            return Err(AppError::ExternalServiceError(
                "Backend error: HTTP 500".to_string(),
            ));
        }
        Ok(state.reports.clone())
    }

    async fn create_report(&self, token: Option<&str>, payload: &NewReportPayload) -> Result<()> {
        let mut state = self.record("create_report", token);
        let id = state.next_id();
        let record = ReportRecord {
            id: Some(id.to_string()),
            manufaktur: payload.manufaktur.clone(),
            nama_barang: payload.nama_barang.clone(),
            riwayat: payload.riwayat.clone(),
            kelayakan: Some(payload.kelayakan.to_string()),
            catatan: Some(payload.catatan.clone()),
            created_at: payload
                .evidence
                .first()
                .map(|e| e.created_at.clone())
                .unwrap_or_default(),
            evidence: payload
                .evidence
                .iter()
                .map(|e| EvidenceRecord {
                    name: e.name.clone(),
                    url: e.url.clone(),
                    user_maker: e.user_maker.clone(),
                    status_approve: e.status_approve.clone(),
                    tanggal_approve: None,
                    created_at: e.created_at.clone(),
                    approval_sequence: Some(e.approval_sequence),
                })
                .collect(),
        };
        state.reports.push(record);
        state.created_reports.push(payload.clone());
        Ok(())
    }

    async fn decide_report(
        &self,
        token: Option<&str>,
        id: &str,
        payload: &ReportDecisionPayload,
    ) -> Result<()> {
        let mut state = self.record("decide_report", token);
        if state.failing_decisions.contains(id) {
            return Err(AppError::ExternalServiceError(
                "Backend error: HTTP 500".to_string(),
            ));
        }
        let report = state
            .reports
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(id))
            .ok_or_else(not_found)?;
        if let Some(first) = report.evidence.first_mut() {
            first.status_approve = payload.status_approve.clone();
            first.tanggal_approve = Some(payload.tanggal_approve.clone());
        }
        state.decisions.push((id.to_string(), payload.clone()));
        Ok(())
    }

    async fn delete_report(&self, token: Option<&str>, id: &str) -> Result<()> {
        let mut state = self.record("delete_report", token);
        let before = state.reports.len();
        state.reports.retain(|r| r.id.as_deref() != Some(id));
        if state.reports.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>> {
        let state = self.record("list_users", token);
        Ok(state.users.clone())
    }

    async fn create_user(&self, token: Option<&str>, payload: &UserPayload) -> Result<()> {
        let mut state = self.record("create_user", token);
        if state.users.iter().any(|u| u.email == payload.email) {
            return Err(AppError::Validation("Email sudah terdaftar".to_string()));
        }
        let id = state.next_id();
        state.users.push(UserRecord {
            id: Some(id),
            name: payload.name.clone(),
            email: payload.email.clone(),
            role: payload.role.clone(),
            is_active: payload.is_active == 1,
        });
        Ok(())
    }

    async fn update_user(&self, token: Option<&str>, id: i64, payload: &UserPayload) -> Result<()> {
        let mut state = self.record("update_user", token);
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(not_found)?;
        user.name = payload.name.clone();
        user.email = payload.email.clone();
        user.role = payload.role.clone();
        user.is_active = payload.is_active == 1;
        Ok(())
    }

    async fn delete_user(&self, token: Option<&str>, id: i64) -> Result<()> {
        let mut state = self.record("delete_user", token);
        let before = state.users.len();
        state.users.retain(|u| u.id != Some(id));
        if state.users.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn equipment_summary(&self, token: Option<&str>) -> Result<EquipmentSummary> {
        let state = self.record("equipment_summary", token);
        state.summary.clone().ok_or_else(not_found)
    }

    async fn equipment_detail_summary(
        &self,
        token: Option<&str>,
    ) -> Result<EquipmentDetailSummary> {
        let state = self.record("equipment_detail_summary", token);
        state.detail_summary.clone().ok_or_else(not_found)
    }
}
