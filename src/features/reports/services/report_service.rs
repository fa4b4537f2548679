use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Role, Session};
use crate::features::equipment::EquipmentService;
use crate::features::reports::dtos::*;
use crate::modules::backend::models::{NewEvidence, NewReportPayload};
use crate::modules::backend::DashboardBackend;
use crate::shared::constants::STATUS_MENUNGGU_APPROVE;
use crate::shared::datetime::iso_timestamp;

/// Service for filing item reports
pub struct ReportService {
    backend: Arc<dyn DashboardBackend>,
    equipment: Arc<EquipmentService>,
}

impl ReportService {
    pub fn new(backend: Arc<dyn DashboardBackend>, equipment: Arc<EquipmentService>) -> Self {
        Self { backend, equipment }
    }

    /// File a report against an existing asset.
    ///
    /// The asset must exist under the given name and manufacturer. Every
    /// evidence entry starts out waiting for approval.
    pub async fn submit(
        &self,
        session: &Session,
        dto: CreateReportDto,
    ) -> Result<ReportSubmittedDto> {
        let asset = self
            .equipment
            .find(session, &dto.nama_barang, &dto.manufaktur)
            .await?
            .ok_or_else(|| AppError::NotFound("Barang tidak ditemukan".to_string()))?;

        let evidence = synthesize_evidence(
            &dto.evidence,
            &asset.nama_item,
            session,
            &iso_timestamp(Utc::now()),
        );

        let payload = NewReportPayload {
            manufaktur: asset.manufaktur,
            nama_barang: asset.nama_item,
            riwayat: dto.riwayat,
            kelayakan: dto.kelayakan,
            catatan: dto.catatan.unwrap_or_default(),
            evidence,
        };

        self.backend
            .create_report(session.bearer(), &payload)
            .await
            .map_err(|e| e.or_external("Terjadi kesalahan saat mengirim laporan"))?;

        tracing::info!(
            "Report for {} ({}) filed by {} with {} evidence entries",
            payload.nama_barang,
            payload.manufaktur,
            session.name,
            payload.evidence.len()
        );

        Ok(ReportSubmittedDto {
            nama_barang: payload.nama_barang,
            manufaktur: payload.manufaktur,
            evidence_count: payload.evidence.len(),
        })
    }
}

/// One evidence entry per uploaded file, or a single placeholder entry named
/// after the asset when nothing was uploaded.
pub fn synthesize_evidence(
    files: &[EvidenceFileDto],
    asset_name: &str,
    session: &Session,
    now: &str,
) -> Vec<NewEvidence> {
    let sequence = if session.has_role(Role::Pegawai) { 1 } else { 0 };
    let entry = |name: &str, url: Option<String>| NewEvidence {
        name: name.to_string(),
        url,
        user_maker: session.name.clone(),
        status_approve: STATUS_MENUNGGU_APPROVE.to_string(),
        approval_sequence: sequence,
        created_at: now.to_string(),
    };

    if files.is_empty() {
        return vec![entry(asset_name, None)];
    }

    files
        .iter()
        .map(|f| entry(&f.name, f.url.clone().filter(|u| !u.is_empty())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{equipment, session_for, FakeBackend};

    fn laptop_report(evidence: Vec<EvidenceFileDto>) -> CreateReportDto {
        CreateReportDto {
            manufaktur: "Acer".to_string(),
            nama_barang: "Laptop X1".to_string(),
            riwayat: "pernah".to_string(),
            kelayakan: 80,
            catatan: None,
            evidence,
        }
    }

    fn service() -> (ReportService, Arc<FakeBackend>) {
        let backend = FakeBackend::new();
        backend.state().equipment = vec![
            equipment("EQ-1", "Laptop X1", "Acer", 4, "Baik"),
            equipment("EQ-2", "Laptop X1", "Lenovo", 1, "Rusak"),
        ];
        let assets = Arc::new(EquipmentService::new(backend.clone()));
        (ReportService::new(backend.clone(), assets), backend)
    }

    #[tokio::test]
    async fn test_report_without_photos_gets_one_placeholder_evidence() {
        let (service, backend) = service();
        let pegawai = session_for("pegawai", "Budi");

        let submitted = service
            .submit(&pegawai, laptop_report(vec![]))
            .await
            .unwrap();
        assert_eq!(submitted.evidence_count, 1);

        let state = backend.state();
        let payload = &state.created_reports[0];
        assert_eq!(payload.manufaktur, "Acer");
        assert_eq!(payload.nama_barang, "Laptop X1");
        assert_eq!(payload.riwayat, "pernah");
        assert_eq!(payload.kelayakan, 80);
        assert_eq!(payload.catatan, "");

        assert_eq!(payload.evidence.len(), 1);
        let evidence = &payload.evidence[0];
        assert_eq!(evidence.name, "Laptop X1");
        assert_eq!(evidence.url, None);
        assert_eq!(evidence.user_maker, "Budi");
        assert_eq!(evidence.status_approve, "menunggu approve");
        assert_eq!(evidence.approval_sequence, 1);
        assert!(evidence.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_admin_reports_start_at_sequence_zero() {
        let (service, backend) = service();
        let admin = session_for("admin", "Ani");

        service.submit(&admin, laptop_report(vec![])).await.unwrap();

        let state = backend.state();
        assert_eq!(state.created_reports[0].evidence[0].approval_sequence, 0);
        assert_eq!(state.created_reports[0].evidence[0].user_maker, "Ani");
    }

    #[tokio::test]
    async fn test_each_photo_becomes_evidence() {
        let (service, backend) = service();
        let pegawai = session_for("pegawai", "Budi");
        let files = vec![
            EvidenceFileDto {
                name: "depan.jpg".to_string(),
                url: Some("https://files.example/depan.jpg".to_string()),
            },
            EvidenceFileDto {
                name: "belakang.jpg".to_string(),
                url: Some(String::new()),
            },
        ];

        service.submit(&pegawai, laptop_report(files)).await.unwrap();

        let state = backend.state();
        let evidence = &state.created_reports[0].evidence;
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence[0].name, "depan.jpg");
        assert_eq!(evidence[1].url, None);
        assert!(evidence.iter().all(|e| e.status_approve == "menunggu approve"));
    }

    #[tokio::test]
    async fn test_unknown_asset_is_rejected_before_sending() {
        let (service, backend) = service();
        let mut dto = laptop_report(vec![]);
        dto.manufaktur = "Asus".to_string();

        let result = service.submit(&session_for("pegawai", "Budi"), dto).await;

        match result {
            Err(AppError::NotFound(message)) => assert_eq!(message, "Barang tidak ditemukan"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(backend.count("create_report"), 0);
    }
}
