use std::collections::HashSet;
use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use futures::future::join_all;

use crate::core::config::LetterConfig;
use crate::core::error::{AppError, Result};
use crate::features::approvals::aggregator::{aggregate, filter_rows, to_row};
use crate::features::approvals::dtos::*;
use crate::features::approvals::letter::{letter_filename, render_letter};
use crate::features::auth::model::Session;
use crate::modules::backend::models::{ReportDecisionPayload, ReportRecord};
use crate::modules::backend::DashboardBackend;
use crate::shared::datetime::iso_timestamp;

/// A rendered letter ready for download
pub struct LetterFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Service for the approval queue
pub struct ApprovalService {
    backend: Arc<dyn DashboardBackend>,
    letter: LetterConfig,
    utc_offset: FixedOffset,
}

impl ApprovalService {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        letter: LetterConfig,
        utc_offset: FixedOffset,
    ) -> Self {
        Self {
            backend,
            letter,
            utc_offset,
        }
    }

    async fn fetch_reports(&self, session: &Session) -> Result<Vec<ReportRecord>> {
        self.backend
            .list_reports(session.bearer())
            .await
            .map_err(|e| e.or_external("Gagal mengambil data approval"))
    }

    async fn find_report(&self, session: &Session, id: &str) -> Result<ReportRecord> {
        self.fetch_reports(session)
            .await?
            .into_iter()
            .find(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::NotFound("Laporan tidak ditemukan".to_string()))
    }

    /// Approval rows, filtered by item name or submitter
    pub async fn list(&self, session: &Session, query: &str) -> Result<Vec<ApprovalRowDto>> {
        let reports = self.fetch_reports(session).await?;
        Ok(filter_rows(aggregate(&reports), query))
    }

    pub async fn detail(&self, session: &Session, id: &str) -> Result<ReportDetailDto> {
        let report = self.find_report(session, id).await?;
        let row = to_row(&report);

        Ok(ReportDetailDto {
            id: report.id,
            manufaktur: report.manufaktur,
            nama_barang: report.nama_barang,
            riwayat: report.riwayat,
            kelayakan: report.kelayakan,
            catatan: report.catatan,
            created_at: row.created_at,
            user_maker: row.user_maker,
            status_approve: row.status_approve,
            tanggal_approve: row.tanggal_approve,
            evidence: report.evidence.into_iter().map(EvidenceDto::from).collect(),
        })
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.backend
            .delete_report(session.bearer(), id)
            .await
            .map_err(|e| e.or_external("Gagal menghapus pelaporan"))?;

        tracing::info!("Report {} deleted by {}", id, session.name);
        Ok(())
    }

    /// Apply one verdict to every selected report.
    ///
    /// All requests are sent concurrently and each row reports its own
    /// outcome; rows that succeeded stay decided even if others failed.
    /// The list is read again once afterwards.
    pub async fn decide(
        &self,
        session: &Session,
        dto: DecisionRequestDto,
    ) -> Result<DecisionOutcomeDto> {
        let mut seen = HashSet::new();
        let ids: Vec<String> = dto
            .ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();

        if ids.is_empty() {
            return Ok(DecisionOutcomeDto {
                verdict: dto.verdict,
                succeeded: Vec::new(),
                failed: Vec::new(),
                rows: None,
            });
        }

        let payload = ReportDecisionPayload {
            status_approve: dto.verdict.status().to_string(),
            tanggal_approve: iso_timestamp(Utc::now()),
        };
        let token = session.bearer();

        let results = join_all(ids.iter().map(|id| {
            let payload = &payload;
            async move { (id, self.backend.decide_report(token, id, payload).await) }
        }))
        .await;

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for (id, result) in results {
            match result {
                Ok(()) => succeeded.push(id.clone()),
                Err(e) => {
                    tracing::warn!("Failed to set report {} to {}: {}", id, payload.status_approve, e);
                    failed.push(DecisionFailureDto {
                        id: id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "{} set {} of {} reports to {}",
            session.name,
            succeeded.len(),
            ids.len(),
            payload.status_approve
        );

        let rows = match self.backend.list_reports(token).await {
            Ok(reports) => Some(aggregate(&reports)),
            Err(e) => {
                tracing::warn!("Failed to reload approvals after decision: {}", e);
                None
            }
        };

        Ok(DecisionOutcomeDto {
            verdict: dto.verdict,
            succeeded,
            failed,
            rows,
        })
    }

    pub async fn letter(&self, session: &Session, id: &str) -> Result<LetterFile> {
        let report = self.find_report(session, id).await?;

        Ok(LetterFile {
            filename: letter_filename(&report.nama_barang),
            bytes: render_letter(&report, &self.letter, self.utc_offset),
        })
    }
}
