use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::backend::models::EvidenceRecord;
use crate::shared::constants::{STATUS_APPROVED, STATUS_REJECTED};

/// Query params for the approval list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListApprovalsQuery {
    /// Matches item name or submitter, case-insensitive
    #[serde(default)]
    pub q: String,
}

/// One row of the approval table, derived from a report and its first evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApprovalRowDto {
    pub id: Option<String>,
    pub nama_barang: String,
    pub user_maker: String,
    pub created_at: String,
    pub status_approve: String,
    pub tanggal_approve: Option<String>,
    pub url_gambar: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EvidenceDto {
    pub name: String,
    pub url: Option<String>,
    pub user_maker: String,
    pub status_approve: String,
    pub tanggal_approve: Option<String>,
    pub created_at: String,
    pub approval_sequence: Option<i64>,
}

impl From<EvidenceRecord> for EvidenceDto {
    fn from(e: EvidenceRecord) -> Self {
        Self {
            name: e.name,
            url: e.url,
            user_maker: e.user_maker,
            status_approve: e.status_approve,
            tanggal_approve: e.tanggal_approve,
            created_at: e.created_at,
            approval_sequence: e.approval_sequence,
        }
    }
}

/// Full report as shown in the detail drawer
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDetailDto {
    pub id: Option<String>,
    pub manufaktur: String,
    pub nama_barang: String,
    pub riwayat: String,
    pub kelayakan: Option<String>,
    pub catatan: Option<String>,
    pub created_at: String,
    pub user_maker: String,
    pub status_approve: String,
    pub tanggal_approve: Option<String>,
    pub evidence: Vec<EvidenceDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    /// Status value written to the backend
    pub fn status(&self) -> &'static str {
        match self {
            Verdict::Approved => STATUS_APPROVED,
            Verdict::Rejected => STATUS_REJECTED,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Verdict::Approved => "Data berhasil di-approve",
            Verdict::Rejected => "Data berhasil ditolak",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Verdict::Approved => "Gagal approve data",
            Verdict::Rejected => "Gagal reject data",
        }
    }
}

/// Request DTO for approving or rejecting selected reports
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DecisionRequestDto {
    /// Selected report ids; an empty selection does nothing
    #[serde(default)]
    #[validate(length(max = 100, message = "Maksimal 100 data per permintaan"))]
    pub ids: Vec<String>,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DecisionFailureDto {
    pub id: String,
    pub message: String,
}

/// Per-row result of a bulk decision
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DecisionOutcomeDto {
    pub verdict: Verdict,
    pub succeeded: Vec<String>,
    pub failed: Vec<DecisionFailureDto>,
    /// Approval list re-read after the decisions; absent if that read failed
    /// or nothing was sent
    pub rows: Option<Vec<ApprovalRowDto>>,
}

impl DecisionOutcomeDto {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn message(&self) -> &'static str {
        if self.succeeded.is_empty() && self.failed.is_empty() {
            "Tidak ada data yang dipilih"
        } else if self.is_complete() {
            self.verdict.success_message()
        } else {
            self.verdict.failure_message()
        }
    }
}
