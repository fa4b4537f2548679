use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::{not_blank, RIWAYAT_REGEX};

/// One uploaded photo attached to a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvidenceFileDto {
    #[validate(custom(function = "not_blank", message = "Nama file wajib diisi"))]
    pub name: String,
    /// Where the upload can be fetched; absent when only a preview existed
    #[serde(default)]
    pub url: Option<String>,
}

/// Request DTO for filing a report (Pelaporan Barang)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(custom(function = "not_blank", message = "Manufaktur wajib dipilih"))]
    pub manufaktur: String,

    #[validate(custom(function = "not_blank", message = "Nama barang wajib dipilih"))]
    pub nama_barang: String,

    /// Damage history: sangat-sering, pernah, tidak-sering or tidak-pernah
    #[validate(regex(path = *RIWAYAT_REGEX, message = "Riwayat rusak tidak valid"))]
    pub riwayat: String,

    /// Fitness score in percent
    #[validate(range(min = 1, max = 100, message = "Kelayakan harus antara 1 dan 100"))]
    pub kelayakan: i64,

    #[serde(default)]
    pub catatan: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub evidence: Vec<EvidenceFileDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSubmittedDto {
    pub nama_barang: String,
    pub manufaktur: String,
    /// Number of evidence entries sent with the report
    pub evidence_count: usize,
}
