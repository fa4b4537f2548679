//! Wire shapes of the external REST backend.
//!
//! Field names follow the backend verbatim (including the camelCase
//! `namaBarang` on reports). Everything that is read is tolerant of
//! missing/null values; everything that is written is exact.

use serde::{Deserialize, Serialize};

use crate::shared::types::{lenient_bool, lenient_i64, lenient_string, null_as_default};

/// Standard `{ data, message, meta }` envelope returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub meta: Option<BackendMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendMeta {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total: Option<i64>,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub message: String,
}

/// One page of a paginated listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub data: LoginData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// =============================================================================
// EQUIPMENT
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub unique_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nama_item: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manufaktur: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kondisi_barang: String,
    /// Age in months
    #[serde(default, deserialize_with = "lenient_i64")]
    pub umur: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct EquipmentQuery {
    pub page: i64,
    pub per_page: i64,
    pub search: String,
}

impl EquipmentQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("search", self.search.clone()),
        ]
    }
}

/// Body for `POST /equipment` and `PUT /equipment/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentPayload {
    pub nama_item: String,
    pub manufaktur: String,
    pub quantity: i64,
    pub kondisi_barang: String,
    pub umur: i64,
    /// Only sent on create; the edit form keeps the original date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// =============================================================================
// REPORTS (approval-pelaporan)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manufaktur: String,
    #[serde(rename = "namaBarang", default, deserialize_with = "null_as_default")]
    pub nama_barang: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub riwayat: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub kelayakan: Option<String>,
    #[serde(default)]
    pub catatan: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evidence: Vec<EvidenceRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_maker: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_approve: String,
    #[serde(default)]
    pub tanggal_approve: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub approval_sequence: Option<i64>,
}

/// Body for `POST /approval-pelaporan`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReportPayload {
    pub manufaktur: String,
    #[serde(rename = "namaBarang")]
    pub nama_barang: String,
    pub riwayat: String,
    pub kelayakan: i64,
    pub catatan: String,
    pub evidence: Vec<NewEvidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvidence {
    pub name: String,
    /// Serialized as `null` when the entry carries no image
    pub url: Option<String>,
    pub user_maker: String,
    pub status_approve: String,
    pub approval_sequence: i64,
    pub created_at: String,
}

/// Body for `PUT /approval-pelaporan/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDecisionPayload {
    pub status_approve: String,
    pub tanggal_approve: String,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
}

/// Body for `POST /users` and `PUT /users/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub role: String,
    /// Backend expects 1/0 rather than a JSON boolean
    pub is_active: u8,
}

// =============================================================================
// SUMMARIES
// =============================================================================

/// `GET /equipment-summary`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentSummary {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_pelaporan: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_asset: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_layak: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_tidak_layak: Option<i64>,
}

/// `GET /equipment-detail-summary`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentDetailSummary {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub jumlah_layak: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub jumlah_total: Option<i64>,
    /// Ratio in percent (0-100) when the backend computes it
    #[serde(default)]
    pub persentase_layak: Option<f64>,
}
