use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::backend::models::{EquipmentPayload, EquipmentRecord};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::validation::{not_blank, KONDISI_REGEX};

/// Query params for listing equipment
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListEquipmentQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Items per page (default: 10, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: i64,

    /// Item name search; also applied locally on the returned page
    #[serde(default)]
    pub search: String,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// One asset as shown in the asset table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetDto {
    pub id: Option<String>,
    pub nama: String,
    pub manufaktur: String,
    pub jumlah: i64,
    /// Condition, "Baik" or "Rusak"
    pub status: String,
    pub umur: Option<i64>,
    /// Age rendered as "{umur} tahun"
    pub riwayat: String,
    pub created_at: String,
}

impl From<EquipmentRecord> for AssetDto {
    fn from(e: EquipmentRecord) -> Self {
        let riwayat = format!("{} tahun", e.umur.unwrap_or(0));
        Self {
            id: e.unique_id,
            nama: e.nama_item,
            manufaktur: e.manufaktur,
            jumlah: e.quantity.unwrap_or(0),
            status: e.kondisi_barang,
            umur: e.umur,
            riwayat,
            created_at: e.created_at,
        }
    }
}

/// Request DTO for registering an asset
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAssetDto {
    #[validate(custom(function = "not_blank", message = "Nama barang wajib diisi"))]
    pub nama: String,

    #[validate(custom(function = "not_blank", message = "Manufaktur wajib diisi"))]
    pub manufaktur: String,

    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah: i64,

    #[validate(regex(path = *KONDISI_REGEX, message = "Status harus Baik atau Rusak"))]
    pub status: String,

    #[validate(range(min = 0, message = "Umur tidak boleh negatif"))]
    pub umur: i64,

    /// Registration date, e.g. "2026-10-17"
    #[validate(custom(function = "not_blank", message = "Tanggal wajib diisi"))]
    pub created_at: String,
}

impl From<CreateAssetDto> for EquipmentPayload {
    fn from(dto: CreateAssetDto) -> Self {
        Self {
            nama_item: dto.nama.trim().to_string(),
            manufaktur: dto.manufaktur.trim().to_string(),
            quantity: dto.jumlah,
            kondisi_barang: dto.status,
            umur: dto.umur,
            created_at: Some(dto.created_at),
        }
    }
}

/// Request DTO for editing an asset
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAssetDto {
    #[validate(custom(function = "not_blank", message = "Nama barang wajib diisi"))]
    pub nama: String,

    #[validate(custom(function = "not_blank", message = "Manufaktur wajib diisi"))]
    pub manufaktur: String,

    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah: i64,

    #[validate(regex(path = *KONDISI_REGEX, message = "Status harus Baik atau Rusak"))]
    pub status: String,

    #[validate(range(min = 0, message = "Umur tidak boleh negatif"))]
    pub umur: i64,
}

impl From<UpdateAssetDto> for EquipmentPayload {
    fn from(dto: UpdateAssetDto) -> Self {
        Self {
            nama_item: dto.nama.trim().to_string(),
            manufaktur: dto.manufaktur.trim().to_string(),
            quantity: dto.jumlah,
            kondisi_barang: dto.status,
            umur: dto.umur,
            created_at: None,
        }
    }
}

/// Items registered under one manufacturer
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ManufacturerItemsDto {
    pub manufaktur: String,
    pub items: Vec<String>,
}

/// Selector data for the report form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentOptionsDto {
    /// Unique manufacturers in first-seen order
    pub manufacturers: Vec<String>,
    pub items: Vec<ManufacturerItemsDto>,
}
