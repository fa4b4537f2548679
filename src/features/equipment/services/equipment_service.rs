use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::Session;
use crate::features::equipment::dtos::*;
use crate::modules::backend::models::{EquipmentPayload, EquipmentQuery, EquipmentRecord};
use crate::modules::backend::DashboardBackend;
use crate::shared::constants::{MAX_PAGE_SIZE, REPORT_FORM_PAGE_SIZE};

/// Service for the asset register
pub struct EquipmentService {
    backend: Arc<dyn DashboardBackend>,
}

impl EquipmentService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    /// List one page of assets.
    /// Returns (assets, total) where total is the backend's count.
    pub async fn list(
        &self,
        session: &Session,
        params: &ListEquipmentQuery,
    ) -> Result<(Vec<AssetDto>, i64)> {
        let query = EquipmentQuery {
            page: params.page.max(1),
            per_page: params.per_page.clamp(1, MAX_PAGE_SIZE),
            search: params.search.trim().to_string(),
        };

        let page = self
            .backend
            .list_equipment(session.bearer(), &query)
            .await
            .map_err(|e| e.or_external("Gagal memuat data equipment"))?;

        let assets = filter_by_name(
            page.items.into_iter().map(AssetDto::from).collect(),
            &query.search,
        );

        Ok((assets, page.total))
    }

    /// Manufacturers and their items, for the report form selectors
    pub async fn options(&self, session: &Session) -> Result<EquipmentOptionsDto> {
        let records = self.form_page(session).await?;
        Ok(build_options(&records))
    }

    /// Look up the asset a report refers to, by exact name and manufacturer
    pub async fn find(
        &self,
        session: &Session,
        nama: &str,
        manufaktur: &str,
    ) -> Result<Option<EquipmentRecord>> {
        let records = self.form_page(session).await?;
        Ok(records
            .into_iter()
            .find(|e| e.nama_item == nama && e.manufaktur == manufaktur))
    }

    async fn form_page(&self, session: &Session) -> Result<Vec<EquipmentRecord>> {
        let query = EquipmentQuery {
            page: 1,
            per_page: REPORT_FORM_PAGE_SIZE,
            search: String::new(),
        };

        let page = self
            .backend
            .list_equipment(session.bearer(), &query)
            .await
            .map_err(|e| e.or_external("Gagal memuat data equipment"))?;

        Ok(page.items)
    }

    pub async fn create(&self, session: &Session, dto: CreateAssetDto) -> Result<AssetDto> {
        let payload = EquipmentPayload::from(dto);
        let created = self
            .backend
            .create_equipment(session.bearer(), &payload)
            .await
            .map_err(|e| e.or_external("Gagal menambahkan item"))?;

        tracing::info!(
            "Asset {} ({}) registered by {}",
            payload.nama_item,
            payload.manufaktur,
            session.name
        );

        Ok(AssetDto::from(created))
    }

    pub async fn update(&self, session: &Session, id: &str, dto: UpdateAssetDto) -> Result<()> {
        let payload = EquipmentPayload::from(dto);
        self.backend
            .update_equipment(session.bearer(), id, &payload)
            .await
            .map_err(|e| e.or_external("Gagal memperbarui item"))?;

        tracing::info!("Asset {} updated by {}", id, session.name);
        Ok(())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.backend
            .delete_equipment(session.bearer(), id)
            .await
            .map_err(|e| e.or_external("Gagal menghapus item"))?;

        tracing::info!("Asset {} deleted by {}", id, session.name);
        Ok(())
    }
}

/// Case-insensitive name filter; an empty needle keeps everything
fn filter_by_name(assets: Vec<AssetDto>, needle: &str) -> Vec<AssetDto> {
    let needle = needle.to_lowercase();
    assets
        .into_iter()
        .filter(|a| a.nama.to_lowercase().contains(&needle))
        .collect()
}

fn build_options(records: &[EquipmentRecord]) -> EquipmentOptionsDto {
    let mut items: Vec<ManufacturerItemsDto> = Vec::new();

    for record in records {
        match items.iter_mut().find(|m| m.manufaktur == record.manufaktur) {
            Some(group) => {
                if !group.items.contains(&record.nama_item) {
                    group.items.push(record.nama_item.clone());
                }
            }
            None => items.push(ManufacturerItemsDto {
                manufaktur: record.manufaktur.clone(),
                items: vec![record.nama_item.clone()],
            }),
        }
    }

    EquipmentOptionsDto {
        manufacturers: items.iter().map(|m| m.manufaktur.clone()).collect(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{equipment, session_for, FakeBackend};

    fn admin() -> Session {
        session_for("admin", "Ani")
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let backend = FakeBackend::new();
        let service = EquipmentService::new(backend.clone());

        let created = service
            .create(
                &admin(),
                CreateAssetDto {
                    nama: "Proyektor".to_string(),
                    manufaktur: "Epson".to_string(),
                    jumlah: 3,
                    status: "Rusak".to_string(),
                    umur: 4,
                    created_at: "2026-10-01".to_string(),
                },
            )
            .await
            .unwrap();

        let params = ListEquipmentQuery {
            page: 1,
            per_page: 10,
            search: String::new(),
        };
        let (assets, total) = service.list(&admin(), &params).await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(assets, vec![created.clone()]);
        assert_eq!(created.nama, "Proyektor");
        assert_eq!(created.manufaktur, "Epson");
        assert_eq!(created.jumlah, 3);
        assert_eq!(created.status, "Rusak");
        assert_eq!(created.umur, Some(4));
        assert_eq!(created.riwayat, "4 tahun");
    }

    #[tokio::test]
    async fn test_list_sends_session_token_and_clamps_page_size() {
        let backend = FakeBackend::new();
        let service = EquipmentService::new(backend.clone());

        let params = ListEquipmentQuery {
            page: 0,
            per_page: 500,
            search: " lap ".to_string(),
        };
        service.list(&admin(), &params).await.unwrap();

        assert_eq!(backend.state().last_token.as_deref(), Some("token-admin"));
        assert_eq!(backend.count("list_equipment"), 1);
    }

    #[tokio::test]
    async fn test_options_group_items_by_manufacturer() {
        let backend = FakeBackend::new();
        backend.state().equipment = vec![
            equipment("1", "Laptop X1", "Acer", 2, "Baik"),
            equipment("2", "Printer L3110", "Epson", 1, "Rusak"),
            equipment("3", "Laptop X2", "Acer", 5, "Baik"),
        ];
        let service = EquipmentService::new(backend);

        let options = service.options(&admin()).await.unwrap();

        assert_eq!(options.manufacturers, vec!["Acer", "Epson"]);
        assert_eq!(options.items[0].items, vec!["Laptop X1", "Laptop X2"]);
        assert_eq!(options.items[1].items, vec!["Printer L3110"]);
    }

    #[tokio::test]
    async fn test_update_unknown_asset_is_not_found() {
        let service = EquipmentService::new(FakeBackend::new());
        let dto = UpdateAssetDto {
            nama: "Meja".to_string(),
            manufaktur: "Olympic".to_string(),
            jumlah: 1,
            status: "Baik".to_string(),
            umur: 1,
        };

        let result = service.update(&admin(), "missing", dto).await;
        assert!(matches!(
            result,
            Err(crate::core::error::AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let assets = vec![
            AssetDto::from(equipment("1", "Laptop X1", "Acer", 1, "Baik")),
            AssetDto::from(equipment("2", "Printer", "Epson", 1, "Baik")),
        ];

        let filtered = filter_by_name(assets.clone(), "LAP");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].nama, "Laptop X1");
        assert_eq!(filter_by_name(assets, "").len(), 2);
    }
}
