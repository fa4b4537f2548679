use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::core::error::Result;
use crate::features::approvals::aggregator::aggregate;
use crate::features::auth::model::Session;
use crate::features::dashboard::derive::{
    approval_chart, computed_ratio, recent_activity, stat_cards, summary_ratio,
};
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::modules::backend::models::EquipmentQuery;
use crate::modules::backend::DashboardBackend;
use crate::shared::constants::REPORT_FORM_PAGE_SIZE;

/// Service behind the dashboard page
pub struct DashboardService {
    backend: Arc<dyn DashboardBackend>,
    utc_offset: FixedOffset,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn DashboardBackend>, utc_offset: FixedOffset) -> Self {
        Self {
            backend,
            utc_offset,
        }
    }

    pub async fn summary(&self, session: &Session) -> Result<DashboardSummaryDto> {
        self.summary_at(session, Utc::now()).await
    }

    /// Build every widget from one round of concurrent backend reads.
    ///
    /// Reports and assets are required. The two backend summaries only
    /// refine the numbers, so a failure there is logged and the values are
    /// derived from the rows instead.
    pub async fn summary_at(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummaryDto> {
        let token = session.bearer();
        let query = EquipmentQuery {
            page: 1,
            per_page: REPORT_FORM_PAGE_SIZE,
            search: String::new(),
        };

        let (required, summary, detail) = tokio::join!(
            async {
                tokio::try_join!(
                    self.backend.list_reports(token),
                    self.backend.list_equipment(token, &query)
                )
            },
            self.backend.equipment_summary(token),
            self.backend.equipment_detail_summary(token)
        );

        let (reports, assets) =
            required.map_err(|e| e.or_external("Gagal memuat data dashboard"))?;
        let assets = assets.items;
        let rows = aggregate(&reports);

        let summary = summary
            .inspect_err(|e| tracing::warn!("Equipment summary unavailable: {}", e))
            .ok();
        let layak = detail
            .inspect_err(|e| tracing::warn!("Equipment detail summary unavailable: {}", e))
            .ok()
            .and_then(|d| summary_ratio(&d))
            .unwrap_or_else(|| computed_ratio(&assets));

        let local_now = now.with_timezone(&self.utc_offset);

        Ok(DashboardSummaryDto {
            stats: stat_cards(summary.as_ref(), &rows, &assets),
            chart: approval_chart(&rows, local_now),
            layak,
            recent: recent_activity(&rows, self.utc_offset),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::dashboard::dtos::RatioSource;
    use crate::modules::backend::models::{EquipmentDetailSummary, EquipmentSummary};
    use crate::shared::test_helpers::{equipment, evidence, report, session_for, FakeBackend};
    use chrono::TimeZone;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn seeded() -> Arc<FakeBackend> {
        let backend = FakeBackend::new();
        {
            let mut state = backend.state();
            state.equipment = vec![
                equipment("EQ-1", "Laptop X1", "Acer", 4, "Baik"),
                equipment("EQ-2", "Meja", "Olympic", 1, "Rusak"),
            ];
            state.reports = vec![
                report(
                    "1",
                    "Laptop X1",
                    "2026-10-15T02:00:00.000Z",
                    vec![evidence("Budi", "approved", 1)],
                ),
                report(
                    "2",
                    "Meja",
                    "2026-10-16T02:00:00.000Z",
                    vec![evidence("Sari", "menunggu approve", 1)],
                ),
            ];
            state.reports[1].evidence[0].created_at = "2026-10-16T02:00:00.000Z".to_string();
        }
        backend
    }

    #[tokio::test]
    async fn test_summary_derives_when_backend_summaries_missing() {
        let backend = seeded();
        let service = DashboardService::new(backend.clone(), wib());
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 5, 0, 0).unwrap();

        let summary = service
            .summary_at(&session_for("atasan", "Pak Joko"), now)
            .await
            .unwrap();

        let values: Vec<i64> = summary.stats.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2, 5, 4, 1]);
        assert_eq!(summary.layak.source, RatioSource::Computed);
        assert_eq!(summary.layak.percent, 80);
        assert_eq!(summary.chart.categories.last().map(String::as_str), Some("17 Okt"));
        assert_eq!(summary.recent[0].title, "Pelaporan Meja oleh Sari");
        assert_eq!(backend.state().last_token.as_deref(), Some("token-atasan"));
        assert_eq!(backend.count("equipment_summary"), 1);
        assert_eq!(backend.count("equipment_detail_summary"), 1);
    }

    #[tokio::test]
    async fn test_summary_prefers_backend_numbers() {
        let backend = seeded();
        {
            let mut state = backend.state();
            state.summary = Some(EquipmentSummary {
                total_pelaporan: Some(43),
                total_asset: Some(120),
                total_layak: Some(100),
                total_tidak_layak: Some(20),
            });
            state.detail_summary = Some(EquipmentDetailSummary {
                jumlah_layak: Some(100),
                jumlah_total: Some(120),
                persentase_layak: None,
            });
        }
        let service = DashboardService::new(backend, wib());

        let summary = service
            .summary(&session_for("admin", "Ani"))
            .await
            .unwrap();

        let values: Vec<i64> = summary.stats.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![43, 120, 100, 20]);
        assert_eq!(summary.layak.source, RatioSource::Summary);
        assert_eq!(summary.layak.percent, 83);
    }

    #[tokio::test]
    async fn test_summary_fails_when_reports_unavailable() {
        let backend = seeded();
        backend.state().fail_report_listing = true;
        let service = DashboardService::new(backend, wib());

        let result = service.summary(&session_for("pegawai", "Budi")).await;

        match result {
            Err(AppError::ExternalServiceError(message)) => {
                assert_eq!(message, "Gagal memuat data dashboard")
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
