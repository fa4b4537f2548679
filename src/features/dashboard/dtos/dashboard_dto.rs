use serde::Serialize;
use utoipa::ToSchema;

/// One stat card at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatCardDto {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartSeriesDto {
    pub name: String,
    pub data: Vec<i64>,
}

/// Seven-day stacked area chart of report outcomes, oldest day first
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ApprovalChartDto {
    /// Day labels, e.g. "05 Okt"
    pub categories: Vec<String>,
    /// "Approve", "Reject" and "Belum Approve", one count per day
    pub series: Vec<ChartSeriesDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RatioSource {
    /// Taken from the backend's detail summary
    Summary,
    /// Computed from the asset list
    Computed,
}

/// Share of asset units in good condition
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LayakRatioDto {
    pub layak: i64,
    pub total: i64,
    /// Rounded percentage, 0 when there are no units
    pub percent: i64,
    pub source: RatioSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecentActivityDto {
    /// "Pelaporan {nama barang} oleh {pengaju}"
    pub title: String,
    /// e.g. "05 Okt 2026, 14.30"
    pub date: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub stats: Vec<StatCardDto>,
    pub chart: ApprovalChartDto,
    pub layak: LayakRatioDto,
    pub recent: Vec<RecentActivityDto>,
}
