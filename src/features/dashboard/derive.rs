//! Pure derivations behind the dashboard widgets.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::features::approvals::aggregator::{classify, ApprovalState};
use crate::features::approvals::dtos::ApprovalRowDto;
use crate::features::dashboard::dtos::*;
use crate::modules::backend::models::{EquipmentDetailSummary, EquipmentRecord, EquipmentSummary};
use crate::shared::datetime::{label_hari, parse_timestamp, tanggal_waktu};

pub const CHART_DAYS: usize = 7;
const RECENT_LIMIT: usize = 4;
const KONDISI_LAYAK: &str = "Baik";

fn local_day(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    parse_timestamp(raw, offset).map(|at| at.date_naive())
}

/// Count report outcomes for today and the six days before it.
///
/// A row belongs to the local calendar day its `created_at` falls on; rows
/// outside the window or with unreadable dates are not counted.
pub fn approval_chart(rows: &[ApprovalRowDto], now: DateTime<FixedOffset>) -> ApprovalChartDto {
    let offset = *now.offset();
    let today = now.date_naive();
    let days: Vec<NaiveDate> = (0..CHART_DAYS)
        .rev()
        .map(|back| today - Duration::days(back as i64))
        .collect();

    let mut approved = vec![0; CHART_DAYS];
    let mut rejected = vec![0; CHART_DAYS];
    let mut pending = vec![0; CHART_DAYS];

    for row in rows {
        let Some(day) = local_day(&row.created_at, offset) else {
            continue;
        };
        let Some(index) = days.iter().position(|d| *d == day) else {
            continue;
        };

        match classify(&row.status_approve) {
            ApprovalState::Approved => approved[index] += 1,
            ApprovalState::Rejected => rejected[index] += 1,
            ApprovalState::Pending => pending[index] += 1,
        }
    }

    ApprovalChartDto {
        categories: days.iter().map(label_hari).collect(),
        series: vec![
            ChartSeriesDto {
                name: "Approve".to_string(),
                data: approved,
            },
            ChartSeriesDto {
                name: "Reject".to_string(),
                data: rejected,
            },
            ChartSeriesDto {
                name: "Belum Approve".to_string(),
                data: pending,
            },
        ],
    }
}

fn percent(layak: i64, total: i64) -> i64 {
    if total > 0 {
        ((layak as f64 / total as f64) * 100.0).round() as i64
    } else {
        0
    }
}

/// (layak units, total units) over an asset list
fn unit_counts(assets: &[EquipmentRecord]) -> (i64, i64) {
    assets.iter().fold((0, 0), |(layak, total), asset| {
        let quantity = asset.quantity.unwrap_or(0);
        if asset.kondisi_barang == KONDISI_LAYAK {
            (layak + quantity, total + quantity)
        } else {
            (layak, total + quantity)
        }
    })
}

pub fn computed_ratio(assets: &[EquipmentRecord]) -> LayakRatioDto {
    let (layak, total) = unit_counts(assets);
    LayakRatioDto {
        layak,
        total,
        percent: percent(layak, total),
        source: RatioSource::Computed,
    }
}

/// Ratio as reported by the backend, if the summary carries one
pub fn summary_ratio(summary: &EquipmentDetailSummary) -> Option<LayakRatioDto> {
    let layak = summary.jumlah_layak.unwrap_or(0);
    let total = summary.jumlah_total.unwrap_or(0);

    let percent = match (summary.persentase_layak, summary.jumlah_total) {
        (Some(p), _) if p.is_finite() => p.round() as i64,
        (_, Some(_)) => percent(layak, total),
        _ => return None,
    };

    Some(LayakRatioDto {
        layak,
        total,
        percent,
        source: RatioSource::Summary,
    })
}

/// The four stat cards. Backend summary values win; missing ones are
/// derived from the fetched rows and assets.
pub fn stat_cards(
    summary: Option<&EquipmentSummary>,
    rows: &[ApprovalRowDto],
    assets: &[EquipmentRecord],
) -> Vec<StatCardDto> {
    let (layak, total) = unit_counts(assets);
    let pick = |value: Option<i64>, fallback: i64| value.unwrap_or(fallback);

    let cards = [
        (
            "Total Pelaporan",
            pick(summary.and_then(|s| s.total_pelaporan), rows.len() as i64),
        ),
        (
            "Total Asset Tercatat",
            pick(summary.and_then(|s| s.total_asset), total),
        ),
        (
            "Total Asset Layak",
            pick(summary.and_then(|s| s.total_layak), layak),
        ),
        (
            "Total Asset Tidak Layak",
            pick(summary.and_then(|s| s.total_tidak_layak), total - layak),
        ),
    ];

    cards
        .into_iter()
        .map(|(label, value)| StatCardDto {
            label: label.to_string(),
            value,
        })
        .collect()
}

/// The most recent reports, newest first
pub fn recent_activity(rows: &[ApprovalRowDto], offset: FixedOffset) -> Vec<RecentActivityDto> {
    let mut dated: Vec<(Option<DateTime<FixedOffset>>, &ApprovalRowDto)> = rows
        .iter()
        .map(|row| {
            let at = parse_timestamp(&row.created_at, offset);
            (at, row)
        })
        .collect();

    // Undated rows sort last
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    dated
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|(at, row)| RecentActivityDto {
            title: format!("Pelaporan {} oleh {}", row.nama_barang, row.user_maker),
            date: at.map(|t| tanggal_waktu(&t)).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn row(nama: &str, user: &str, created_at: &str, status: &str) -> ApprovalRowDto {
        ApprovalRowDto {
            id: None,
            nama_barang: nama.to_string(),
            user_maker: user.to_string(),
            created_at: created_at.to_string(),
            status_approve: status.to_string(),
            tanggal_approve: None,
            url_gambar: String::new(),
        }
    }

    fn asset(quantity: Option<i64>, kondisi: &str) -> EquipmentRecord {
        EquipmentRecord {
            quantity,
            kondisi_barang: kondisi.to_string(),
            ..Default::default()
        }
    }

    fn series<'a>(chart: &'a ApprovalChartDto, name: &str) -> &'a [i64] {
        &chart
            .series
            .iter()
            .find(|s| s.name == name)
            .expect("series present")
            .data
    }

    #[test]
    fn test_chart_has_seven_consecutive_days_ending_today() {
        let now = wib().with_ymd_and_hms(2026, 10, 3, 9, 0, 0).unwrap();
        let chart = approval_chart(&[], now);

        assert_eq!(
            chart.categories,
            vec!["27 Sep", "28 Sep", "29 Sep", "30 Sep", "01 Okt", "02 Okt", "03 Okt"]
        );
        for s in &chart.series {
            assert_eq!(s.data, vec![0; 7]);
        }
    }

    #[test]
    fn test_chart_buckets_by_local_day_and_status() {
        let now = wib().with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let rows = vec![
            // 16 Oct 18:00 UTC is 17 Oct 01:00 WIB
            row("A", "Budi", "2026-10-16T18:00:00.000Z", "approved"),
            row("B", "Budi", "2026-10-17T02:00:00.000Z", "Reject"),
            row("C", "Sari", "2026-10-17T03:00:00.000Z", "menunggu approve"),
            row("D", "Sari", "2026-10-11T01:00:00.000Z", "Dalam Proses"),
            // outside the window
            row("E", "Sari", "2026-10-10T01:00:00.000Z", "approved"),
            row("F", "Sari", "bukan tanggal", "approved"),
        ];

        let chart = approval_chart(&rows, now);

        assert_eq!(series(&chart, "Approve"), &[0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(series(&chart, "Reject"), &[0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(series(&chart, "Belum Approve"), &[1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_bare_datetimes_use_the_local_clock() {
        let now = wib().with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let rows = vec![
            // read as UTC this would be 17 Oct 06:30 WIB
            row("A", "Budi", "2026-10-16 23:30:00", "approved"),
            row("B", "Budi", "2026-10-17 00:15:00", "approved"),
        ];

        let chart = approval_chart(&rows, now);
        assert_eq!(series(&chart, "Approve"), &[0, 0, 0, 0, 0, 1, 1]);

        let recent = recent_activity(&rows, wib());
        assert_eq!(recent[0].date, "17 Okt 2026, 00.15");
        assert_eq!(recent[1].date, "16 Okt 2026, 23.30");
    }

    #[test]
    fn test_chart_day_totals_match_row_counts() {
        let now = wib().with_ymd_and_hms(2026, 10, 17, 23, 59, 0).unwrap();
        let statuses = ["approved", "rejected", "menunggu approve", "Approve", ""];
        let rows: Vec<ApprovalRowDto> = (0..35)
            .map(|i| {
                let at = now - Duration::hours(i * 4);
                row(
                    "X",
                    "Y",
                    &at.to_rfc3339(),
                    statuses[(i as usize) % statuses.len()],
                )
            })
            .collect();

        let chart = approval_chart(&rows, now);

        for (index, day) in (0..7).rev().map(|b| now.date_naive() - Duration::days(b)).enumerate() {
            let expected = rows
                .iter()
                .filter(|r| local_day(&r.created_at, wib()) == Some(day))
                .count() as i64;
            let counted: i64 = chart.series.iter().map(|s| s.data[index]).sum();
            assert_eq!(counted, expected, "day {}", day);
        }
    }

    #[test]
    fn test_computed_ratio() {
        let assets = vec![
            asset(Some(3), "Baik"),
            asset(Some(1), "Rusak"),
            asset(None, "Baik"),
        ];
        let ratio = computed_ratio(&assets);
        assert_eq!((ratio.layak, ratio.total, ratio.percent), (3, 4, 75));
        assert_eq!(ratio.source, RatioSource::Computed);

        assert_eq!(computed_ratio(&[]).percent, 0);
        assert_eq!(computed_ratio(&[asset(Some(2), "Rusak"), asset(Some(1), "Baik")]).percent, 33);
    }

    #[test]
    fn test_summary_ratio() {
        let summary = EquipmentDetailSummary {
            jumlah_layak: Some(2),
            jumlah_total: Some(3),
            persentase_layak: None,
        };
        let ratio = summary_ratio(&summary).unwrap();
        assert_eq!(ratio.percent, 67);
        assert_eq!(ratio.source, RatioSource::Summary);

        let explicit = EquipmentDetailSummary {
            persentase_layak: Some(42.4),
            ..Default::default()
        };
        assert_eq!(summary_ratio(&explicit).unwrap().percent, 42);

        assert!(summary_ratio(&EquipmentDetailSummary::default()).is_none());
    }

    #[test]
    fn test_stat_cards_fall_back_to_fetched_data() {
        let rows = vec![row("A", "B", "", ""), row("C", "D", "", "")];
        let assets = vec![asset(Some(5), "Baik"), asset(Some(2), "Rusak")];

        let cards = stat_cards(None, &rows, &assets);
        let values: Vec<i64> = cards.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![2, 7, 5, 2]);
        assert_eq!(cards[1].label, "Total Asset Tercatat");

        let summary = EquipmentSummary {
            total_pelaporan: Some(43),
            total_asset: None,
            total_layak: Some(10),
            total_tidak_layak: Some(20),
        };
        let values: Vec<i64> = stat_cards(Some(&summary), &rows, &assets)
            .iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec![43, 7, 10, 20]);
    }

    #[test]
    fn test_recent_activity_newest_first() {
        let rows = vec![
            row("Meja", "Budi", "2026-10-14T01:00:00.000Z", ""),
            row("Kursi", "Sari", "", ""),
            row("Laptop X1", "Budi", "2026-10-17T07:30:00.000Z", ""),
            row("Printer", "Dewi", "2026-10-15T01:00:00.000Z", ""),
            row("Proyektor", "Ani", "2026-10-16T01:00:00.000Z", ""),
        ];

        let recent = recent_activity(&rows, wib());

        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].title, "Pelaporan Laptop X1 oleh Budi");
        assert_eq!(recent[0].date, "17 Okt 2026, 14.30");
        assert_eq!(recent[1].title, "Pelaporan Proyektor oleh Ani");
        assert_eq!(recent[3].title, "Pelaporan Meja oleh Budi");
    }
}
