//! Turns backend reports into approval table rows.
//!
//! The first evidence entry of a report is the one that carries its
//! approval status. Reports without evidence are still in progress.

use crate::features::approvals::dtos::ApprovalRowDto;
use crate::modules::backend::models::ReportRecord;
use crate::shared::constants::{STATUS_DALAM_PROSES, UNKNOWN_SUBMITTER};

/// Coarse approval state used for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalState {
    Approved,
    Rejected,
    Pending,
}

/// Classify a status label. Anything that is not an approval or a
/// rejection (including "menunggu approve" and "Dalam Proses") is pending.
pub fn classify(status: &str) -> ApprovalState {
    match status.trim().to_lowercase().as_str() {
        "approved" | "approve" => ApprovalState::Approved,
        "rejected" | "reject" => ApprovalState::Rejected,
        _ => ApprovalState::Pending,
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

pub fn to_row(report: &ReportRecord) -> ApprovalRowDto {
    let first = report.evidence.first();

    ApprovalRowDto {
        id: report.id.clone(),
        nama_barang: report.nama_barang.clone(),
        user_maker: first
            .and_then(|e| non_empty(&e.user_maker))
            .unwrap_or(UNKNOWN_SUBMITTER)
            .to_string(),
        created_at: first
            .and_then(|e| non_empty(&e.created_at))
            .unwrap_or(&report.created_at)
            .to_string(),
        status_approve: first
            .and_then(|e| non_empty(&e.status_approve))
            .unwrap_or(STATUS_DALAM_PROSES)
            .to_string(),
        tanggal_approve: first
            .and_then(|e| e.tanggal_approve.as_deref())
            .and_then(non_empty)
            .map(String::from),
        url_gambar: first
            .and_then(|e| e.url.clone())
            .unwrap_or_default(),
    }
}

/// Whether the evidence list is ordered by approval sequence
fn evidence_in_sequence(report: &ReportRecord) -> bool {
    let sequences: Vec<i64> = report
        .evidence
        .iter()
        .filter_map(|e| e.approval_sequence)
        .collect();
    sequences.windows(2).all(|pair| pair[0] <= pair[1])
}

pub fn aggregate(reports: &[ReportRecord]) -> Vec<ApprovalRowDto> {
    reports
        .iter()
        .map(|report| {
            if !evidence_in_sequence(report) {
                tracing::warn!(
                    "Report {} has evidence out of approval order; showing the first entry",
                    report.id.as_deref().unwrap_or("?")
                );
            }
            to_row(report)
        })
        .collect()
}

/// Keep rows whose item name or submitter contains `query`, ignoring case
pub fn filter_rows(rows: Vec<ApprovalRowDto>, query: &str) -> Vec<ApprovalRowDto> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| {
            row.nama_barang.to_lowercase().contains(&needle)
                || row.user_maker.to_lowercase().contains(&needle)
        })
        .collect()
}
