//! Timestamp parsing and Indonesian (id-ID) date formatting.
//!
//! Backend timestamps are strings in whatever shape the backend produced:
//! RFC 3339 from the browser (`2025-05-20T03:15:00.000Z`), Laravel's
//! `2025-05-20T03:15:00.000000Z`, or a bare `2025-05-20 03:15:00` that is
//! read as wall-clock time at the dashboard's UTC offset. A date on its own
//! is midnight UTC.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Timelike,
    Utc,
};

const BULAN_PANJANG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const BULAN_SINGKAT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Parse a backend timestamp into `local` time. Empty or unrecognised input
/// yields `None`.
pub fn parse_timestamp(raw: &str, local: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&local));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local.from_local_datetime(&naive).single();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&local))
}

/// `toISOString()`-style rendering: millisecond precision, `Z` suffix
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Long date, e.g. `05 Oktober 2026`
pub fn tanggal_panjang<T: Datelike>(date: &T) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        BULAN_PANJANG[date.month0() as usize],
        date.year()
    )
}

/// Numeric date without padding, e.g. `5/10/2026`
pub fn tanggal_angka<T: Datelike>(date: &T) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Chart axis label, e.g. `05 Okt`
pub fn label_hari<T: Datelike>(date: &T) -> String {
    format!("{:02} {}", date.day(), BULAN_SINGKAT[date.month0() as usize])
}

/// Activity feed timestamp, e.g. `05 Okt 2026, 14.30`
pub fn tanggal_waktu<T: Datelike + Timelike>(at: &T) -> String {
    format!(
        "{:02} {} {}, {:02}.{:02}",
        at.day(),
        BULAN_SINGKAT[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}
