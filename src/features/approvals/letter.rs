//! Approval request letter for a single report.

use chrono::{DateTime, FixedOffset};

use crate::core::config::LetterConfig;
use crate::modules::backend::models::ReportRecord;
use crate::modules::document::{Font, PdfPage};
use crate::shared::datetime::{parse_timestamp, tanggal_angka, tanggal_panjang};

const FONT_SIZE: f32 = 12.0;
const ROW_STEP: f32 = 8.0;

/// Download name of the letter, e.g. `Surat_Permohonan_Laptop X1.pdf`
pub fn letter_filename(nama_barang: &str) -> String {
    let nama = if nama_barang.is_empty() {
        "Barang"
    } else {
        nama_barang
    };
    format!("Surat_Permohonan_{}.pdf", nama)
}

fn local_date(
    raw: &str,
    offset: FixedOffset,
    render: fn(&DateTime<FixedOffset>) -> String,
) -> String {
    parse_timestamp(raw, offset)
        .map(|at| render(&at))
        .unwrap_or_default()
}

/// Lay out the letter. Missing fields render as empty text.
pub fn build_letter(
    report: &ReportRecord,
    config: &LetterConfig,
    offset: FixedOffset,
) -> PdfPage {
    let evidence = report.evidence.first();
    let user_maker = evidence.map(|e| e.user_maker.as_str()).unwrap_or("");
    let submitted_at = evidence.map(|e| e.created_at.as_str()).unwrap_or("");
    let status = evidence.map(|e| e.status_approve.as_str()).unwrap_or("");

    let letter_date = if submitted_at.is_empty() {
        local_date(&report.created_at, offset, tanggal_panjang)
    } else {
        local_date(submitted_at, offset, tanggal_panjang)
    };

    let mut page = PdfPage::a4();
    let normal = Font::Helvetica;
    let bold = Font::HelveticaBold;

    page.text(140.0, 20.0, normal, FONT_SIZE, &format!("{}, {}", config.city, letter_date));
    page.text(20.0, 30.0, normal, FONT_SIZE, &format!("No.: {}", config.number));

    page.text(20.0, 45.0, bold, FONT_SIZE, "Kepada Yth.");
    page.text(20.0, 52.0, bold, FONT_SIZE, &config.recipient_title);
    page.text(20.0, 59.0, bold, FONT_SIZE, &config.recipient_company);
    page.text(20.0, 66.0, bold, FONT_SIZE, "di Tempat");

    page.text(20.0, 78.0, bold, FONT_SIZE, "Perihal:");
    page.text(38.0, 78.0, bold, FONT_SIZE, "Permohonan Persetujuan Pelaporan Barang");

    page.text(20.0, 88.0, normal, FONT_SIZE, "Dengan hormat,");
    page.text(
        20.0,
        98.0,
        normal,
        FONT_SIZE,
        "Sehubungan dengan kebutuhan evaluasi kondisi aset, bersama surat ini kami mengajukan",
    );
    page.text(
        20.0,
        105.0,
        normal,
        FONT_SIZE,
        "permohonan persetujuan pelaporan barang sebagai berikut:",
    );

    let fields = [
        ("Nama Barang", report.nama_barang.as_str()),
        ("Manufaktur", report.manufaktur.as_str()),
        ("Riwayat Rusak", report.riwayat.as_str()),
        ("Kelayakan", report.kelayakan.as_deref().unwrap_or("")),
        ("Catatan", report.catatan.as_deref().unwrap_or("")),
    ];

    let mut y = 115.0;
    for (label, value) in fields {
        page.text(25.0, y, normal, FONT_SIZE, &format!("{} : {}", label, value));
        y += ROW_STEP;
    }

    y += 5.0;
    page.text(20.0, y, normal, FONT_SIZE, "Barang tersebut telah diajukan oleh:");
    y += ROW_STEP;
    page.text(25.0, y, normal, FONT_SIZE, &format!("Nama Pengaju  : {}", user_maker));
    y += ROW_STEP;
    page.text(
        25.0,
        y,
        normal,
        FONT_SIZE,
        &format!("Tanggal Ajuan : {}", local_date(submitted_at, offset, tanggal_angka)),
    );
    y += ROW_STEP;
    page.text(25.0, y, normal, FONT_SIZE, &format!("Status Approve: {}", status));
    y += 20.0;

    page.text(
        20.0,
        y,
        normal,
        FONT_SIZE,
        "Demikian surat permohonan ini kami sampaikan. Besar harapan kami untuk dapat memperoleh",
    );
    y += ROW_STEP;
    page.text(
        20.0,
        y,
        normal,
        FONT_SIZE,
        "persetujuan atas pelaporan barang tersebut. Atas perhatian dan kerja samanya, kami ucapkan terima kasih.",
    );
    y += 20.0;

    page.text(20.0, y, normal, FONT_SIZE, "Hormat kami,");
    y += 7.0;
    page.text(20.0, y, normal, FONT_SIZE, user_maker);
    page.text(20.0, y + 7.0, normal, FONT_SIZE, "Pengaju Pelaporan");

    page
}

/// Render the letter as PDF bytes
pub fn render_letter(
    report: &ReportRecord,
    config: &LetterConfig,
    offset: FixedOffset,
) -> Vec<u8> {
    let title = letter_filename(&report.nama_barang);
    build_letter(report, config, offset).render(title.trim_end_matches(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::document::pdf::winansi;
    use crate::shared::test_helpers::{evidence, report};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn letter_text(record: &ReportRecord) -> String {
        let bytes = render_letter(record, &LetterConfig::default(), wib());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_letter_filename() {
        assert_eq!(letter_filename("Laptop X1"), "Surat_Permohonan_Laptop X1.pdf");
        assert_eq!(letter_filename(""), "Surat_Permohonan_Barang.pdf");
    }

    #[test]
    fn test_letter_contains_report_fields() {
        let mut first = evidence("Budi", "menunggu approve", 1);
        first.created_at = "2026-10-04T20:30:00.000Z".to_string();
        let record = report("1", "Laptop X1", "", vec![first]);

        let pdf = letter_text(&record);

        // 20:30 UTC on the 4th is the 5th in WIB
        assert!(pdf.contains("(Prabumulih, 05 Oktober 2026) Tj"));
        assert!(pdf.contains("(No.: 0391/PLB-Pbm/V/2025) Tj"));
        assert!(pdf.contains("(Manajer Operasional) Tj"));
        assert!(pdf.contains("(PT. Titis Sampurna) Tj"));
        assert!(pdf.contains("(Nama Barang : Laptop X1) Tj"));
        assert!(pdf.contains("(Kelayakan : 80) Tj"));
        assert!(pdf.contains("(Catatan : ) Tj"));
        assert!(pdf.contains("(Nama Pengaju  : Budi) Tj"));
        assert!(pdf.contains("(Tanggal Ajuan : 5/10/2026) Tj"));
        assert!(pdf.contains("(Status Approve: menunggu approve) Tj"));
    }

    #[test]
    fn test_letter_without_evidence_renders_blanks() {
        let record = report("2", "", "bukan tanggal", vec![]);

        let pdf = letter_text(&record);

        assert!(pdf.contains("(Prabumulih, ) Tj"));
        assert!(pdf.contains("(Nama Pengaju  : ) Tj"));
        assert!(pdf.contains("(Tanggal Ajuan : ) Tj"));
        assert!(pdf.contains("/Title (Surat_Permohonan_Barang)"));
    }

    #[test]
    fn test_field_rows_step_down_the_page() {
        let record = report("3", "Meja", "", vec![]);
        let page = build_letter(&record, &LetterConfig::default(), wib());
        let pdf = String::from_utf8_lossy(&page.render("t")).into_owned();

        // y=115mm and y=123mm from the top of an A4 page
        assert!(pdf.contains("1 0 0 1 70.87 515.91 Tm\n(Nama Barang : Meja) Tj"));
        assert!(pdf.contains("1 0 0 1 70.87 493.23 Tm\n(Manufaktur : Acer) Tj"));
    }

    #[test]
    fn test_typographic_characters_keep_their_codes() {
        let mut record = report("4", "Laptop \u{2019}Asus\u{2019}", "", vec![]);
        record.catatan = Some("Layar retak \u{2014} biaya \u{20AC}5".to_string());

        let pdf = letter_text(&record);

        for line in [
            "Nama Barang : Laptop \u{2019}Asus\u{2019}",
            "Catatan : Layar retak \u{2014} biaya \u{20AC}5",
        ] {
            let encoded = winansi(line);
            assert!(!encoded.contains(&b'?'), "{} lost characters", line);
            let hex: String = encoded.iter().map(|b| format!("{:02X}", b)).collect();
            assert!(pdf.contains(&format!("<{}> Tj", hex)));
        }
    }
}
