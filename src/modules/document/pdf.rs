//! Single-page PDF documents with a fixed layout.
//!
//! Text is placed at absolute positions given in millimetres from the
//! top-left corner, the coordinate system the letter layout was designed in.
//! Only the two standard Helvetica faces are used, so nothing is embedded;
//! strings are encoded to WinAnsi for them.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const POINTS_PER_MM: f32 = 72.0 / 25.4;

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const PAGE_ID: Ref = Ref::new(3);
const REGULAR_FONT_ID: Ref = Ref::new(4);
const BOLD_FONT_ID: Ref = Ref::new(5);
const CONTENT_ID: Ref = Ref::new(6);
const INFO_ID: Ref = Ref::new(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    fn resource_name(self) -> Name<'static> {
        match self {
            Font::Helvetica => Name(b"F1"),
            Font::HelveticaBold => Name(b"F2"),
        }
    }

    fn base_font(self) -> Name<'static> {
        match self {
            Font::Helvetica => Name(b"Helvetica"),
            Font::HelveticaBold => Name(b"Helvetica-Bold"),
        }
    }

    fn object_id(self) -> Ref {
        match self {
            Font::Helvetica => REGULAR_FONT_ID,
            Font::HelveticaBold => BOLD_FONT_ID,
        }
    }
}

#[derive(Debug, Clone)]
struct TextRun {
    x_mm: f32,
    y_mm: f32,
    font: Font,
    size: f32,
    text: String,
}

#[derive(Debug, Clone)]
pub struct PdfPage {
    width_mm: f32,
    height_mm: f32,
    runs: Vec<TextRun>,
}

impl PdfPage {
    pub fn a4() -> Self {
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            runs: Vec::new(),
        }
    }

    /// Place `text` with its baseline at (`x_mm`, `y_mm`) from the top-left
    pub fn text(&mut self, x_mm: f32, y_mm: f32, font: Font, size: f32, text: &str) {
        self.runs.push(TextRun {
            x_mm,
            y_mm,
            font,
            size,
            text: text.to_string(),
        });
    }

    fn content_stream(&self) -> Vec<u8> {
        let page_height_pt = self.height_mm * POINTS_PER_MM;
        let mut content = Content::new();

        for run in &self.runs {
            let x = points(run.x_mm * POINTS_PER_MM);
            let y = points(page_height_pt - run.y_mm * POINTS_PER_MM);
            let encoded = winansi(&run.text);

            content.begin_text();
            content.set_font(run.font.resource_name(), run.size);
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
            content.show(Str(encoded.as_slice()));
            content.end_text();
        }

        content.finish()
    }

    /// Serialize the page into a complete PDF file
    pub fn render(&self, title: &str) -> Vec<u8> {
        let mut pdf = Pdf::new();
        pdf.set_version(1, 4);

        pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
        pdf.pages(PAGE_TREE_ID).kids([PAGE_ID]).count(1);

        let mut page = pdf.page(PAGE_ID);
        page.parent(PAGE_TREE_ID);
        page.media_box(Rect::new(
            0.0,
            0.0,
            points(self.width_mm * POINTS_PER_MM),
            points(self.height_mm * POINTS_PER_MM),
        ));
        page.contents(CONTENT_ID);
        page.resources()
            .fonts()
            .pair(Font::Helvetica.resource_name(), REGULAR_FONT_ID)
            .pair(Font::HelveticaBold.resource_name(), BOLD_FONT_ID);
        page.finish();

        for font in [Font::Helvetica, Font::HelveticaBold] {
            pdf.type1_font(font.object_id())
                .base_font(font.base_font())
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let content = self.content_stream();
        pdf.stream(CONTENT_ID, &content);

        pdf.document_info(INFO_ID)
            .title(TextStr(title))
            .producer(TextStr("asset-dashboard"));

        pdf.finish()
    }
}

/// Round to hundredths of a point
fn points(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Encode text for a font using `WinAnsiEncoding`.
///
/// Latin-1 maps to itself, the typographic characters WinAnsi places in
/// 0x80..=0x9F map to their codes, and anything else becomes `?`. Line
/// breaks and tabs become spaces.
pub fn winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\n' | '\r' | '\t' => b' ',
            c if (c as u32) < 0x80 && !c.is_ascii_control() => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            c => winansi_high(c).unwrap_or(b'?'),
        })
        .collect()
}

fn winansi_high(ch: char) -> Option<u8> {
    let code = match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code)
}
