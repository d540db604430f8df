//! Page geometry constants, font metrics and layout presets.

use barcodekit_frame::COL_BARCODE;

use crate::spec::{SpecPageLayout, SpecPdfBarcodeStyle, SpecPdfColumn};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// A4 short edge in millimetres.
pub const N_MM_A4_SHORT: f32 = 210.0;
/// A4 long edge in millimetres.
pub const N_MM_A4_LONG: f32 = 297.0;

/// Helvetica advance widths (1/1000 em) for ASCII `0x20..=0x7E`.
pub const TUP_HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
/// Advance width used for characters outside the table.
pub const N_HELVETICA_WIDTH_DEFAULT: u16 = 556;

/// Title written into the PDF document information.
pub const C_PDF_TITLE: &str = "Artikelliste mit Barcodes";

fn derive_article_columns(l_offsets_mm: [f32; 11], n_chars_description: usize) -> Vec<SpecPdfColumn> {
    let [
        x_markt,
        x_art_nr,
        x_art_bez,
        x_menge,
        x_me,
        x_wert,
        x_vk_wert,
        x_spanne,
        x_ek_vk,
        x_gld,
        x_barcode,
    ] = l_offsets_mm;

    vec![
        SpecPdfColumn::text("Markt", x_markt, None),
        SpecPdfColumn::text("Art-Nr", x_art_nr, None),
        SpecPdfColumn::text("Art-Bez", x_art_bez, Some(n_chars_description)),
        SpecPdfColumn::number("Menge", x_menge, None),
        SpecPdfColumn::text("ME", x_me, None),
        SpecPdfColumn::number("Wert", x_wert, Some(2)),
        SpecPdfColumn::number("VK-Wert", x_vk_wert, Some(2)),
        SpecPdfColumn::number("Spanne", x_spanne, Some(2)),
        SpecPdfColumn::number("EK/VK", x_ek_vk, Some(3)),
        SpecPdfColumn::number("GLD", x_gld, Some(2)),
        SpecPdfColumn::barcode(COL_BARCODE, x_barcode),
    ]
}

/// A4 portrait table, 18 mm rows, offsets compressed to the 190 mm text block.
pub fn derive_pdf_layout_portrait() -> SpecPageLayout {
    SpecPageLayout {
        title: C_PDF_TITLE.to_string(),
        page_width_mm: N_MM_A4_SHORT,
        page_height_mm: N_MM_A4_LONG,
        x_margin_mm: 10.0,
        y_margin_mm: 15.0,
        line_height_mm: 18.0,
        font_size_header_pt: 8.0,
        font_size_body_pt: 7.0,
        numeric_pad_pt: 10.0,
        columns: derive_article_columns(
            [0.0, 14.0, 34.0, 78.0, 86.0, 94.0, 108.0, 122.0, 136.0, 150.0, 158.0],
            26,
        ),
        barcode: SpecPdfBarcodeStyle::default(),
    }
}

/// A4 landscape table with the full-width column offsets.
pub fn derive_pdf_layout_landscape() -> SpecPageLayout {
    SpecPageLayout {
        page_width_mm: N_MM_A4_LONG,
        page_height_mm: N_MM_A4_SHORT,
        columns: derive_article_columns(
            [0.0, 20.0, 45.0, 105.0, 115.0, 125.0, 140.0, 160.0, 180.0, 195.0, 210.0],
            60,
        ),
        ..derive_pdf_layout_portrait()
    }
}

/// A4 portrait, 10 mm rows, smaller type and bars.
pub fn derive_pdf_layout_compact() -> SpecPageLayout {
    SpecPageLayout {
        line_height_mm: 10.0,
        font_size_header_pt: 7.0,
        font_size_body_pt: 6.0,
        numeric_pad_pt: 8.0,
        barcode: SpecPdfBarcodeStyle {
            module_width_pt: 0.45,
            bar_height_mm: 6.0,
            nudge_pt: 1.5,
            n_quiet_modules: 10,
        },
        ..derive_pdf_layout_portrait()
    }
}
