//! PDF emitter for [`SpecPdfLayoutPlan`] built on `printpdf`.

use std::io::BufWriter;

use barcodekit_frame::{RenderError, Result};
use polars::prelude::DataFrame;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::conf::MM_PER_PT;
use crate::layout::plan_pdf_pages;
use crate::spec::{EnumPdfDrawOp, EnumPdfFont, SpecPageLayout, SpecPdfArtifact, SpecPdfLayoutPlan};

const C_LAYER_NAME: &str = "Layer 1";

/// Render the dataset into PDF bytes with `layout`.
///
/// The whole plan is built (and every identifier encoded) before any page
/// is emitted.
pub fn render_pdf(df: &DataFrame, layout: &SpecPageLayout) -> Result<SpecPdfArtifact> {
    tracing::info!(
        n_rows = df.height(),
        page_width_mm = layout.page_width_mm,
        page_height_mm = layout.page_height_mm,
        "rendering pdf"
    );

    let plan = plan_pdf_pages(df, layout)?;
    let v_bytes = write_pdf_plan(&plan, layout)?;

    tracing::info!(
        n_pages = plan.pages.len(),
        n_rows = plan.n_rows_data(),
        n_bytes = v_bytes.len(),
        "pdf rendered"
    );
    Ok(SpecPdfArtifact {
        bytes: v_bytes,
        n_pages: plan.pages.len(),
        n_rows_data: plan.n_rows_data(),
        warnings: plan.warnings,
    })
}

/// Emit a finished plan as one PDF document, one page per plan page.
pub fn write_pdf_plan(plan: &SpecPdfLayoutPlan, layout: &SpecPageLayout) -> Result<Vec<u8>> {
    let n_width = Mm(layout.page_width_mm);
    let n_height = Mm(layout.page_height_mm);
    let (doc, page_first, layer_first) =
        PdfDocument::new(layout.title.as_str(), n_width, n_height, C_LAYER_NAME);

    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (n_idx_page, page) in plan.pages.iter().enumerate() {
        let layer = if n_idx_page == 0 {
            doc.get_page(page_first).get_layer(layer_first)
        } else {
            let (page_idx, layer_idx) = doc.add_page(n_width, n_height, C_LAYER_NAME);
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

        for op in &page.ops {
            match op {
                EnumPdfDrawOp::Text {
                    x_mm,
                    y_mm,
                    text,
                    font,
                    size_pt,
                } => {
                    let font_ref: &IndirectFontRef = match font {
                        EnumPdfFont::Regular => &font_regular,
                        EnumPdfFont::Bold => &font_bold,
                    };
                    layer.use_text(text.as_str(), *size_pt, Mm(*x_mm), Mm(*y_mm), font_ref);
                }
                EnumPdfDrawOp::Bars {
                    y_mm,
                    height_mm,
                    bars,
                } => draw_bars(&layer, *y_mm, *height_mm, bars),
            }
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

// Each bar is a vertical stroke centred on the bar, as thick as the bar is wide.
fn draw_bars(layer: &PdfLayerReference, y_mm: f32, height_mm: f32, bars: &[(f32, f32)]) {
    for &(x_mm, width_mm) in bars {
        let n_x_mid = x_mm + width_mm / 2.0;
        layer.set_outline_thickness(width_mm / MM_PER_PT);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(n_x_mid), Mm(y_mm)), false),
                (Point::new(Mm(n_x_mid), Mm(y_mm + height_mm)), false),
            ],
            is_closed: false,
        });
    }
}
