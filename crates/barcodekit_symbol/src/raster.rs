//! In-memory barcode rasterization.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use crate::code128::encode_modules;
use crate::spec::{ErrorSymbol, SpecRasterOptions};

const PX_DARK: Luma<u8> = Luma([0]);
const PX_LIGHT: Luma<u8> = Luma([255]);

/// Rasterize the Code128 symbol for `identifier` into a grayscale image.
///
/// Output depends only on `identifier` and `options`.
pub fn encode_image(
    identifier: &str,
    options: &SpecRasterOptions,
) -> Result<GrayImage, ErrorSymbol> {
    validate_raster_options(options)?;
    let symbol = encode_modules(identifier)?;

    let n_quiet_px = options.n_quiet_modules * options.px_per_module;
    let n_width_px = symbol.width_modules() as u32 * options.px_per_module + 2 * n_quiet_px;
    let mut img = GrayImage::from_pixel(n_width_px, options.px_height_bars, PX_LIGHT);

    for (n_module_start, n_module_len) in symbol.bars() {
        let n_x_start = n_quiet_px + n_module_start as u32 * options.px_per_module;
        let n_x_end = n_x_start + n_module_len as u32 * options.px_per_module;
        for x in n_x_start..n_x_end {
            for y in 0..options.px_height_bars {
                img.put_pixel(x, y, PX_DARK);
            }
        }
    }

    Ok(img)
}

/// Rasterize and PNG-encode the symbol for `identifier`.
pub fn encode_png(identifier: &str, options: &SpecRasterOptions) -> Result<Vec<u8>, ErrorSymbol> {
    let img = encode_image(identifier, options)?;
    let mut v_png = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut v_png), ImageFormat::Png)
        .map_err(|err| ErrorSymbol::Raster(format!("PNG encoding failed: {err}")))?;
    Ok(v_png)
}

fn validate_raster_options(options: &SpecRasterOptions) -> Result<(), ErrorSymbol> {
    if options.px_per_module == 0 {
        return Err(ErrorSymbol::Raster(
            "px_per_module must be >= 1.".to_string(),
        ));
    }
    if options.px_height_bars == 0 {
        return Err(ErrorSymbol::Raster(
            "px_height_bars must be >= 1.".to_string(),
        ));
    }
    Ok(())
}
