//! Pagination geometry — slicing a captured surface into page-sized bands.
//!
//! The surface width always maps onto the usable page width (page minus
//! margins), so one band covers `usable_height / usable_width * surface_width`
//! surface pixels. Content length alone determines the page count; the final
//! band may be shorter than a full page and is placed at the top of its page
//! without stretching.

use super::ExportConfig;

/// Height in surface pixels of one page band.
pub fn band_height_px(surface_width: u32, config: &ExportConfig) -> u32 {
    let ratio = f64::from(config.usable_height_mm()) / f64::from(config.usable_width_mm());
    ((ratio * f64::from(surface_width)).floor() as u32).max(1)
}

/// Number of pages needed for a surface: `ceil(surface_height / band_height)`.
pub fn page_count(surface_height: u32, band_height: u32) -> u32 {
    surface_height.div_ceil(band_height)
}

/// Top-to-bottom band offsets as `(y, height)` pairs. Every band except
/// possibly the last has the full band height.
pub fn bands(surface_height: u32, band_height: u32) -> Vec<(u32, u32)> {
    (0..page_count(surface_height, band_height))
        .map(|page| {
            let y = page * band_height;
            (y, band_height.min(surface_height - y))
        })
        .collect()
}
