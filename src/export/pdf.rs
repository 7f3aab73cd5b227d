//! PDF assembly — one JPEG band per page, embedded as a DCT-encoded image
//! XObject and scaled onto the usable page area.

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

use super::ExportConfig;

const MM_TO_PT: f32 = 72.0 / 25.4;
const IMAGE_NAME: Name = Name(b"Im0");

/// One encoded page band.
pub struct PageImage {
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Assemble the page bands into a complete PDF document.
pub fn write_pdf(pages: &[PageImage], config: &ExportConfig) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let ids: Vec<(Ref, Ref, Ref)> = pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(ids.iter().map(|&(page_id, _, _)| page_id))
        .count(pages.len() as i32);

    let page_width = config.page_width_mm * MM_TO_PT;
    let page_height = config.page_height_mm * MM_TO_PT;
    let margin = config.margin_mm * MM_TO_PT;
    let content_width = config.usable_width_mm() * MM_TO_PT;

    for (band, &(page_id, image_id, content_id)) in pages.iter().zip(&ids) {
        // The band spans the usable width; its height follows the pixel
        // aspect ratio, so a partial final band simply ends higher up.
        let image_height = content_width * band.height_px as f32 / band.width_px as f32;
        let x = margin;
        let y = page_height - margin - image_height;

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources.x_objects().pair(IMAGE_NAME, image_id);
        resources.finish();
        page.finish();

        let mut image = pdf.image_xobject(image_id, &band.jpeg);
        image.filter(Filter::DctDecode);
        image.width(band.width_px as i32);
        image.height(band.height_px as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        let mut content = Content::new();
        content.save_state();
        content.transform([content_width, 0.0, 0.0, image_height, x, y]);
        content.x_object(IMAGE_NAME);
        content.restore_state();
        pdf.stream(content_id, &content.finish());
    }

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, RgbImage};

    fn jpeg_band(width: u32, height: u32) -> PageImage {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 200, 200]));
        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, 98);
        encoder
            .encode(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        PageImage {
            jpeg: buf,
            width_px: width,
            height_px: height,
        }
    }

    #[test]
    fn produces_a_pdf_header_and_trailer() {
        let bytes = write_pdf(&[jpeg_band(16, 16)], &ExportConfig::default());
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn embeds_the_jpeg_stream_directly() {
        let band = jpeg_band(16, 16);
        let jpeg = band.jpeg.clone();
        let bytes = write_pdf(&[band], &ExportConfig::default());
        assert!(bytes
            .windows(jpeg.len())
            .any(|window| window == jpeg.as_slice()));
    }

    #[test]
    fn one_entry_per_page() {
        let one = write_pdf(&[jpeg_band(16, 16)], &ExportConfig::default());
        let two = write_pdf(
            &[jpeg_band(16, 16), jpeg_band(16, 8)],
            &ExportConfig::default(),
        );
        assert!(two.len() > one.len());
    }

    #[test]
    fn empty_page_list_still_finishes() {
        let bytes = write_pdf(&[], &ExportConfig::default());
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
