//! Raster capture — deterministic layout and rasterization of the render
//! tree onto an RGBA surface.
//!
//! Layout runs in logical pixels over the configured base width; the surface
//! is drawn at `capture_scale` supersampling so text stays sharp after the
//! page slices are scaled down into the PDF. Glyphs come from the 8x8
//! bitmap font tables, scaled per style.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

use super::{ExportConfig, ExportError};
use crate::tree::{Body, FileSection, FunctionSection, RenderTree};

/// Glyph cell is 8x8 source pixels.
const GLYPH: u32 = 8;
/// Uniform content padding, logical pixels.
const PADDING: u32 = 24;
/// Refuse to allocate surfaces beyond this many device pixels.
const MAX_SURFACE_PIXELS: u64 = 64_000_000;

const PAGE_BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HEADER_BG: Rgba<u8> = Rgba([37, 99, 235, 255]);
const HEADER_FG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HEADER_SUB: Rgba<u8> = Rgba([219, 234, 254, 255]);
const HEADING: Rgba<u8> = Rgba([31, 41, 55, 255]);
const BODY: Rgba<u8> = Rgba([75, 85, 99, 255]);
const ACCENT: Rgba<u8> = Rgba([37, 99, 235, 255]);
const MUTED: Rgba<u8> = Rgba([107, 114, 128, 255]);

/// Text style: glyph multiplier and color.
#[derive(Debug, Clone, Copy)]
struct Style {
    m: u32,
    color: Rgba<u8>,
}

const TITLE: Style = Style { m: 3, color: HEADER_FG };
const SUBTITLE: Style = Style { m: 2, color: HEADER_SUB };
const FILE_HEADING: Style = Style { m: 2, color: HEADING };
const SECTION_HEADING: Style = Style { m: 2, color: HEADING };
const FUNCTION_NAME: Style = Style { m: 2, color: ACCENT };
const SUB_HEADING: Style = Style { m: 1, color: HEADING };
const BODY_TEXT: Style = Style { m: 1, color: BODY };
const SMALL: Style = Style { m: 1, color: MUTED };

/// The captured raster surface of a rendered report.
#[derive(Debug)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Copy out one full-width horizontal band.
    pub fn slice(&self, y: u32, height: u32) -> RgbaImage {
        image::imageops::crop_imm(&self.image, 0, y, self.image.width(), height).to_image()
    }
}

/// Rasterize the render tree at the configured supersampling scale.
///
/// Deterministic: the same tree and config always produce the same pixels.
/// Fails only when the resulting surface would exceed the pixel cap.
pub fn capture(tree: &RenderTree, config: &ExportConfig) -> Result<Surface, ExportError> {
    let width = config.base_width_px.max(4 * PADDING);
    let (ops, height) = layout_tree(tree, width);

    let scale = config.capture_scale.max(1);
    let device_width = width * scale;
    let device_height = height.max(1) * scale;
    let pixels = u64::from(device_width) * u64::from(device_height);
    if pixels > MAX_SURFACE_PIXELS {
        return Err(ExportError::Capture(format!(
            "surface {}x{} exceeds the {} pixel cap",
            device_width, device_height, MAX_SURFACE_PIXELS
        )));
    }

    let mut image = RgbaImage::from_pixel(device_width, device_height, PAGE_BG);
    for op in &ops {
        match op {
            Op::Rect { y, height, color } => {
                fill_band(&mut image, y * scale, height * scale, *color);
            }
            Op::Text { y, x, style, text } => {
                draw_text(&mut image, x * scale, y * scale, style.m * scale, style.color, text);
            }
        }
    }

    Ok(Surface { image })
}

/// One drawing operation, positioned in logical pixels.
enum Op {
    Rect {
        y: u32,
        height: u32,
        color: Rgba<u8>,
    },
    Text {
        y: u32,
        x: u32,
        style: Style,
        text: String,
    },
}

struct Layout {
    width: u32,
    y: u32,
    ops: Vec<Op>,
}

impl Layout {
    fn new(width: u32) -> Self {
        Layout {
            width,
            y: 0,
            ops: Vec::new(),
        }
    }

    fn space(&mut self, height: u32) {
        self.y += height;
    }

    /// Word-wrap `text` at the style's column limit and emit one text op
    /// per line.
    fn block(&mut self, text: &str, style: Style, indent: u32) {
        let columns = self.columns(style, indent);
        for line in wrap(text, columns) {
            self.ops.push(Op::Text {
                y: self.y,
                x: PADDING + indent,
                style,
                text: line,
            });
            self.y += line_height(style.m);
        }
    }

    /// An empty paragraph keeps its vertical slot.
    fn blank_line(&mut self, style: Style) {
        self.y += line_height(style.m);
    }

    fn columns(&self, style: Style, indent: u32) -> usize {
        let content = self.width.saturating_sub(2 * PADDING + indent);
        ((content / (GLYPH * style.m)) as usize).max(1)
    }
}

fn line_height(m: u32) -> u32 {
    (GLYPH + 4) * m
}

fn layout_tree(tree: &RenderTree, width: u32) -> (Vec<Op>, u32) {
    let mut layout = Layout::new(width);

    // Header band: title and subtitle on the accent background.
    layout.space(PADDING);
    layout.block(&tree.title, TITLE, 0);
    layout.space(8);
    layout.block(&tree.subtitle, SUBTITLE, 0);
    layout.space(PADDING);
    let band = Op::Rect {
        y: 0,
        height: layout.y,
        color: HEADER_BG,
    };
    layout.ops.insert(0, band);
    layout.space(PADDING);

    match &tree.body {
        Body::Placeholder(message) => {
            layout.space(40);
            layout.block(message, SMALL, 0);
            layout.space(40);
        }
        Body::Files(files) => {
            for file in files {
                layout_file(&mut layout, file);
            }
        }
    }

    layout.space(8);
    layout.block(&format!("Generated on {}", tree.generated_at), SMALL, 0);
    layout.space(PADDING);

    (layout.ops, layout.y)
}

fn layout_file(layout: &mut Layout, file: &FileSection) {
    layout.block(&file.heading, FILE_HEADING, 0);
    if let Some(ref path) = file.path {
        layout.block(path, SMALL, 0);
    }
    layout.space(8);

    if let Some(ref paragraphs) = file.overview {
        layout.block("Overview", SECTION_HEADING, 0);
        layout.space(4);
        for paragraph in paragraphs {
            if paragraph.is_empty() {
                layout.blank_line(BODY_TEXT);
            } else {
                layout.block(paragraph, BODY_TEXT, 8);
            }
        }
        layout.space(8);
    }

    if let Some(ref functions) = file.functions {
        layout.block("Functions", SECTION_HEADING, 0);
        layout.space(4);
        for func in functions {
            layout_function(layout, func);
        }
    }

    layout.space(16);
}

fn layout_function(layout: &mut Layout, func: &FunctionSection) {
    layout.block(&func.name, FUNCTION_NAME, 8);

    if let Some(ref description) = func.description {
        layout.space(4);
        for line in description {
            layout.block(line, BODY_TEXT, 16);
        }
    }

    if let Some(ref parameters) = func.parameters {
        layout.space(4);
        layout.block("Parameters", SUB_HEADING, 16);
        for param in parameters {
            layout.block(&format!("- {}", param), BODY_TEXT, 24);
        }
    }

    if let Some(ref returns) = func.returns {
        layout.space(4);
        layout.block("Returns", SUB_HEADING, 16);
        for ret in returns {
            layout.block(&format!("- {}", ret), BODY_TEXT, 24);
        }
    }

    layout.space(12);
}

/// Greedy word wrap to `max_cols` columns; words longer than a line are
/// hard-broken. Empty or whitespace-only text yields a single blank line.
fn wrap(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if !current.is_empty() {
            if current_len + 1 + word_len <= max_cols {
                current.push(' ');
                current.push_str(word);
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        if word_len <= max_cols {
            current.push_str(word);
        } else {
            let chars: Vec<char> = word.chars().collect();
            let mut start = 0;
            while chars.len() - start > max_cols {
                lines.push(chars[start..start + max_cols].iter().collect());
                start += max_cols;
            }
            current = chars[start..].iter().collect();
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn fill_band(image: &mut RgbaImage, y: u32, height: u32, color: Rgba<u8>) {
    let (width, total) = image.dimensions();
    for yy in y..(y + height).min(total) {
        for xx in 0..width {
            image.put_pixel(xx, yy, color);
        }
    }
}

/// Draw a single pre-wrapped line. Characters outside the basic table fall
/// back to '?'.
fn draw_text(image: &mut RgbaImage, x: u32, y: u32, cell: u32, color: Rgba<u8>, text: &str) {
    let (width, height) = image.dimensions();
    for (i, ch) in text.chars().enumerate() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        let origin_x = x + (i as u32) * GLYPH * cell;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + col * cell;
                let py = y + (row as u32) * cell;
                for dy in 0..cell {
                    for dx in 0..cell {
                        let (xx, yy) = (px + dx, py + dy);
                        if xx < width && yy < height {
                            image.put_pixel(xx, yy, color);
                        }
                    }
                }
            }
        }
    }
}
