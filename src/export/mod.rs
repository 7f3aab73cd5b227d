//! Export pipeline — raster capture, pagination, and PDF assembly with
//! single-flight concurrency control.
//!
//! The pipeline owns an explicit `Idle → Exporting → {Idle, Failed}` state
//! machine. While an export is in flight, further invocations are rejected
//! (never queued); a failed export surfaces one error and the next attempt
//! starts clean. The PDF is assembled fully in memory before anything is
//! written, so no partial artifact is ever visible.

pub mod capture;
pub mod paginate;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, RgbaImage};
use thiserror::Error;
use tracing::{error, info};

use crate::tree::RenderTree;

pub use capture::Surface;

/// Rasterization and page-geometry parameters.
///
/// Fixed, documented defaults: A4 portrait with uniform 10 mm margins, the
/// report captured at 2x supersampling over an 800 px base width, page bands
/// encoded as JPEG at quality 98. Library callers may tune the fields; the
/// CLI does not expose them.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub capture_scale: u32,
    pub jpeg_quality: u8,
    pub base_width_px: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            capture_scale: 2,
            jpeg_quality: 98,
            base_width_px: 800,
        }
    }
}

impl ExportConfig {
    /// Page width inside the margins.
    pub fn usable_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Page height inside the margins.
    pub fn usable_height_mm(&self) -> f32 {
        self.page_height_mm - 2.0 * self.margin_mm
    }

    /// Width of the captured surface in pixels.
    pub fn surface_width_px(&self) -> u32 {
        self.base_width_px * self.capture_scale
    }
}

/// Export state. `Failed` is not sticky: the next attempt transitions
/// straight to `Exporting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Exporting,
    Failed,
}

/// Metadata for one completed export. Transient; dropped once the caller has
/// reported it.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub pages: u32,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of an export invocation that did not fail.
#[derive(Debug)]
pub enum ExportOutcome {
    Exported(ExportArtifact),
    /// Another export was already in flight; this invocation was a no-op.
    Busy,
    /// No render tree exists yet; nothing to capture. A no-op, not an error.
    NothingToRender,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not rasterize the report: {0}")]
    Capture(String),
    #[error("could not encode page image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Single-flight export pipeline.
pub struct ExportPipeline {
    state: Mutex<ExportState>,
    config: ExportConfig,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig) -> Self {
        ExportPipeline {
            state: Mutex::new(ExportState::Idle),
            config,
        }
    }

    pub fn state(&self) -> ExportState {
        *self.lock_state()
    }

    /// Export the rendered tree as a paginated PDF at `dest`.
    ///
    /// At most one export is in flight at any time: a second invocation
    /// while one is running returns [`ExportOutcome::Busy`] without doing
    /// anything. With no tree rendered yet the call is likewise a no-op.
    /// Cancellation is not supported; a hung capture holds the busy state
    /// until it resolves.
    pub async fn export(
        &self,
        tree: Option<&RenderTree>,
        dest: &Path,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(tree) = tree else {
            return Ok(ExportOutcome::NothingToRender);
        };
        if !self.begin() {
            return Ok(ExportOutcome::Busy);
        }

        let tree = tree.clone();
        let config = self.config.clone();
        let dest = dest.to_path_buf();
        let result = tokio::task::spawn_blocking(move || run_export(&tree, &config, &dest)).await;
        let result = match result {
            Ok(inner) => inner,
            Err(join) => Err(ExportError::Capture(format!("export task aborted: {join}"))),
        };

        self.finish(result.is_ok());
        match &result {
            Ok(artifact) => info!(
                pages = artifact.pages,
                bytes = artifact.bytes,
                path = %artifact.path.display(),
                "export complete"
            ),
            Err(err) => error!(%err, "export failed"),
        }
        result.map(ExportOutcome::Exported)
    }

    /// Claim the in-flight slot. `Idle` and `Failed` transition to
    /// `Exporting`; an export already in flight is refused.
    fn begin(&self) -> bool {
        let mut state = self.lock_state();
        match *state {
            ExportState::Exporting => false,
            ExportState::Idle | ExportState::Failed => {
                *state = ExportState::Exporting;
                true
            }
        }
    }

    fn finish(&self, ok: bool) {
        let mut state = self.lock_state();
        *state = if ok {
            ExportState::Idle
        } else {
            ExportState::Failed
        };
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ExportState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Capture, paginate, encode and write — the blocking half of an export.
fn run_export(
    tree: &RenderTree,
    config: &ExportConfig,
    dest: &Path,
) -> Result<ExportArtifact, ExportError> {
    let surface = capture::capture(tree, config)?;
    info!(
        width = surface.width(),
        height = surface.height(),
        "captured report surface"
    );

    let band_height = paginate::band_height_px(surface.width(), config);
    let bands = paginate::bands(surface.height(), band_height);

    let mut pages = Vec::with_capacity(bands.len());
    for (y, height) in bands {
        let band = surface.slice(y, height);
        pages.push(pdf::PageImage {
            width_px: band.width(),
            height_px: band.height(),
            jpeg: encode_jpeg(band, config.jpeg_quality)?,
        });
    }

    let bytes = pdf::write_pdf(&pages, config);
    fs::write(dest, &bytes).map_err(|source| ExportError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(ExportArtifact {
        pages: pages.len() as u32,
        page_width_mm: config.page_width_mm,
        page_height_mm: config.page_height_mm,
        path: dest.to_path_buf(),
        bytes: bytes.len() as u64,
    })
}

/// Encode one page band as JPEG at the configured quality.
fn encode_jpeg(band: RgbaImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let rgb = DynamicImage::ImageRgba8(band).to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Artifact file name for a project: `"<name>.pdf"`, falling back to
/// `"documentation.pdf"` when the trimmed name is empty.
pub fn artifact_name(project_name: &str) -> String {
    let name = project_name.trim();
    if name.is_empty() {
        "documentation.pdf".to_string()
    } else {
        format!("{}.pdf", name.replace(['/', '\\'], "-"))
    }
}
