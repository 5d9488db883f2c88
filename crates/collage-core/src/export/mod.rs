//! Turning a collage into a downloadable file.
//!
//! # Pipeline
//!
//! 1. Refuse up front when no frame of the current layout has an image.
//! 2. Pick the output size from the aspect ratio's export base and the
//!    resolution tier.
//! 3. Recompute frames at that size, with the border scaled by
//!    `output width / preview width`.
//! 4. Acquire every occupied frame's bitmap concurrently. A failed
//!    acquisition is logged and the frame renders empty; the rest of the
//!    export continues.
//! 5. Composite in frame order, encode, and name the file.
//!
//! [`ExportPipeline`] wraps this with a single-flight guard.

mod source;

use std::cell::Cell;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::aspect::AspectRatio;
use crate::decode::DecodedImage;
use crate::encode::{encode, EncodeError, ExportFormat};
use crate::layout::{FrameId, LayoutError};
use crate::placement::ImagePlacement;
use crate::render::{render, FrameImage, InterpolationFilter, Scene, Surface};
use crate::session::CollageState;

pub use source::{AcquireError, ImageSource, ImageStore};

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Errors that abort an export. Per-frame acquisition failures do not.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: no frame has an image")]
    NothingToExport,

    #[error("An export is already running")]
    Busy,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Output size relative to the aspect ratio's export base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionTier {
    /// Half size.
    Medium,
    #[default]
    High,
    /// Double size.
    Ultra,
}

impl ResolutionTier {
    pub const ALL: [ResolutionTier; 3] = [
        ResolutionTier::Medium,
        ResolutionTier::High,
        ResolutionTier::Ultra,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ResolutionTier::Medium => 0.5,
            ResolutionTier::High => 1.0,
            ResolutionTier::Ultra => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResolutionTier::Medium => "Medium",
            ResolutionTier::High => "High",
            ResolutionTier::Ultra => "Ultra",
        }
    }

    /// Output `(width, height)` for `aspect_ratio`, rounded to whole pixels.
    pub fn dimensions(self, aspect_ratio: AspectRatio) -> (u32, u32) {
        let (w, h) = aspect_ratio.export_base_dimensions();
        let m = self.multiplier();
        (
            (w as f64 * m).round() as u32,
            (h as f64 * m).round() as u32,
        )
    }
}

/// What the user picked in the export panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub tier: ResolutionTier,
    pub format: ExportFormat,
    /// JPEG quality 1-100; ignored for PNG.
    pub quality: u8,
    pub filter: InterpolationFilter,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            tier: ResolutionTier::High,
            format: ExportFormat::Png,
            quality: DEFAULT_QUALITY,
            filter: InterpolationFilter::Bilinear,
        }
    }
}

/// A frame that rendered empty because its bitmap was unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFrame {
    pub frame: FrameId,
    pub reason: String,
}

/// The encoded collage plus what the caller needs to offer it as a download.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub skipped_frames: Vec<SkippedFrame>,
    pub filename: String,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Output units per preview unit when rendering `aspect_ratio` at
/// `output_width`.
pub fn scale_factor(aspect_ratio: AspectRatio, output_width: u32) -> f64 {
    let (preview_width, _) = aspect_ratio.preview_dimensions();
    output_width as f64 / preview_width as f64
}

/// `collage-<unix millis>.<ext>`
pub fn suggested_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("collage-{}.{}", at.timestamp_millis(), format.extension())
}

/// Render and encode `state`, fetching bitmaps from `source`.
pub async fn export<S>(
    state: &CollageState,
    options: &ExportOptions,
    source: &S,
) -> Result<ExportArtifact, ExportError>
where
    S: ImageSource + ?Sized,
{
    export_at(state, options, source, Utc::now()).await
}

/// [`export`] with an explicit timestamp for the file name.
pub async fn export_at<S>(
    state: &CollageState,
    options: &ExportOptions,
    source: &S,
    at: DateTime<Utc>,
) -> Result<ExportArtifact, ExportError>
where
    S: ImageSource + ?Sized,
{
    let occupied: Vec<(FrameId, &ImagePlacement)> = state.occupied_frames().collect();
    if occupied.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let (width, height) = options.tier.dimensions(state.aspect_ratio);
    let factor = scale_factor(state.aspect_ratio, width);
    let scene = Scene::from_state(state, width as f64, height as f64, factor)?
        .with_filter(options.filter);
    let mut surface = Surface::new(width, height)?;

    debug!(
        layout = %state.layout,
        aspect_ratio = %state.aspect_ratio,
        width,
        height,
        scale_factor = factor,
        images = occupied.len(),
        "exporting collage"
    );

    let results = join_all(
        occupied
            .iter()
            .map(|(_, placement)| source.acquire(placement.source)),
    )
    .await;

    let mut acquired: Vec<(FrameId, &ImagePlacement, Arc<DecodedImage>)> = Vec::new();
    let mut skipped_frames = Vec::new();
    for ((frame, placement), result) in occupied.iter().zip(results) {
        match result {
            Ok(bitmap) => acquired.push((*frame, *placement, bitmap)),
            Err(err) => {
                warn!(frame = %frame, source = %placement.source, error = %err, "skipping frame, image unavailable");
                skipped_frames.push(SkippedFrame {
                    frame: *frame,
                    reason: err.to_string(),
                });
            }
        }
    }

    let images: Vec<FrameImage<'_>> = acquired
        .iter()
        .map(|(frame, placement, bitmap)| FrameImage {
            frame: *frame,
            placement: *placement,
            bitmap: bitmap.as_ref(),
        })
        .collect();
    render(&mut surface, &scene, &images)?;

    let bytes = encode(&surface, options.format, options.quality)?;
    debug!(bytes = bytes.len(), format = %options.format, "collage encoded");

    Ok(ExportArtifact {
        bytes,
        format: options.format,
        width,
        height,
        skipped_frames,
        filename: suggested_filename(options.format, at),
    })
}

/// Runs exports one at a time.
///
/// A second [`run`](Self::run) while one is in flight fails with
/// [`ExportError::Busy`]; the guard is released however the first one ends.
#[derive(Debug, Default)]
pub struct ExportPipeline {
    busy: Cell<bool>,
}

impl ExportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub async fn run<S>(
        &self,
        state: &CollageState,
        options: &ExportOptions,
        source: &S,
    ) -> Result<ExportArtifact, ExportError>
    where
        S: ImageSource + ?Sized,
    {
        let _guard = BusyGuard::acquire(&self.busy).ok_or(ExportError::Busy)?;
        export(state, options, source).await
    }
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::pin::pin;

    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::{FutureExt, LocalBoxFuture};

    use crate::color::Color;
    use crate::layout::Layout;
    use crate::placement::ImageHandle;

    fn millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn red_store() -> (ImageStore, ImageHandle) {
        let mut store = ImageStore::new();
        let handle = store.insert(DecodedImage::solid(100, 100, [255, 0, 0, 255]));
        (store, handle)
    }

    fn decode_rgb(bytes: &[u8]) -> image::RgbImage {
        image::load_from_memory(bytes).unwrap().into_rgb8()
    }

    /// Counts acquisitions and fails them all.
    #[derive(Default)]
    struct CountingSource {
        calls: Cell<usize>,
    }

    impl ImageSource for CountingSource {
        fn acquire(
            &self,
            handle: ImageHandle,
        ) -> LocalBoxFuture<'_, Result<Arc<DecodedImage>, AcquireError>> {
            self.calls.set(self.calls.get() + 1);
            futures::future::ready(Err(AcquireError::NotFound(handle))).boxed_local()
        }
    }

    /// Hands out one bitmap once the test releases it.
    struct GatedSource {
        gate: RefCell<Option<oneshot::Receiver<Arc<DecodedImage>>>>,
    }

    impl ImageSource for GatedSource {
        fn acquire(
            &self,
            _handle: ImageHandle,
        ) -> LocalBoxFuture<'_, Result<Arc<DecodedImage>, AcquireError>> {
            let gate = self.gate.borrow_mut().take();
            async move {
                match gate {
                    Some(rx) => rx
                        .await
                        .map_err(|_| AcquireError::Unavailable("gate dropped".into())),
                    None => Err(AcquireError::Unavailable("gate already used".into())),
                }
            }
            .boxed_local()
        }
    }

    #[test]
    fn test_tier_dimensions() {
        assert_eq!(
            ResolutionTier::Medium.dimensions(AspectRatio::Square),
            (540, 540)
        );
        assert_eq!(
            ResolutionTier::Medium.dimensions(AspectRatio::PortraitPlus),
            (540, 675)
        );
        assert_eq!(
            ResolutionTier::High.dimensions(AspectRatio::Portrait),
            (1080, 1440)
        );
        assert_eq!(
            ResolutionTier::Ultra.dimensions(AspectRatio::Widescreen),
            (3840, 2160)
        );
    }

    #[test]
    fn test_scale_factor_uses_preview_width_of_same_ratio() {
        assert_eq!(scale_factor(AspectRatio::Square, 1080), 2.7);
        assert_eq!(scale_factor(AspectRatio::Widescreen, 1920), 3.0);
        assert_eq!(scale_factor(AspectRatio::Story, 1080), 3.0);
        assert_eq!(scale_factor(AspectRatio::Square, 400), 1.0);
    }

    #[test]
    fn test_suggested_filename() {
        let at = millis(1_700_000_000_123);
        assert_eq!(
            suggested_filename(ExportFormat::Png, at),
            "collage-1700000000123.png"
        );
        assert_eq!(
            suggested_filename(ExportFormat::Jpeg, at),
            "collage-1700000000123.jpg"
        );
    }

    #[test]
    fn test_options_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.tier, ResolutionTier::High);
        assert_eq!(options.format, ExportFormat::Png);
        assert_eq!(options.quality, 90);
    }

    #[test]
    fn test_nothing_to_export_fails_before_acquiring() {
        let source = CountingSource::default();
        let state = CollageState::new();
        let result = block_on(export(&state, &ExportOptions::default(), &source));
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_orphans_alone_are_nothing_to_export() {
        let source = CountingSource::default();
        let mut state = CollageState::new();
        state.assign_image(FrameId::THIRD, ImageHandle(0), 10, 10);
        let result = block_on(export(&state, &ExportOptions::default(), &source));
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_png_export_draws_scaled_geometry() {
        let (store, handle) = red_store();
        let mut state = CollageState::new();
        state.set_background(Color::BLACK);
        state.assign_image(FrameId::FIRST, handle, 100, 100);

        let options = ExportOptions {
            tier: ResolutionTier::Medium,
            ..ExportOptions::default()
        };
        let artifact = block_on(export_at(&state, &options, &store, millis(5))).unwrap();

        assert_eq!((artifact.width, artifact.height), (540, 540));
        assert_eq!(artifact.mime_type(), "image/png");
        assert_eq!(artifact.filename, "collage-5.png");
        assert!(artifact.skipped_frames.is_empty());

        // Factor 1.35: the 100px image covers 135px, the border 13.5px.
        let img = decode_rgb(&artifact.bytes);
        assert_eq!(img.dimensions(), (540, 540));
        assert_eq!(img.get_pixel(10, 10).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(134, 134).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(136, 10).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(270, 300).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(400, 300).0, [0, 0, 0]);
    }

    #[test]
    fn test_jpeg_export() {
        let (store, handle) = red_store();
        let mut state = CollageState::new();
        state.assign_image(FrameId::SECOND, handle, 100, 100);

        let options = ExportOptions {
            tier: ResolutionTier::Medium,
            format: ExportFormat::Jpeg,
            quality: 75,
            ..ExportOptions::default()
        };
        let artifact = block_on(export(&state, &options, &store)).unwrap();
        assert_eq!(artifact.mime_type(), "image/jpeg");
        assert!(artifact.filename.starts_with("collage-"));
        assert!(artifact.filename.ends_with(".jpg"));
        assert_eq!(&artifact.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_failed_acquisition_skips_only_that_frame() {
        let (store, handle) = red_store();
        let mut state = CollageState::new();
        state.set_background(Color::BLACK);
        state
            .set_layout(Layout::parse("triptych", "horizontal").unwrap())
            .unwrap();
        state.set_border_thickness(0.0);
        state.assign_image(FrameId::FIRST, handle, 100, 100);
        state.assign_image(FrameId::SECOND, ImageHandle(999), 100, 100);
        state.assign_image(FrameId::THIRD, handle, 100, 100);

        let options = ExportOptions {
            tier: ResolutionTier::Medium,
            ..ExportOptions::default()
        };
        let artifact = block_on(export(&state, &options, &store)).unwrap();

        assert_eq!(artifact.skipped_frames.len(), 1);
        assert_eq!(artifact.skipped_frames[0].frame, FrameId::SECOND);
        assert!(artifact.skipped_frames[0].reason.contains("image#999"));

        // Columns are 180px wide at 540.
        let img = decode_rgb(&artifact.bytes);
        assert_eq!(img.get_pixel(5, 5).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(185, 5).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(365, 5).0, [255, 0, 0]);
    }

    #[test]
    fn test_pipeline_refuses_concurrent_runs() {
        let (store, handle) = red_store();
        let mut state = CollageState::new();
        state.assign_image(FrameId::FIRST, handle, 100, 100);

        let (tx, rx) = oneshot::channel();
        let gated = GatedSource {
            gate: RefCell::new(Some(rx)),
        };
        let options = ExportOptions {
            tier: ResolutionTier::Medium,
            ..ExportOptions::default()
        };
        let pipeline = ExportPipeline::new();

        block_on(async {
            let mut first = pin!(pipeline.run(&state, &options, &gated));
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert!(pipeline.is_busy());

            let second = pipeline.run(&state, &options, &store).await;
            assert!(matches!(second, Err(ExportError::Busy)));

            tx.send(Arc::new(DecodedImage::solid(4, 4, [0, 0, 255, 255])))
                .unwrap();
            let artifact = first.await.unwrap();
            assert!(artifact.skipped_frames.is_empty());
        });

        assert!(!pipeline.is_busy());
        let again = block_on(pipeline.run(&state, &options, &store));
        assert!(again.is_ok());
    }

    #[test]
    fn test_pipeline_releases_guard_after_failure() {
        let pipeline = ExportPipeline::new();
        let state = CollageState::new();
        let result = block_on(pipeline.run(&state, &ExportOptions::default(), &ImageStore::new()));
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(!pipeline.is_busy());
    }
}
