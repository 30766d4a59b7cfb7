//! The rendered receipt region and the scoped capture overrides.

use crate::paint::receipt_paint_ops;
use crate::raster::{self, Bitmap};
use crate::ExportError;
use fp_receipt_core::ReceiptView;

pub const RECEIPT_REGION_ID: &str = "receipt-container";

/// Natural height visible without overflow; rows below this are clipped
/// while `clip_overflow` holds.
const VIEWPORT_CLIP_HEIGHT: u32 = 720;

/// A receipt as currently rendered, including presentation state that a
/// capture has to override: the viewport fitting scale, overflow clipping,
/// and the visibility of the download controls.
#[derive(Debug, Clone)]
pub struct RenderRegion {
    pub id: String,
    pub view: ReceiptView,
    pub fit_scale: f32,
    pub clip_overflow: bool,
    pub controls_visible: bool,
}

impl RenderRegion {
    pub fn new(view: ReceiptView) -> Self {
        Self {
            id: RECEIPT_REGION_ID.to_string(),
            view,
            fit_scale: 1.0,
            clip_overflow: true,
            controls_visible: true,
        }
    }
}

/// Rasterize the region as it currently presents itself. The capture scale
/// is modulated by the region's fitting scale, and overflow clipping
/// truncates the bitmap; a capture therefore runs under [`CaptureOverrides`]
/// to get the full receipt at natural size.
pub fn rasterize_region(region: &RenderRegion, capture_scale: u32) -> Result<Bitmap, ExportError> {
    let plan = receipt_paint_ops(&region.view, region.controls_visible);
    let effective = ((capture_scale as f32) * region.fit_scale).round().max(1.0) as u32;
    let mut bitmap = raster::rasterize(&plan, effective)?;
    if region.clip_overflow {
        bitmap.clip_height(VIEWPORT_CLIP_HEIGHT * effective);
    }
    Ok(bitmap)
}

/// Scoped visual overrides for a capture: natural scale, overflow permitted,
/// controls hidden. The previous presentation state is restored in `Drop`,
/// which runs on success, error propagation, and early returns alike.
pub struct CaptureOverrides<'a> {
    region: &'a mut RenderRegion,
    prev_fit_scale: f32,
    prev_clip_overflow: bool,
    prev_controls_visible: bool,
}

impl<'a> CaptureOverrides<'a> {
    pub fn apply(region: &'a mut RenderRegion) -> Self {
        let prev_fit_scale = region.fit_scale;
        let prev_clip_overflow = region.clip_overflow;
        let prev_controls_visible = region.controls_visible;

        region.fit_scale = 1.0;
        region.clip_overflow = false;
        region.controls_visible = false;

        Self {
            region,
            prev_fit_scale,
            prev_clip_overflow,
            prev_controls_visible,
        }
    }

    pub fn region(&self) -> &RenderRegion {
        self.region
    }
}

impl Drop for CaptureOverrides<'_> {
    fn drop(&mut self) {
        self.region.fit_scale = self.prev_fit_scale;
        self.region.clip_overflow = self.prev_clip_overflow;
        self.region.controls_visible = self.prev_controls_visible;
    }
}
