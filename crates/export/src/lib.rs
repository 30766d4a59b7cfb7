//! Receipt capture and PDF export.
//!
//! The pipeline mirrors what happens on screen: the receipt's layout is
//! turned into paint commands, rasterized into a pixel buffer at a fixed
//! supersampling factor, and the resulting image becomes the single page of
//! the exported document, sized one point per pixel.

pub mod layout;
pub mod paint;
pub mod pdf;
pub mod raster;
pub mod region;

pub use paint::{receipt_paint_ops, PaintPlan};
pub use pdf::{page_geometry, PageGeometry, PageOrientation};
pub use raster::Bitmap;
pub use region::{rasterize_region, CaptureOverrides, RenderRegion};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Supersampling factor applied when capturing the receipt region.
pub const CAPTURE_SCALE: u32 = 2;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("document assembly failed: {0}")]
    Document(String),
    #[error("could not write PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// The order id comes from an untrusted payload; keep the filename a single
/// path component.
fn filename_id(order_id: &str) -> String {
    order_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '.') { '_' } else { c })
        .collect()
}

/// Export the rendered receipt region as `FastPay_Receipt_<orderId>.pdf`
/// inside `out_dir`.
///
/// An absent region is a silent no-op: no file, no error. While the capture
/// runs, the region is forced to its natural scale with overflow permitted
/// and its controls hidden; those overrides are reverted on every exit path,
/// including failures, via the [`CaptureOverrides`] guard.
pub fn export_receipt(
    region: Option<&mut RenderRegion>,
    fallback_order_id: &str,
    out_dir: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    let Some(region) = region else {
        return Ok(None);
    };

    let overrides = CaptureOverrides::apply(region);

    let bitmap = rasterize_region(overrides.region(), CAPTURE_SCALE)?;
    let document = pdf::receipt_document(&bitmap)?;

    let order_id = if overrides.region().view.order_id.is_empty() {
        fallback_order_id
    } else {
        &overrides.region().view.order_id
    };
    let path = out_dir.join(format!("FastPay_Receipt_{}.pdf", filename_id(order_id)));
    fs::write(&path, &document)?;

    tracing::info!(path = %path.display(), "receipt exported");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_receipt_core::{normalize, RawTransaction};

    fn region() -> RenderRegion {
        RenderRegion::new(normalize("FP900", &RawTransaction::default()))
    }

    #[test]
    fn absent_region_is_a_silent_no_op() {
        let out = std::env::temp_dir();
        let result = export_receipt(None, "FP900", &out).expect("no-op");
        assert!(result.is_none());
    }

    #[test]
    fn export_writes_the_named_file_and_restores_overrides() {
        let out = std::env::temp_dir().join("fp_export_ok_test");
        std::fs::create_dir_all(&out).expect("out dir");

        let mut region = region();
        region.fit_scale = 0.5;
        region.clip_overflow = true;
        region.controls_visible = true;

        let path = export_receipt(Some(&mut region), "FALLBACK", &out)
            .expect("export")
            .expect("a file");
        assert!(path.ends_with("FastPay_Receipt_FP900.pdf"));
        let bytes = std::fs::read(&path).expect("read back");
        assert!(bytes.starts_with(b"%PDF"));

        assert_eq!(region.fit_scale, 0.5);
        assert!(region.clip_overflow);
        assert!(region.controls_visible);

        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn failed_export_still_restores_overrides() {
        let out = std::env::temp_dir()
            .join("fp_export_missing_dir")
            .join("nested");

        let mut region = region();
        region.fit_scale = 0.75;
        region.clip_overflow = true;
        region.controls_visible = true;

        let err = export_receipt(Some(&mut region), "FP900", &out);
        assert!(matches!(err, Err(ExportError::Io(_))));

        assert_eq!(region.fit_scale, 0.75);
        assert!(region.clip_overflow);
        assert!(region.controls_visible);
    }

    #[test]
    fn path_separators_in_the_order_id_stay_out_of_the_filename() {
        let out = std::env::temp_dir().join("fp_export_sep_test");
        std::fs::create_dir_all(&out).expect("out dir");

        let mut region = region();
        region.view.order_id = "../..\\FP1/evil".to_string();

        let path = export_receipt(Some(&mut region), "FP1", &out)
            .expect("export")
            .expect("a file");
        assert_eq!(path.parent(), Some(out.as_path()));
        let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
        assert!(name.starts_with("FastPay_Receipt_"));
        assert!(name.ends_with("FP1_evil.pdf"));
        assert_eq!(name.matches('.').count(), 1, "{name}");

        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn fallback_order_id_names_the_file_when_view_has_none() {
        let out = std::env::temp_dir().join("fp_export_fallback_test");
        std::fs::create_dir_all(&out).expect("out dir");

        let mut region = region();
        region.view.order_id = String::new();

        let path = export_receipt(Some(&mut region), "FROM-ROUTE", &out)
            .expect("export")
            .expect("a file");
        assert!(path.ends_with("FastPay_Receipt_FROM-ROUTE.pdf"));

        std::fs::remove_dir_all(&out).ok();
    }
}
