//! Single-page PDF assembly around a captured bitmap.

use crate::raster::Bitmap;
use crate::ExportError;
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Pt, Px,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrientation {
    Portrait,
    Landscape,
}

/// Page size in points, one point per captured pixel, no DPI rescaling.
/// `f32` represents every dimension up to the capture edge limit exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub orientation: PageOrientation,
}

pub fn page_geometry(width_px: u32, height_px: u32) -> PageGeometry {
    let orientation = if width_px > height_px {
        PageOrientation::Landscape
    } else {
        PageOrientation::Portrait
    };
    PageGeometry {
        width_pt: width_px as f32,
        height_pt: height_px as f32,
        orientation,
    }
}

/// Build the one-page document with the capture filling the page from (0, 0).
pub fn receipt_document(bitmap: &Bitmap) -> Result<Vec<u8>, ExportError> {
    let geometry = page_geometry(bitmap.width, bitmap.height);
    tracing::debug!(
        width_pt = geometry.width_pt,
        height_pt = geometry.height_pt,
        orientation = ?geometry.orientation,
        "assembling receipt page"
    );

    let (doc, page, layer) = PdfDocument::new(
        "FastPay Receipt",
        Mm::from(Pt(geometry.width_pt)),
        Mm::from(Pt(geometry.height_pt)),
        "receipt",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let image = Image::from(ImageXObject {
        width: Px(bitmap.width as usize),
        height: Px(bitmap.height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: bitmap.pixels.clone(),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    });

    // At 72 dpi one image pixel is exactly one point, so the image fills the
    // page edge to edge.
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(72.0),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Document(e.to_string()))
}
