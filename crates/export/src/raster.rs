//! Software rasterizer for receipt paint plans.
//!
//! Everything is drawn from an embedded 5x7 pixel font and flat fills, so a
//! given plan always produces byte-identical output at a given scale. The
//! buffer is plain row-major RGB8, which the PDF assembly step embeds as-is.

use crate::layout::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::paint::{Color, PaintOp, PaintPlan, WHITE};
use crate::ExportError;

/// Largest pixel edge a capture may have. Anything beyond this is a sign of
/// a corrupt layout rather than a real receipt.
const MAX_EDGE: u32 = 20_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB8, `3 * width * height` bytes.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    fn new(width: u32, height: u32, background: Color) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[background.r, background.g, background.b]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * self.width + x) * 3) as usize;
        (self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 3) as usize;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 3) as usize;
        let mix = |old: u8, new: u8| -> u8 {
            (old as f32 * (1.0 - alpha) + new as f32 * alpha).round() as u8
        };
        self.pixels[i] = mix(self.pixels[i], color.r);
        self.pixels[i + 1] = mix(self.pixels[i + 1], color.g);
        self.pixels[i + 2] = mix(self.pixels[i + 2], color.b);
    }

    /// Drop every row at or below `height` pixels, keeping the buffer dense.
    pub fn clip_height(&mut self, height: u32) {
        if height >= self.height {
            return;
        }
        self.pixels.truncate((self.width * height * 3) as usize);
        self.height = height;
    }
}

/// Rasterize `plan` at an integer supersampling factor. The buffer starts as
/// a white fill; the source artwork is not assumed to handle transparency.
pub fn rasterize(plan: &PaintPlan, scale: u32) -> Result<Bitmap, ExportError> {
    if plan.width == 0 || plan.height == 0 || scale == 0 {
        return Err(ExportError::Raster(format!(
            "degenerate capture region {}x{} at scale {}",
            plan.width, plan.height, scale
        )));
    }
    let width = plan.width * scale;
    let height = plan.height * scale;
    if width > MAX_EDGE || height > MAX_EDGE {
        return Err(ExportError::Raster(format!(
            "capture region {width}x{height} exceeds the {MAX_EDGE}px edge limit"
        )));
    }

    let mut bitmap = Bitmap::new(width, height, WHITE);
    for op in &plan.ops {
        match op {
            PaintOp::Fill { rect, color } => {
                fill(
                    &mut bitmap,
                    rect.x * scale,
                    rect.y * scale,
                    rect.width * scale,
                    rect.height * scale,
                    *color,
                );
            }
            PaintOp::Border { rect, color } => {
                let (x, y) = (rect.x * scale, rect.y * scale);
                let (w, h) = (rect.width * scale, rect.height * scale);
                fill(&mut bitmap, x, y, w, scale, *color);
                fill(&mut bitmap, x, y + h - scale, w, scale, *color);
                fill(&mut bitmap, x, y, scale, h, *color);
                fill(&mut bitmap, x + w - scale, y, scale, h, *color);
            }
            PaintOp::Text {
                x,
                y,
                text,
                scale: text_scale,
                color,
            } => {
                draw_text(
                    &mut bitmap,
                    x * scale,
                    y * scale,
                    text,
                    text_scale * scale,
                    *color,
                );
            }
            PaintOp::Watermark {
                text,
                scale: mark_scale,
                color,
                alpha,
            } => {
                stamp_watermark(&mut bitmap, text, mark_scale * scale, *color, *alpha);
            }
        }
    }
    Ok(bitmap)
}

fn fill(bitmap: &mut Bitmap, x: u32, y: u32, width: u32, height: u32, color: Color) {
    for py in y..y.saturating_add(height) {
        for px in x..x.saturating_add(width) {
            bitmap.set(px, py, color);
        }
    }
}

fn draw_text(bitmap: &mut Bitmap, x: u32, y: u32, text: &str, scale: u32, color: Color) {
    let mut pen_x = x;
    for ch in text.chars() {
        let glyph = glyph_rows(ch);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) != 0 {
                    fill(
                        bitmap,
                        pen_x + col * scale,
                        y + row as u32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
        pen_x += GLYPH_ADVANCE * scale;
    }
}

/// Stamp `text` rotated 45 degrees counter-clockwise across the bitmap
/// center, alpha-blended so the underlying content stays readable.
fn stamp_watermark(bitmap: &mut Bitmap, text: &str, scale: u32, color: Color, alpha: f32) {
    let mask_w = (text.chars().count() as u32 * GLYPH_ADVANCE * scale) as f32;
    let mask_h = (GLYPH_HEIGHT * scale) as f32;
    let center_x = bitmap.width as f32 / 2.0;
    let center_y = bitmap.height as f32 / 2.0;
    let cos = std::f32::consts::FRAC_1_SQRT_2;
    let sin = -std::f32::consts::FRAC_1_SQRT_2;

    // Overlapping stamps must not compound the alpha, so each destination
    // pixel is blended at most once.
    let mut stamped = vec![false; (bitmap.width * bitmap.height) as usize];
    let mut blend_once = |bitmap: &mut Bitmap, x: u32, y: u32| {
        if x >= bitmap.width || y >= bitmap.height {
            return;
        }
        let i = (y * bitmap.width + x) as usize;
        if !stamped[i] {
            stamped[i] = true;
            bitmap.blend(x, y, color, alpha);
        }
    };

    for (index, ch) in text.chars().enumerate() {
        let glyph = glyph_rows(ch);
        let glyph_x = (index as u32 * GLYPH_ADVANCE * scale) as f32;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                for sub_y in 0..scale {
                    for sub_x in 0..scale {
                        let sx = glyph_x + (col * scale + sub_x) as f32 - mask_w / 2.0;
                        let sy = (row as u32 * scale + sub_y) as f32 - mask_h / 2.0;
                        let rx = center_x + sx * cos - sy * sin;
                        let ry = center_y + sx * sin + sy * cos;
                        if rx < 0.0 || ry < 0.0 {
                            continue;
                        }
                        // 2x2 stamp closes the holes the rotation opens up.
                        for dy in 0..2 {
                            for dx in 0..2 {
                                blend_once(bitmap, rx as u32 + dx, ry as u32 + dy);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn glyph_rows(ch: char) -> &'static [u8; 7] {
    let index = ch as usize;
    if (0x20..=0x7E).contains(&index) {
        &FONT_5X7[index - 0x20]
    } else {
        &FALLBACK_GLYPH
    }
}

/// Box drawn for characters outside printable ASCII.
static FALLBACK_GLYPH: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

/// Row-encoded 5x7 glyphs for ASCII 0x20..=0x7E; bit 4 is the left column.
static FONT_5X7: [[u8; 7]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // '%'
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // '&'
    [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // '('
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // ')'
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08], // ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // '.'
    [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10], // '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // '1'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // '2'
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // '5'
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // '6'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // '8'
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // '9'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // ':'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // '>'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E], // '@'
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // 'A'
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // 'B'
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // 'C'
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // 'D'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // 'E'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // 'M'
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'O'
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // 'Q'
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // 'R'
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // 'X'
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // '['
    [0x10, 0x10, 0x08, 0x04, 0x02, 0x01, 0x01], // '\\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // '_'
    [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F], // 'a'
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x1E], // 'b'
    [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E], // 'c'
    [0x01, 0x01, 0x0F, 0x11, 0x11, 0x11, 0x0F], // 'd'
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E], // 'e'
    [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08], // 'f'
    [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E], // 'g'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11], // 'h'
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E], // 'i'
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C], // 'j'
    [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12], // 'k'
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'l'
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11], // 'm'
    [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11], // 'n'
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E], // 'o'
    [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10], // 'p'
    [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x01], // 'q'
    [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10], // 'r'
    [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E], // 's'
    [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06], // 't'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D], // 'u'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'v'
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A], // 'w'
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11], // 'x'
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E], // 'y'
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F], // 'z'
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02], // '{'
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // '|'
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08], // '}'
    [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00], // '~'
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::paint::{PaintOp, PaintPlan, NAVY, TEXT_DARK};

    fn plan_with(ops: Vec<PaintOp>) -> PaintPlan {
        PaintPlan {
            width: 100,
            height: 50,
            ops,
        }
    }

    #[test]
    fn bitmap_starts_as_a_white_fill() {
        let bitmap = rasterize(&plan_with(Vec::new()), 1).expect("raster");
        assert_eq!(bitmap.width, 100);
        assert_eq!(bitmap.height, 50);
        assert_eq!(bitmap.pixel(0, 0), (255, 255, 255));
        assert_eq!(bitmap.pixel(99, 49), (255, 255, 255));
    }

    #[test]
    fn scale_multiplies_the_pixel_dimensions() {
        let bitmap = rasterize(&plan_with(Vec::new()), 2).expect("raster");
        assert_eq!((bitmap.width, bitmap.height), (200, 100));
        assert_eq!(bitmap.pixels.len(), 200 * 100 * 3);
    }

    #[test]
    fn fills_land_scaled_and_clipped() {
        let ops = vec![PaintOp::Fill {
            rect: Rect::new(10, 10, 1000, 5),
            color: NAVY,
        }];
        let bitmap = rasterize(&plan_with(ops), 2).expect("raster");
        assert_eq!(bitmap.pixel(20, 20), (NAVY.r, NAVY.g, NAVY.b));
        assert_eq!(bitmap.pixel(0, 0), (255, 255, 255));
        // The overwide rect simply clips at the buffer edge.
        assert_eq!(bitmap.pixel(199, 20), (NAVY.r, NAVY.g, NAVY.b));
    }

    #[test]
    fn text_darkens_pixels_deterministically() {
        let ops = vec![PaintOp::Text {
            x: 2,
            y: 2,
            text: "FP".to_string(),
            scale: 2,
            color: TEXT_DARK,
        }];
        let first = rasterize(&plan_with(ops.clone()), 2).expect("raster");
        let second = rasterize(&plan_with(ops), 2).expect("raster");
        assert_eq!(first, second);

        let blank = rasterize(&plan_with(Vec::new()), 2).expect("raster");
        assert_ne!(first.pixels, blank.pixels);
    }

    #[test]
    fn watermark_blends_rather_than_overwrites() {
        let ops = vec![PaintOp::Watermark {
            text: "FASTPAY".to_string(),
            scale: 2,
            color: NAVY,
            alpha: 0.1,
        }];
        let bitmap = rasterize(&plan_with(ops), 2).expect("raster");
        // Blended pixels stay near-white; nothing becomes fully navy.
        assert!(bitmap
            .pixels
            .iter()
            .all(|&channel| channel > 200));
    }

    #[test]
    fn degenerate_regions_are_rejected() {
        let empty = PaintPlan {
            width: 0,
            height: 50,
            ops: Vec::new(),
        };
        assert!(matches!(
            rasterize(&empty, 2),
            Err(ExportError::Raster(_))
        ));
        assert!(matches!(
            rasterize(&plan_with(Vec::new()), 0),
            Err(ExportError::Raster(_))
        ));

        let huge = PaintPlan {
            width: MAX_EDGE,
            height: 10,
            ops: Vec::new(),
        };
        assert!(matches!(rasterize(&huge, 2), Err(ExportError::Raster(_))));
    }

    #[test]
    fn clip_height_truncates_rows() {
        let mut bitmap = rasterize(&plan_with(Vec::new()), 1).expect("raster");
        bitmap.clip_height(20);
        assert_eq!(bitmap.height, 20);
        assert_eq!(bitmap.pixels.len(), 100 * 20 * 3);
        bitmap.clip_height(500);
        assert_eq!(bitmap.height, 20);
    }
}
