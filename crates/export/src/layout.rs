//! Layout primitives for the rendered receipt.
//!
//! Text metrics are fixed-pitch: glyphs come from the embedded 5x7 pixel
//! font, advanced by one blank column, so every measurement here is exact
//! and independent of any system font.

/// Glyph cell width in pixels, without spacing.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph cell height in pixels.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character.
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Natural (unscaled) width of the receipt region.
pub const NATURAL_WIDTH: u32 = 880;
/// Outer page margin.
pub const MARGIN: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Width of `text` rendered at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE * scale
}

/// Height of one text line at `scale`.
pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Greedy word wrap into lines no wider than `max_width` at `scale`.
/// A single word longer than the limit gets a line of its own.
pub fn wrap_text(text: &str, max_width: u32, scale: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, scale) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_metrics_are_fixed_pitch() {
        assert_eq!(text_width("abc", 1), 3 * GLYPH_ADVANCE);
        assert_eq!(text_width("abc", 2), 6 * GLYPH_ADVANCE);
        assert_eq!(text_height(2), 14);
        assert_eq!(text_width("", 1), 0);
    }

    #[test]
    fn wrap_respects_the_width_limit() {
        let lines = wrap_text("one two three four five six", 10 * GLYPH_ADVANCE, 1);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 1) <= 10 * GLYPH_ADVANCE, "line {line:?} too wide");
        }
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn oversized_word_still_gets_a_line() {
        let lines = wrap_text("tiny incomprehensibilities", 8 * GLYPH_ADVANCE, 1);
        assert_eq!(lines, vec!["tiny", "incomprehensibilities"]);
    }
}
