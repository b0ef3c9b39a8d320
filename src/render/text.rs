//! Outlined text drawing.

use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use super::font::MemeFont;

/// Glyph cell size of the built-in bitmap font.
const BITMAP_CELL: u32 = 8;

/// Largest text size, in pixels, that is ever rasterised.
pub const MAX_TEXT_SIZE: f32 = 1024.0;

/// Fill, outline and size for caption text.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Glyph fill colour.
    pub fill: Rgba<u8>,
    /// Outline colour.
    pub stroke: Rgba<u8>,
    /// Outline thickness in pixels.
    pub stroke_width: i32,
}

impl TextStyle {
    /// White text with a 2px black outline.
    #[must_use]
    pub fn meme(size: f32) -> Self {
        Self {
            size,
            fill: Rgba([255, 255, 255, 255]),
            stroke: Rgba([0, 0, 0, 255]),
            stroke_width: 2,
        }
    }
}

/// Draw `text` with its top-left corner at (`x`, `y`), outlined.
///
/// The outline is the text stamped in the stroke colour at every offset
/// within `stroke_width`, with the fill drawn last on top. Anything falling
/// outside the image is clipped.
pub fn draw_outlined_text(
    image: &mut RgbaImage,
    font: &MemeFont,
    style: &TextStyle,
    x: i32,
    y: i32,
    text: &str,
) {
    let w = style.stroke_width;
    for dy in -w..=w {
        for dx in -w..=w {
            if (dx, dy) != (0, 0) && dx * dx + dy * dy <= w * w {
                draw_plain(image, font, style.size, style.stroke, x + dx, y + dy, text);
            }
        }
    }
    draw_plain(image, font, style.size, style.fill, x, y, text);
}

fn draw_plain(
    image: &mut RgbaImage,
    font: &MemeFont,
    size: f32,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    text: &str,
) {
    let size = clamp_size(size);
    match font {
        MemeFont::Outline { font, .. } => {
            draw_text_mut(image, color, x, y, PxScale::from(size), font, text);
        }
        MemeFont::Bitmap => draw_bitmap_text(image, color, x, y, bitmap_scale(size), text),
    }
}

/// Bound `size` to `1..=MAX_TEXT_SIZE`; non-finite sizes draw at one cell.
#[allow(clippy::cast_precision_loss)]
fn clamp_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(1.0, MAX_TEXT_SIZE)
    } else {
        BITMAP_CELL as f32
    }
}

/// Integer magnification that brings the 8px bitmap font closest to `size`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bitmap_scale(size: f32) -> u32 {
    ((clamp_size(size) / BITMAP_CELL as f32).round() as u32).max(1)
}

fn draw_bitmap_text(
    image: &mut RgbaImage,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    scale: u32,
    text: &str,
) {
    let cell = i32::try_from(BITMAP_CELL.saturating_mul(scale)).unwrap_or(i32::MAX);
    let pixel = i32::try_from(scale).unwrap_or(i32::MAX);

    let mut pen_x = x;
    for ch in text.chars() {
        let code = if ch.is_ascii() { ch } else { '?' };
        let glyph = font8x8::legacy::BASIC_LEGACY[code as usize];
        for (row, bits) in (0i32..).zip(glyph) {
            for col in 0..8i32 {
                if (bits >> col) & 1 == 1 {
                    let left = pen_x.saturating_add(col.saturating_mul(pixel));
                    let top = y.saturating_add(row.saturating_mul(pixel));
                    let rect = Rect::at(left, top).of_size(scale, scale);
                    draw_filled_rect_mut(image, rect, color);
                }
            }
        }
        pen_x = pen_x.saturating_add(cell);
    }
}
