//! PWA icon artwork: a dark tile with an accent frame, a "T" glyph and a
//! row of sound-wave bars.
//!
//! All geometry is derived from the icon size, so every size renders the
//! same picture.

use std::path::{Path, PathBuf};

use crate::canvas::{Canvas, Rgb};
use crate::Result;

/// Default icon sizes for a web app manifest.
pub const DEFAULT_SIZES: [u32; 2] = [192, 512];

const FRAME_THICKNESS: i64 = 3;
const GRADIENT_STRENGTH: f64 = 0.2;
const WAVE_BARS: i64 = 5;

/// Colours used by [`render_icon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconStyle {
    /// Base background colour (brightened by the gradient)
    pub background: Rgb,
    /// Frame and sound-wave colour
    pub accent: Rgb,
    /// Glyph colour
    pub foreground: Rgb,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            background: Rgb(30, 30, 30),
            accent: Rgb(0, 122, 255),
            foreground: Rgb(255, 255, 255),
        }
    }
}

/// Render the icon at `size` x `size`.
pub fn render_icon(size: u32, style: &IconStyle) -> Canvas {
    let s = i64::from(size);
    let mut canvas = Canvas::new(size as usize, size as usize, style.background);
    canvas.diagonal_gradient(style.background, GRADIENT_STRENGTH);

    draw_frame(&mut canvas, s / 10, s / 12, style.accent);
    draw_letter_t(&mut canvas, s / 2, s / 2 - s / 10, s / 2, style.foreground);
    draw_sound_waves(&mut canvas, s / 2, (s as f64 * 0.75) as i64, s, style.accent);
    canvas
}

/// A `FRAME_THICKNESS`-wide border inset by `margin`, with rounded corners.
fn draw_frame(canvas: &mut Canvas, margin: i64, radius: i64, color: Rgb) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    for y in margin..h - margin {
        for x in margin..w - margin {
            let left = x - margin;
            let top = y - margin;
            let right = w - margin - 1 - x;
            let bottom = h - margin - 1 - y;
            if left.min(top).min(right).min(bottom) >= FRAME_THICKNESS {
                continue;
            }
            let corner_x = left.min(right);
            let corner_y = top.min(bottom);
            let in_corner = corner_x < radius && corner_y < radius;
            if !in_corner || (radius - corner_x).pow(2) + (radius - corner_y).pow(2) <= radius.pow(2) {
                canvas.set(x, y, color);
            }
        }
    }
}

fn draw_letter_t(canvas: &mut Canvas, cx: i64, cy: i64, size: i64, color: Rgb) {
    let stem_width = size / 8;
    let stem_height = (size as f64 * 0.7) as i64;
    let top = cy - stem_height / 2;
    canvas.fill_rect(
        cx - stem_width / 2,
        top,
        cx + stem_width / 2,
        cy + stem_height / 2,
        color,
    );

    let bar_width = size / 2;
    let bar_height = size / 8;
    canvas.fill_rect(cx - bar_width / 2, top, cx + bar_width / 2, top + bar_height, color);
}

fn draw_sound_waves(canvas: &mut Canvas, cx: i64, cy: i64, size: i64, color: Rgb) {
    let max_height = size / 6;
    let bar_width = size / 25;
    let spacing = size / 10;
    let middle = WAVE_BARS / 2;

    for i in 0..WAVE_BARS {
        let x = cx - spacing * 2 + i * spacing;
        let falloff = 1.0 - (i - middle).abs() as f64 * 0.25;
        let bar_height = (max_height as f64 * falloff) as i64;
        canvas.fill_rect(
            x - bar_width / 2,
            cy - bar_height / 2,
            x + bar_width / 2,
            cy + bar_height / 2,
            color,
        );
    }
}

/// Render and write `icon-<size>.png` for each size into `dir`.
pub fn write_icon_set(dir: &Path, sizes: &[u32], style: &IconStyle) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let png = render_icon(size, style).to_png()?;
        let path = dir.join(format!("icon-{size}.png"));
        sundry_core::write_atomic(&path, &png)?;
        log::info!("Created {} ({} bytes)", path.display(), png.len());
        written.push(path);
    }
    Ok(written)
}
