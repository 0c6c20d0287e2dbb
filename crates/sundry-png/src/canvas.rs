//! An RGB raster with clipped fill primitives.
//!
//! Coordinates are signed so shapes may hang off any edge; everything is
//! clipped to the canvas. Rectangles are half-open (`x1..x2`, `y1..y2`).

use crate::Result;
use crate::encoder::encode_rgb;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Scale every channel by `factor`, saturating at 255.
    pub fn scaled(self, factor: f64) -> Rgb {
        let scale = |c: u8| (f64::from(c) * factor).clamp(0.0, 255.0) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// Row-major RGB pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Colour at `(x, y)`, `None` outside the canvas.
    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set `(x, y)`; ignored outside the canvas.
    pub fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn clip_x(&self, v: i64) -> i64 {
        v.clamp(0, self.width as i64)
    }

    fn clip_y(&self, v: i64) -> i64 {
        v.clamp(0, self.height as i64)
    }

    /// Fill the whole canvas.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill the half-open rectangle `[x1, x2) x [y1, y2)`.
    pub fn fill_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Rgb) {
        for y in self.clip_y(y1)..self.clip_y(y2) {
            for x in self.clip_x(x1)..self.clip_x(x2) {
                self.set(x, y, color);
            }
        }
    }

    /// Fill every pixel with `(x-cx)² + (y-cy)² <= r²`.
    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Rgb) {
        let r2 = radius * radius;
        for y in self.clip_y(cy - radius)..self.clip_y(cy + radius + 1) {
            for x in self.clip_x(cx - radius)..self.clip_x(cx + radius + 1) {
                if (x - cx).pow(2) + (y - cy).pow(2) <= r2 {
                    self.set(x, y, color);
                }
            }
        }
    }

    /// Fill a rectangle whose corners are rounded with `radius`.
    pub fn fill_rounded_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, radius: i64, color: Rgb) {
        self.fill_rect(x1 + radius, y1, x2 - radius, y2, color);
        self.fill_rect(x1, y1 + radius, x2, y2 - radius, color);
        self.fill_circle(x1 + radius, y1 + radius, radius, color);
        self.fill_circle(x2 - radius - 1, y1 + radius, radius, color);
        self.fill_circle(x1 + radius, y2 - radius - 1, radius, color);
        self.fill_circle(x2 - radius - 1, y2 - radius - 1, radius, color);
    }

    /// Brighten `base` towards the bottom-right corner.
    ///
    /// Pixel `(x, y)` becomes `base * (1 + strength * (x + y) / (w + h))`.
    pub fn diagonal_gradient(&mut self, base: Rgb, strength: f64) {
        let span = (self.width + self.height).max(1) as f64;
        for y in 0..self.height {
            for x in 0..self.width {
                let factor = 1.0 + ((x + y) as f64 / span) * strength;
                self.pixels[y * self.width + x] = base.scaled(factor);
            }
        }
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_rgb(self.width, self.height, &self.pixels)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);
    const RED: Rgb = Rgb(255, 0, 0);

    fn count(canvas: &Canvas, color: Rgb) -> usize {
        canvas.pixels().iter().filter(|p| **p == color).count()
    }

    #[test]
    fn test_fill_rect_half_open() {
        let mut c = Canvas::new(10, 10, BLACK);
        c.fill_rect(2, 3, 5, 4, RED);
        assert_eq!(count(&c, RED), 3);
        assert_eq!(c.get(2, 3), Some(RED));
        assert_eq!(c.get(5, 3), Some(BLACK));
    }

    #[test]
    fn test_fill_rect_clips_negative_and_overflow() {
        let mut c = Canvas::new(4, 4, BLACK);
        c.fill_rect(-10, -10, 100, 2, RED);
        assert_eq!(count(&c, RED), 8);
    }

    #[test]
    fn test_fill_circle_radius_one_is_plus_shape() {
        let mut c = Canvas::new(5, 5, BLACK);
        c.fill_circle(2, 2, 1, RED);
        assert_eq!(count(&c, RED), 5);
        assert_eq!(c.get(1, 1), Some(BLACK));
    }

    #[test]
    fn test_fill_circle_off_canvas_is_noop() {
        let mut c = Canvas::new(5, 5, BLACK);
        c.fill_circle(50, 50, 3, RED);
        assert_eq!(count(&c, RED), 0);
    }

    #[test]
    fn test_rounded_rect_leaves_corners() {
        let mut c = Canvas::new(20, 20, BLACK);
        c.fill_rounded_rect(0, 0, 20, 20, 5, RED);
        assert_eq!(c.get(0, 0), Some(BLACK));
        assert_eq!(c.get(10, 10), Some(RED));
        assert_eq!(c.get(10, 0), Some(RED));
    }

    #[test]
    fn test_gradient_corners() {
        let mut c = Canvas::new(10, 10, BLACK);
        c.diagonal_gradient(Rgb(30, 30, 30), 0.2);
        assert_eq!(c.get(0, 0), Some(Rgb(30, 30, 30)));
        // (9 + 9) / 20 * 0.2 = 0.18 → 30 * 1.18 = 35.4
        assert_eq!(c.get(9, 9), Some(Rgb(35, 35, 35)));
    }

    #[test]
    fn test_scaled_saturates() {
        assert_eq!(Rgb(200, 10, 0).scaled(2.0), Rgb(255, 20, 0));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let c = Canvas::new(2, 2, BLACK);
        assert_eq!(c.get(-1, 0), None);
        assert_eq!(c.get(2, 0), None);
    }
}
