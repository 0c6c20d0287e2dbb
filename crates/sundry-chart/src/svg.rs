//! Minimal SVG writing helpers.

use std::f64::consts::PI;

/// Font stack used for all chart text.
pub const FONT: &str = "Helvetica, Arial, sans-serif";

/// An SVG document under construction.
#[derive(Debug)]
pub struct Svg {
    width: f64,
    height: f64,
    body: String,
}

impl Svg {
    /// Start a document with a white background and a centred title.
    pub fn new(width: f64, height: f64, title: &str) -> Self {
        let mut svg = Self {
            width,
            height,
            body: String::new(),
        };
        svg.rect(0.0, 0.0, width, height, "#ffffff", None);
        svg.text(width / 2.0, 32.0, title, 20.0, "middle", "bold", "#222222");
        svg
    }

    /// Width in user units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in user units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Append raw markup.
    pub fn raw(&mut self, markup: &str) {
        self.body.push_str(markup);
        self.body.push('\n');
    }

    /// Filled rectangle with an optional white stroke width.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: Option<f64>) {
        let stroke = stroke
            .map(|s| format!(r##" stroke="#ffffff" stroke-width="{s}""##))
            .unwrap_or_default();
        self.raw(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"{stroke}/>"#,
            num(x),
            num(y),
            num(w),
            num(h)
        ));
    }

    /// Filled path with a white stroke.
    pub fn path(&mut self, d: &str, fill: &str, stroke_width: f64) {
        self.raw(&format!(
            r##"<path d="{d}" fill="{fill}" stroke="#ffffff" stroke-width="{stroke_width}"/>"##
        ));
    }

    /// A line of text.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        anchor: &str,
        weight: &str,
        fill: &str,
    ) {
        self.raw(&format!(
            r#"<text x="{}" y="{}" font-family="{FONT}" font-size="{size}" text-anchor="{anchor}" font-weight="{weight}" fill="{fill}">{}</text>"#,
            num(x),
            num(y),
            escape(content)
        ));
    }

    /// Close the document.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n{}</svg>\n",
            self.body,
            w = num(self.width),
            h = num(self.height),
        )
    }
}

/// Coordinates rounded to two decimals, without trailing zeros.
pub fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// XML text escaping.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Point at `angle` degrees (counter-clockwise from 3 o'clock) on a circle.
pub fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    let rad = angle * PI / 180.0;
    (cx + r * rad.cos(), cy - r * rad.sin())
}

/// Path for an annular sector; `inner == 0` gives a pie wedge.
///
/// Angles are degrees, counter-clockwise; `sweep` must be positive.
pub fn sector_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, sweep: f64) -> String {
    // A full circle cannot be drawn as one arc.
    let sweep = sweep.min(359.999);
    let end = start + sweep;
    let large = if sweep > 180.0 { 1 } else { 0 };
    let (ox1, oy1) = polar(cx, cy, outer, start);
    let (ox2, oy2) = polar(cx, cy, outer, end);
    if inner <= 0.0 {
        format!(
            "M {} {} L {} {} A {} {} 0 {large} 0 {} {} Z",
            num(cx),
            num(cy),
            num(ox1),
            num(oy1),
            num(outer),
            num(outer),
            num(ox2),
            num(oy2)
        )
    } else {
        let (ix1, iy1) = polar(cx, cy, inner, start);
        let (ix2, iy2) = polar(cx, cy, inner, end);
        format!(
            "M {} {} A {} {} 0 {large} 0 {} {} L {} {} A {} {} 0 {large} 1 {} {} Z",
            num(ox1),
            num(oy1),
            num(outer),
            num(outer),
            num(ox2),
            num(oy2),
            num(ix2),
            num(iy2),
            num(inner),
            num(inner),
            num(ix1),
            num(iy1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.256), "1.26");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(10.5), "10.5");
    }

    #[test]
    fn test_polar() {
        let (x, y) = polar(100.0, 100.0, 50.0, 90.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_sector_path_shapes() {
        let wedge = sector_path(0.0, 0.0, 10.0, 0.0, 0.0, 90.0);
        assert!(wedge.starts_with("M 0 0 L 10 0 A 10 10 0 0 0"));
        let ring = sector_path(0.0, 0.0, 10.0, 5.0, 0.0, 270.0);
        assert!(ring.contains("A 10 10 0 1 0"));
        assert!(ring.contains("A 5 5 0 1 1"));
    }

    #[test]
    fn test_document() {
        let mut svg = Svg::new(200.0, 100.0, "A & B");
        svg.rect(1.0, 2.0, 3.0, 4.0, "#000", Some(2.0));
        let out = svg.finish();
        assert!(out.starts_with("<svg xmlns="));
        assert!(out.contains("A &amp; B"));
        assert!(out.contains(r#"stroke-width="2""#));
        assert!(out.trim_end().ends_with("</svg>"));
    }
}
