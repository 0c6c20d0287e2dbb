//! Exploded pie chart.

use crate::data::{Holding, Holdings, money};
use crate::svg::{Svg, polar, sector_path};

/// Angle of the first slice's leading edge, in degrees.
pub const START_ANGLE: f64 = 45.0;

/// Radial offset of the largest slices, as a fraction of the radius.
const EXPLODE: [f64; 3] = [0.15, 0.1, 0.1];

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 640.0;
const RADIUS: f64 = 200.0;
const CENTER: (f64, f64) = (360.0, 350.0);

/// Geometry of one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    /// The holder drawn
    pub holding: &'a Holding,
    /// Leading edge, degrees counter-clockwise from 3 o'clock
    pub start: f64,
    /// Angular size in degrees
    pub sweep: f64,
    /// Radial offset as a fraction of the radius
    pub explode: f64,
}

impl Slice<'_> {
    /// Angle through the middle of the slice.
    pub fn mid(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Slices largest first, starting at [`START_ANGLE`].
pub fn pie_slices(holdings: &Holdings) -> Vec<Slice<'_>> {
    let total = holdings.total();
    let mut angle = START_ANGLE;
    holdings
        .sorted_desc()
        .into_iter()
        .enumerate()
        .map(|(i, holding)| {
            let sweep = if total > 0.0 {
                holding.amount / total * 360.0
            } else {
                0.0
            };
            let slice = Slice {
                holding,
                start: angle,
                sweep,
                explode: EXPLODE.get(i).copied().unwrap_or(0.0),
            };
            angle += sweep;
            slice
        })
        .collect()
}

/// Render the pie chart.
pub fn pie_svg(holdings: &Holdings) -> String {
    let mut svg = Svg::new(
        WIDTH,
        HEIGHT,
        &format!("U.S. Treasury Ownership ({})", holdings.as_of),
    );
    let (cx, cy) = CENTER;

    for slice in pie_slices(holdings) {
        if slice.sweep <= 0.0 {
            continue;
        }
        let (ox, oy) = polar(cx, cy, RADIUS * slice.explode, slice.mid());
        svg.path(
            &sector_path(ox, oy, RADIUS, 0.0, slice.start, slice.sweep),
            &slice.holding.color,
            2.0,
        );

        let (lx, ly) = polar(ox, oy, RADIUS * 1.12, slice.mid());
        let anchor = if lx >= ox { "start" } else { "end" };
        let share = holdings.share(slice.holding.amount);
        svg.text(lx, ly, &slice.holding.short, 13.0, anchor, "bold", "#333333");
        svg.text(
            lx,
            ly + 16.0,
            &format!("{} ({share:.1}%)", money(slice.holding.amount)),
            12.0,
            anchor,
            "normal",
            "#555555",
        );
    }

    legend(&mut svg, holdings, 700.0, 140.0);
    svg.finish()
}

/// Colour key listing every holder, largest first.
pub(crate) fn legend(svg: &mut Svg, holdings: &Holdings, x: f64, y: f64) {
    for (i, h) in holdings.sorted_desc().into_iter().enumerate() {
        let row = y + i as f64 * 26.0;
        svg.rect(x, row - 12.0, 14.0, 14.0, &h.color, None);
        svg.text(x + 22.0, row, &h.name, 12.0, "start", "normal", "#333333");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_cover_full_circle() {
        let h = Holdings::default();
        let slices = pie_slices(&h);
        let sum: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((sum - 360.0).abs() < 1e-9);
        let last = slices.last().unwrap();
        assert!((last.start + last.sweep - (START_ANGLE + 360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_slices_sorted_and_exploded() {
        let h = Holdings::default();
        let slices = pie_slices(&h);
        assert_eq!(slices[0].holding.name, "Foreign Official Holders");
        assert_eq!(slices[0].start, START_ANGLE);
        assert_eq!(slices[0].explode, 0.15);
        assert_eq!(slices[1].explode, 0.1);
        assert_eq!(slices[2].explode, 0.1);
        assert!(slices[3..].iter().all(|s| s.explode == 0.0));
        assert!(slices.windows(2).all(|w| w[0].sweep >= w[1].sweep));
    }

    #[test]
    fn test_pie_svg_contents() {
        let svg = pie_svg(&Holdings::default());
        assert_eq!(svg.matches("<path").count(), 7);
        assert!(svg.contains("December 2025"));
        assert!(svg.contains("U.S. Mutual Funds &amp; ETFs"));
        assert!(svg.contains("(22.6%)"));
    }
}
